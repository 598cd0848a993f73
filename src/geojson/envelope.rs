//! Envelope (minimum bounding rectangle) over a GeoJSON document.

use super::{GeoJsonDocument, Geometry, Position};
use crate::util::{BBox2d, DVec2, Error, Result};

/// Compute the envelope of every non-null feature geometry.
///
/// Features with a `null` geometry are skipped. A position with fewer than
/// two ordinates is an error. The returned box is *not* checked for
/// finiteness: a document without positions yields [`BBox2d::EMPTY`] and a
/// NaN ordinate poisons the box; callers decide what to do with that.
pub fn envelope_of(document: &GeoJsonDocument) -> Result<BBox2d> {
    let mut bbox = BBox2d::EMPTY;
    for geometry in document.geometries() {
        expand_by_geometry(&mut bbox, geometry)?;
    }
    Ok(bbox)
}

fn expand_by_geometry(bbox: &mut BBox2d, geometry: &Geometry) -> Result<()> {
    geometry.try_for_each_position(&mut |position: &Position| {
        if position.len() < 2 {
            return Err(Error::geometry(format!(
                "{} position has {} ordinate(s), expected at least 2",
                geometry.type_name(),
                position.len()
            )));
        }
        bbox.expand_by_point(DVec2::new(position[0], position[1]));
        Ok(())
    })
}
