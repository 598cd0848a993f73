//! GeoJSON input model.
//!
//! - [`GeoJsonDocument`] - FeatureCollection / Feature / Geometry, normalized
//!   into a list of [`Feature`]s plus layer-level hints
//! - [`Geometry`] - Typed geometry with `f64` positions
//! - [`envelope_of`] - Bounding rectangle over every feature geometry

mod document;
mod envelope;

pub use document::{DocumentKind, Feature, GeoJsonDocument, Geometry, Position};
pub use envelope::envelope_of;
