//! Merge-defined-only helpers.
//!
//! Overrides coming from the options bag are optional. A missing override
//! must leave the existing value alone; it must never reset it. These
//! helpers make that rule explicit at every call site instead of relying on
//! plain assignment.

/// Overwrite `slot` only when `value` is present.
///
/// Returns `true` if the slot was written.
#[inline]
pub fn merge_defined<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// Like [`merge_defined`] for slots that are themselves optional.
#[inline]
pub fn merge_defined_opt<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

/// A patch of optional values that can be merged onto a target.
pub trait MergeDefined<Target: ?Sized> {
    /// Apply every present value of this patch to `target`.
    fn merge_into(self, target: &mut Target);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_defined_writes_present() {
        let mut v = 0.0;
        assert!(merge_defined(&mut v, Some(1500.0)));
        assert_eq!(v, 1500.0);
    }

    #[test]
    fn test_merge_defined_skips_absent() {
        let mut v = 42.0;
        assert!(!merge_defined(&mut v, None));
        assert_eq!(v, 42.0);
    }

    #[test]
    fn test_merge_defined_opt() {
        let mut slot = Some("Default".to_string());
        merge_defined_opt(&mut slot, None);
        assert_eq!(slot.as_deref(), Some("Default"));

        merge_defined_opt(&mut slot, Some("Override".to_string()));
        assert_eq!(slot.as_deref(), Some("Override"));
    }
}
