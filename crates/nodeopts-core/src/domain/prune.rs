//! Prune target unit conversion.
//!
//! The node takes its prune target in MiB; the dialog shows it in (decimal)
//! GB.  Converting MiB to GB rounds up so a stored GB value never prunes more
//! aggressively than the MiB target the user picked.

/// Bytes in one decimal gigabyte.
pub const GB_BYTES: i64 = 1_000_000_000;

/// Prune size in GB written when pruning is enabled without a stored size.
pub const DEFAULT_PRUNE_TARGET_GB: i64 = 2;

/// Targets at or below this many MiB mean "pruning disabled"
/// (`0` is off, `1` is manual pruning).
pub const PRUNE_DISABLED_MAX_MIB: i64 = 1;

/// Converts a MiB prune target to whole GB, rounding up.  Saturates
/// instead of overflowing.
pub fn prune_mib_to_gb(mib: i64) -> i64 {
    mib.saturating_mul(1024 * 1024).saturating_add(GB_BYTES - 1) / GB_BYTES
}

/// Converts a GB prune size back to the MiB target passed to the node.
/// Saturates instead of overflowing.
pub fn prune_gb_to_mib(gb: i64) -> i64 {
    gb.saturating_mul(GB_BYTES) / 1024 / 1024
}

/// Whether a MiB target enables automatic pruning.
pub fn is_pruning_target(mib: i64) -> bool {
    mib > PRUNE_DISABLED_MAX_MIB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_prune_target_rounds_up_to_one_gb() {
        assert_eq!(prune_mib_to_gb(550), 1);
    }

    #[test]
    fn test_default_gb_converts_to_mib() {
        assert_eq!(prune_gb_to_mib(DEFAULT_PRUNE_TARGET_GB), 1907);
    }

    #[test]
    fn test_gb_round_trip_does_not_shrink() {
        for gb in 1..20 {
            assert_eq!(prune_mib_to_gb(prune_gb_to_mib(gb)), gb);
        }
    }

    #[test]
    fn test_huge_mib_target_saturates() {
        // Arrange
        let mib = 9_000_000_000_000;

        // Act
        let gb = prune_mib_to_gb(mib);

        // Assert
        assert_eq!(gb, i64::MAX / GB_BYTES);
        assert_eq!(prune_mib_to_gb(i64::MAX), i64::MAX / GB_BYTES);
    }

    #[test]
    fn test_huge_gb_size_saturates() {
        assert_eq!(prune_gb_to_mib(10_000_000_000), i64::MAX / 1024 / 1024);
        assert_eq!(prune_gb_to_mib(i64::MAX), i64::MAX / 1024 / 1024);
    }

    #[test]
    fn test_zero_and_one_disable_pruning() {
        assert!(!is_pruning_target(0));
        assert!(!is_pruning_target(1));
        assert!(is_pruning_target(2));
    }
}
