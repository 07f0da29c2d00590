// ElasChat - core/count.rs
//
// Compact magnitude formatting for likes, followers, and similar counters:
// 999 -> "999", 1500 -> "1.5K", 1000000 -> "1.0M".
//
// Rounding is half away from zero at one decimal, computed in integers so
// results never depend on binary floating-point representation.

use crate::util::constants::{MILLION, THOUSAND};
use crate::util::error::FormatError;

/// Format a non-negative count compactly.
pub fn format_count(n: u64) -> String {
    if n >= MILLION {
        scaled(n, MILLION, 'M')
    } else if n >= THOUSAND {
        scaled(n, THOUSAND, 'K')
    } else {
        n.to_string()
    }
}

/// Format a signed count, rejecting negative values.
pub fn try_format_count(n: i64) -> Result<String, FormatError> {
    u64::try_from(n)
        .map(format_count)
        .map_err(|_| FormatError::InvalidCount { value: n })
}

/// `n / unit` rounded to one decimal, with `suffix` appended.
fn scaled(n: u64, unit: u64, suffix: char) -> String {
    // Tenths of a unit, rounded half up. u128 keeps `n * 10` from overflowing.
    let tenths = (n as u128 * 10 + unit as u128 / 2) / unit as u128;
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts_unchanged() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(format_count(1000), "1.0K");
        assert_eq!(format_count(1500), "1.5K");
        assert_eq!(format_count(45200), "45.2K");
        assert_eq!(format_count(125_000), "125.0K");
    }

    #[test]
    fn test_millions() {
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_345_678), "2.3M");
        assert_eq!(format_count(u64::MAX), "18446744073709.6M");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_count(1050), "1.1K");
        assert_eq!(format_count(1150), "1.2K");
        assert_eq!(format_count(1049), "1.0K");
        assert_eq!(format_count(1_250_000), "1.3M");
    }

    #[test]
    fn test_just_below_million_keeps_k_suffix() {
        assert_eq!(format_count(999_949), "999.9K");
        assert_eq!(format_count(999_950), "1000.0K");
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = try_format_count(-1).unwrap_err();
        assert!(matches!(err, FormatError::InvalidCount { value: -1 }));
        assert_eq!(try_format_count(45200).unwrap(), "45.2K");
    }
}
