//! Output formatting helpers.

use std::time::Duration;

/// Format a duration in human-readable form.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else {
        format!("{secs:.3}s")
    }
}

/// Format a sequence as `[a, b, c]`, eliding the middle of long sequences
/// unless `full` is set.
#[must_use]
pub fn format_sequence(values: &[u64], full: bool) -> String {
    const EDGE: usize = 8;
    let join = |vs: &[u64]| {
        vs.iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    if full || values.len() <= 2 * EDGE {
        format!("[{}]", join(values))
    } else {
        format!(
            "[{}, ... ({} more) ..., {}]",
            join(&values[..EDGE]),
            values.len() - 2 * EDGE,
            join(&values[values.len() - EDGE..])
        )
    }
}

/// Format a sequence as bare comma-separated values, for quiet mode.
#[must_use]
pub fn format_plain(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(Duration::from_micros(5)), "5.00µs");
        assert_eq!(format_duration(Duration::from_millis(12)), "12.00ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.000s");
    }

    #[test]
    fn format_short_sequence() {
        assert_eq!(format_sequence(&[26, 115, 437], false), "[26, 115, 437]");
        assert_eq!(format_sequence(&[], false), "[]");
    }

    #[test]
    fn format_long_sequence() {
        let values: Vec<u64> = (0..20).collect();
        assert_eq!(
            format_sequence(&values, false),
            "[0, 1, 2, 3, 4, 5, 6, 7, ... (4 more) ..., 12, 13, 14, 15, 16, 17, 18, 19]"
        );
        assert!(format_sequence(&values, true).contains("8, 9, 10, 11"));
    }

    #[test]
    fn format_plain_values() {
        assert_eq!(format_plain(&[26, 115, 437]), "26,115,437");
    }
}
