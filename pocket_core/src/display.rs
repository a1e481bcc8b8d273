//! # Memory Display Formatting
//!
//! Renders the accumulator as compact ASCII text: plain decimal notation in
//! a readable magnitude window, `m e p` scientific form outside it. Digits
//! are the shortest sequence that round-trips the value; no grouping
//! separators, no locale awareness.

/// Magnitude at and above which the display switches to scientific form.
const SCIENTIFIC_UPPER: f64 = 1e12;

/// Magnitude below which a non-zero value switches to scientific form.
const SCIENTIFIC_LOWER: f64 = 1e-6;

/// Format a memory value for display.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0 as well
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_UPPER || magnitude < SCIENTIFIC_LOWER {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimal() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(-55.0), "-55");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(123456789.0), "123456789");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "0");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_value(1.5e25), "1.5e25");
        assert_eq!(format_value(-2e99), "-2e99");
        assert_eq!(format_value(1e-7), "1e-7");
        assert_eq!(format_value(2.43290200817664e18), "2.43290200817664e18");
    }

    #[test]
    fn test_window_edges() {
        assert_eq!(format_value(999999999999.0), "999999999999");
        assert_eq!(format_value(1e12), "1e12");
        assert_eq!(format_value(1e-6), "0.000001");
    }
}
