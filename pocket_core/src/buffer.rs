//! # Input Buffer
//!
//! The editable numeric entry the user is composing. The buffer holds one of
//! the textual forms: empty, `"0"`, `[-]digits[.digits][e[-]digits]`, with
//! at most one decimal separator and at most one exponent marker.
//!
//! The editor enforces format and length invariants only; it performs no
//! arithmetic and knows nothing about the sticky error status (the engine
//! wraps every editing call with that guard).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;
use crate::errors::{EngineError, EngineResult};

/// Hard cap on the stored buffer length.
pub const BUFFER_CAPACITY: usize = 100;

/// Exponent marker character. Fixed regardless of locale.
pub(crate) const EXPONENT_MARKER: char = 'e';

/// Growable numeric entry with explicit bounds checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBuffer {
    text: String,
}

/// What one pass over the buffer found, segment counters reset at the
/// exponent marker so they always describe the trailing segment.
struct Scan {
    decimal_point: bool,
    digits: usize,
    exponent: Option<usize>,
}

impl InputBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    fn scan(&self, separator: char) -> Scan {
        let mut scan = Scan {
            decimal_point: false,
            digits: 0,
            exponent: None,
        };
        for (i, c) in self.text.char_indices() {
            if c == separator {
                scan.decimal_point = true;
            } else if c == EXPONENT_MARKER {
                scan.exponent = Some(i);
                scan.decimal_point = false;
                scan.digits = 0;
            } else if c.is_ascii_digit() {
                scan.digits += 1;
            }
        }
        scan
    }

    /// Insert a digit at the end of the active segment.
    ///
    /// A segment holding exactly `0` or `-0` (and no decimal point) is
    /// replaced in place, so `"0"` + `5` gives `"5"`, not `"05"`. Once the
    /// segment's digit limit is reached the call is a silent no-op.
    pub fn insert_digit(&mut self, digit: char, config: &EngineConfig) {
        debug_assert!(digit.is_ascii_digit());
        let scan = self.scan(config.decimal_separator);
        let segment_start = scan.exponent.map(|i| i + 1).unwrap_or(0);
        let segment = &self.text[segment_start..];
        if (segment == "0" || segment == "-0") && !scan.decimal_point {
            self.text.pop();
            self.text.push(digit);
            return;
        }
        let limit = if scan.exponent.is_some() {
            config.exponent_digit_limit
        } else {
            config.mantissa_digit_limit
        };
        if scan.digits < limit && self.text.len() < BUFFER_CAPACITY {
            self.text.push(digit);
        }
    }

    /// Append the decimal separator.
    ///
    /// No-op if a separator or the exponent marker is already present. When
    /// no non-zero digit has been typed yet, a `0` goes in first through the
    /// digit path.
    pub fn insert_decimal_point(&mut self, config: &EngineConfig) {
        let mut non_zero_digits = 0;
        for c in self.text.chars() {
            if c == config.decimal_separator || c == EXPONENT_MARKER {
                return;
            }
            if ('1'..='9').contains(&c) {
                non_zero_digits += 1;
            }
        }
        if non_zero_digits == 0 {
            self.insert_digit('0', config);
        }
        if self.text.len() < BUFFER_CAPACITY {
            self.text.push(config.decimal_separator);
        }
    }

    /// Append the exponent marker.
    ///
    /// A dangling decimal separator is removed first (via [`backspace`]).
    /// No-op if a marker is already present. When no non-zero digit has been
    /// typed yet, a `1` goes in first through the digit path.
    ///
    /// [`backspace`]: InputBuffer::backspace
    pub fn insert_exponent(&mut self, config: &EngineConfig) {
        if self.text.ends_with(config.decimal_separator) {
            self.backspace();
        }
        let mut non_zero_digits = 0;
        for c in self.text.chars() {
            if c == EXPONENT_MARKER {
                return;
            }
            if ('1'..='9').contains(&c) {
                non_zero_digits += 1;
            }
        }
        if non_zero_digits == 0 {
            self.insert_digit('1', config);
        }
        if self.text.len() < BUFFER_CAPACITY {
            self.text.push(EXPONENT_MARKER);
        }
    }

    /// Toggle the minus sign of the active segment.
    ///
    /// With an exponent marker present the sign sits right after it,
    /// otherwise at the very start. Character insertion/removal only, never
    /// a numeric negation.
    pub fn negate(&mut self) {
        let sign_index = match self.text.find(EXPONENT_MARKER) {
            Some(marker) => marker + 1,
            None => 0,
        };
        if self.text[sign_index..].starts_with('-') {
            self.text.remove(sign_index);
        } else if self.text.len() < BUFFER_CAPACITY {
            self.text.insert(sign_index, '-');
        }
    }

    /// Remove the last character. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// Render the buffer for display without mutating it.
    ///
    /// An empty buffer shows as `"0"`; a buffer ending in `-` or the
    /// exponent marker gets a trailing `0` appended to the copy only, so the
    /// stored text keeps forms like `"1e"` and `"-"`.
    pub fn display(&self) -> String {
        if self.text.is_empty() {
            return "0".to_string();
        }
        let mut out = self.text.clone();
        if out.ends_with(EXPONENT_MARKER) || out.ends_with('-') {
            out.push('0');
        }
        out
    }

    /// Parse the buffer as a number and clear it.
    ///
    /// The display repair is applied to the content first, then a trailing
    /// decimal separator is trimmed and a `,` separator mapped to `.` for
    /// parsing. The editor operations never leave an unparseable buffer;
    /// a parse failure here is a defensive [`EngineError::Syntax`].
    pub fn consume(&mut self, config: &EngineConfig) -> EngineResult<f64> {
        let mut text = self.display();
        self.text.clear();
        if text.ends_with(config.decimal_separator) {
            text.pop();
        }
        if config.decimal_separator != '.' {
            text = text.replace(config.decimal_separator, ".");
        }
        text.parse::<f64>().map_err(|_| {
            warn!(buffer = %text, "input buffer did not parse as a number");
            EngineError::Syntax
        })
    }
}
