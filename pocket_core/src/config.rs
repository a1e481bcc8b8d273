//! # Engine Configuration
//!
//! Display limits and the decimal separator character. The separator is
//! derived from the locale environment once, when the configuration is
//! built, and stays fixed for the lifetime of the engine instance.

use serde::{Deserialize, Serialize};

/// Default maximum number of digits typed into the mantissa.
pub const DEFAULT_MANTISSA_DIGIT_LIMIT: usize = 9;

/// Default maximum number of digits typed into the exponent.
pub const DEFAULT_EXPONENT_DIGIT_LIMIT: usize = 2;

/// Limits and locale settings for one engine instance.
///
/// `Default` reads the decimal separator from the process environment
/// (`LC_ALL`, `LC_NUMERIC`, `LANG`, first one set wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum digits accepted into the mantissa segment of the buffer
    pub mantissa_digit_limit: usize,

    /// Maximum digits accepted into the exponent segment of the buffer
    pub exponent_digit_limit: usize,

    /// Decimal point character, `'.'` or `','`
    pub decimal_separator: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mantissa_digit_limit: DEFAULT_MANTISSA_DIGIT_LIMIT,
            exponent_digit_limit: DEFAULT_EXPONENT_DIGIT_LIMIT,
            decimal_separator: decimal_separator_from_env(),
        }
    }
}

/// Languages that conventionally write decimals with a comma.
const COMMA_DECIMAL_LANGS: &[&str] = &[
    "az", "be", "bg", "bs", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fr", "gl",
    "hr", "hu", "id", "is", "it", "ka", "kk", "lt", "lv", "mk", "nb", "nl", "nn", "no", "pl",
    "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk", "vi",
];

/// Read the decimal separator from the locale environment.
pub fn decimal_separator_from_env() -> char {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_NUMERIC"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();
    separator_for_locale(&locale)
}

/// Map a POSIX locale name (e.g. `"cs_CZ.UTF-8"`) to its decimal separator.
///
/// Unknown or unset locales (including `"C"` and `"POSIX"`) fall back to `'.'`.
pub fn separator_for_locale(locale: &str) -> char {
    let lang = locale
        .split(|c: char| c == '_' || c == '.' || c == '@')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    if COMMA_DECIMAL_LANGS.contains(&lang.as_str()) {
        ','
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_for_locale() {
        assert_eq!(separator_for_locale("en_US.UTF-8"), '.');
        assert_eq!(separator_for_locale("cs_CZ.UTF-8"), ',');
        assert_eq!(separator_for_locale("de_DE@euro"), ',');
        assert_eq!(separator_for_locale("fr"), ',');
        assert_eq!(separator_for_locale("C"), '.');
        assert_eq!(separator_for_locale(""), '.');
    }

    #[test]
    fn test_default_limits() {
        let cfg = EngineConfig {
            decimal_separator: '.',
            ..Default::default()
        };
        assert_eq!(cfg.mantissa_digit_limit, 9);
        assert_eq!(cfg.exponent_digit_limit, 2);
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EngineConfig {
            mantissa_digit_limit: 9,
            exponent_digit_limit: 2,
            decimal_separator: ',',
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let roundtrip: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, roundtrip);
    }
}
