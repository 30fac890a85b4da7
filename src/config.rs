//! Decode hints with process-wide defaults taken from the environment.

use std::sync::OnceLock;

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static TRY_HARDER: OnceLock<bool> = OnceLock::new();

fn try_harder_default() -> bool {
    *TRY_HARDER.get_or_init(|| parse_env_bool_u8("QR_TRY_HARDER", false))
}

static PURE_BARCODE: OnceLock<bool> = OnceLock::new();

fn pure_barcode_default() -> bool {
    *PURE_BARCODE.get_or_init(|| parse_env_bool_u8("QR_PURE_BARCODE", false))
}

/// Search tuning passed to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeHints {
    /// Scan every third row instead of deriving the stride from the image height.
    pub try_harder: bool,
    /// The image holds nothing but the symbol; enables the diagonal cross-check.
    pub pure_barcode: bool,
}

impl DecodeHints {
    /// Hints with every option off, ignoring the environment.
    pub const fn none() -> Self {
        Self {
            try_harder: false,
            pure_barcode: false,
        }
    }

    /// Override `try_harder`.
    pub fn with_try_harder(mut self, on: bool) -> Self {
        self.try_harder = on;
        self
    }

    /// Override `pure_barcode`.
    pub fn with_pure_barcode(mut self, on: bool) -> Self {
        self.pure_barcode = on;
        self
    }
}

impl Default for DecodeHints {
    /// Reads `QR_TRY_HARDER` and `QR_PURE_BARCODE` (non-zero = on) once per process.
    fn default() -> Self {
        Self {
            try_harder: try_harder_default(),
            pure_barcode: pure_barcode_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let hints = DecodeHints::none()
            .with_try_harder(true)
            .with_pure_barcode(true);
        assert!(hints.try_harder);
        assert!(hints.pure_barcode);
        assert_eq!(DecodeHints::none().with_try_harder(false), DecodeHints::none());
    }

    #[test]
    fn test_parse_env_fallback() {
        assert!(parse_env_bool_u8("QR_SURELY_UNSET_VARIABLE_FOR_TEST", true));
        assert!(!parse_env_bool_u8("QR_SURELY_UNSET_VARIABLE_FOR_TEST", false));
    }
}
