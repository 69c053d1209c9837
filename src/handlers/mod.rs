pub mod index;
pub mod prices;
pub mod threshold;

pub use index::*;
pub use prices::*;
pub use threshold::*;

use crate::error::AppError;

/// Interpret a `force` query value. Unrecognised values mean "don't force".
pub fn parse_force(raw: Option<&str>) -> bool {
    match raw.map(|v| v.trim().to_uppercase()) {
        Some(v) => matches!(v.as_str(), "1" | "T" | "TRUE"),
        None => false,
    }
}

/// Parse the `trtl` quantity, defaulting to 1
pub fn parse_trtl(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw.unwrap_or("1");
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("Problem converting {} to an int", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_accepts_boolean_spellings() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert!(parse_force(Some(raw)), "{} should force", raw);
        }
        for raw in ["0", "f", "false", "yes", "", "2"] {
            assert!(!parse_force(Some(raw)), "{} should not force", raw);
        }
        assert!(!parse_force(None));
    }

    #[test]
    fn trtl_defaults_to_one() {
        assert_eq!(parse_trtl(None).unwrap(), 1);
        assert_eq!(parse_trtl(Some("250")).unwrap(), 250);
    }

    #[test]
    fn trtl_must_be_an_integer() {
        let err = parse_trtl(Some("1.5")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Problem converting 1.5 to an int"));
    }
}
