//! Input validation helpers
//!
//! Form fields arrive as free text from the UI. Numeric fields accept a
//! comma as the decimal separator (pt-BR keyboards), matching the data the
//! legacy entry screens produced.

use crate::utils::AppError;

/// Validate that a required string is non-empty after trimming.
pub fn validate_required_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Parse a decimal typed by the user, tolerating `,` as the decimal separator.
///
/// Returns `None` for anything that is not a finite number.
pub fn parse_decimal_input(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parse a quantity field: a finite number, zero or positive.
pub fn parse_quantity(value: &str) -> Option<f64> {
    parse_decimal_input(value).filter(|v| *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(validate_required_text("  ", "nome").is_err());
        assert!(validate_required_text("Perfil U", "nome").is_ok());
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal_input("2,5"), Some(2.5));
        assert_eq!(parse_decimal_input("10.75"), Some(10.75));
        assert_eq!(parse_decimal_input(" 3 "), Some(3.0));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal_input("abc"), None);
        assert_eq!(parse_decimal_input(""), None);
        assert_eq!(parse_decimal_input("NaN"), None);
        assert_eq!(parse_decimal_input("inf"), None);
    }

    #[test]
    fn test_parse_quantity_rejects_negative() {
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("0"), Some(0.0));
        assert_eq!(parse_quantity("4"), Some(4.0));
    }
}
