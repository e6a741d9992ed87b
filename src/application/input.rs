//! Caller-supplied numeric input
//!
//! Values and percentages are validated here, before they reach the domain layer.

use tracing::instrument;

use super::error::{ApplicationError, ApplicationResult};

/// Parses `text` as a finite number.
#[instrument(level = "trace")]
pub fn parse_amount(text: &str) -> ApplicationResult<f64> {
    let trimmed = text.trim();
    let invalid = |reason: &str| ApplicationError::InvalidNumericInput {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty input"));
    }
    let value: f64 = trimmed.parse().map_err(|_| invalid("not a number"))?;
    if !value.is_finite() {
        return Err(invalid("not a finite number"));
    }
    Ok(value)
}

/// Parses a percentage such as `-5`, `12.5%` or ` 10 % `; the `%` sign is optional.
pub fn parse_percentage(text: &str) -> ApplicationResult<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_amount(number).map_err(|e| match e {
        ApplicationError::InvalidNumericInput { reason, .. } => {
            ApplicationError::InvalidNumericInput {
                input: text.to_string(),
                reason,
            }
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_signed_decimals() {
        assert_eq!(parse_amount(" -12.5 ").unwrap(), -12.5);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        for input in ["", "  ", "abc", "NaN", "inf", "-infinity", "1,5"] {
            assert!(
                matches!(
                    parse_amount(input),
                    Err(ApplicationError::InvalidNumericInput { .. })
                ),
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_percentage_accepts_optional_sign() {
        assert_eq!(parse_percentage("10%").unwrap(), 10.0);
        assert_eq!(parse_percentage(" -12.5 % ").unwrap(), -12.5);
        assert_eq!(parse_percentage("7").unwrap(), 7.0);
    }

    #[test]
    fn test_parse_percentage_rejects_bare_sign() {
        for input in ["%", "abc%", "10%%"] {
            match parse_percentage(input) {
                Err(ApplicationError::InvalidNumericInput { input: reported, .. }) => {
                    assert_eq!(reported, input)
                }
                other => panic!("expected rejection for {input:?}, got {other:?}"),
            }
        }
    }
}
