//! Input validation functions
//!
//! Custom field validators used by the `validator` derive on request types,
//! plus helpers for turning `ValidationErrors` into client-facing messages.

use std::borrow::Cow;
use std::sync::OnceLock;

use validator::{ValidationError, ValidationErrors};

/// Authenticator apps emit 6 to 8 decimal digits
const OTP_CODE_PATTERN: &str = r"^[0-9]{6,8}$";

fn otp_code_regex() -> &'static regex_lite::Regex {
    static REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
    REGEX.get_or_init(|| regex_lite::Regex::new(OTP_CODE_PATTERN).expect("valid OTP code pattern"))
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Reject empty or whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("blank", "must not be blank"));
    }
    Ok(())
}

/// Every entry of a string list must be non-blank
pub fn validate_entries(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(error_with_message("blank_entry", "must not contain blank entries"));
    }
    Ok(())
}

/// Validate an authenticator code
pub fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    if !otp_code_regex().is_match(code) {
        return Err(error_with_message("otp_code", "must be a 6 to 8 digit code"));
    }
    Ok(())
}

// ============================================================================
// Error Formatting
// ============================================================================

/// Map Rust field names to the camelCase names clients send
pub fn field_display_name(field_name: &str) -> String {
    let mut out = String::with_capacity(field_name.len());
    let mut upper_next = false;
    for ch in field_name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Flatten `ValidationErrors` into one message, fields sorted by name
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let field = field_display_name(field.as_ref());
            let reasons: Vec<String> = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("is invalid ({})", e.code),
                })
                .collect();
            format!("{}: {}", field, reasons.join(", "))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "validate_not_blank"))]
        exercise_id: String,
        #[validate(custom(function = "validate_entries"))]
        body_parts: Vec<String>,
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("abs").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t").is_err());
    }

    #[test]
    fn test_validate_entries() {
        assert!(validate_entries(&[]).is_ok());
        assert!(validate_entries(&["waist".to_string()]).is_ok());
        assert!(validate_entries(&["waist".to_string(), " ".to_string()]).is_err());
    }

    #[test]
    fn test_validate_otp_code() {
        assert!(validate_otp_code("123456").is_ok());
        assert!(validate_otp_code("12345678").is_ok());
        assert!(validate_otp_code("12345").is_err());
        assert!(validate_otp_code("123456789").is_err());
        assert!(validate_otp_code("6XX5XX").is_err());
        assert!(validate_otp_code("").is_err());
    }

    #[test]
    fn test_field_display_name() {
        assert_eq!(field_display_name("gif_url"), "gifUrl");
        assert_eq!(field_display_name("secondary_muscles"), "secondaryMuscles");
        assert_eq!(field_display_name("name"), "name");
    }

    #[test]
    fn test_describe_validation_errors_uses_client_field_names() {
        let sample = Sample {
            exercise_id: " ".to_string(),
            body_parts: vec!["".to_string()],
        };
        let errors = sample.validate().unwrap_err();
        let message = describe_validation_errors(&errors);

        assert_eq!(
            message,
            "bodyParts: must not contain blank entries; exerciseId: must not be blank"
        );
    }

    proptest! {
        #[test]
        fn prop_six_digit_codes_accepted(code in "[0-9]{6}") {
            prop_assert!(validate_otp_code(&code).is_ok());
        }

        #[test]
        fn prop_codes_with_letters_rejected(code in "[0-9]{2}[a-zA-Z][0-9]{3}") {
            prop_assert!(validate_otp_code(&code).is_err());
        }
    }
}
