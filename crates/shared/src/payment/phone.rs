use crate::errors::ServiceError;

/// Ugandan country code used as the international prefix.
const COUNTRY_CODE: &str = "256";

/// Validates a subscriber phone number and normalizes it to international
/// form. Two shapes are accepted:
///
///   - international: `256` followed by 9 digits (12 digits total),
///     returned unchanged,
///   - local: a leading `0` followed by 9 digits (10 digits total), the
///     `0` is replaced by the country code.
///
/// Everything else fails with `InvalidPhoneNumber`.
pub fn normalize_msisdn(input: &str) -> Result<String, ServiceError> {
    let digits = input.trim();

    if digits.is_empty() {
        return Err(ServiceError::InvalidPhoneNumber(
            "phone number is required".into(),
        ));
    }

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServiceError::InvalidPhoneNumber(format!(
            "'{input}' contains non-digit characters"
        )));
    }

    if digits.len() == 12 && digits.starts_with(COUNTRY_CODE) {
        return Ok(digits.to_string());
    }

    if digits.len() == 10 && digits.starts_with('0') {
        return Ok(format!("{COUNTRY_CODE}{}", &digits[1..]));
    }

    Err(ServiceError::InvalidPhoneNumber(format!(
        "'{input}' must be 0XXXXXXXXX or {COUNTRY_CODE}XXXXXXXXX"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_form_is_prefixed_with_the_country_code() {
        assert_eq!(normalize_msisdn("0700123456").unwrap(), "256700123456");
    }

    #[test]
    fn international_form_passes_through_unchanged() {
        assert_eq!(normalize_msisdn("256700123456").unwrap(), "256700123456");
    }

    #[test]
    fn both_forms_normalize_to_the_same_representation() {
        assert_eq!(
            normalize_msisdn("0700123456").unwrap(),
            normalize_msisdn("256700123456").unwrap()
        );
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        assert!(matches!(
            normalize_msisdn("12345"),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            normalize_msisdn("25670012"),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
        // 12 digits but not the regional country code
        assert!(matches!(
            normalize_msisdn("254700123456"),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
        // 10 digits without the leading zero
        assert!(matches!(
            normalize_msisdn("7001234567"),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
    }

    #[test]
    fn non_digit_input_is_rejected() {
        assert!(matches!(
            normalize_msisdn("+256700123456"),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            normalize_msisdn("07001 23456"),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            normalize_msisdn(""),
            Err(ServiceError::InvalidPhoneNumber(_))
        ));
    }
}
