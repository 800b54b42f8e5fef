use crate::error::AppError;

/// Trimmed value when the field carries any content.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Every field must be present, otherwise the whole request is rejected
/// with `message`.
pub fn require_all<'a, const N: usize>(
    fields: [&'a Option<String>; N],
    message: &str,
) -> Result<[&'a str; N], AppError> {
    let mut out = [""; N];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = present(field).ok_or_else(|| AppError::Validation(message.to_string()))?;
    }
    Ok(out)
}

/// Blank optional strings are stored as NULL.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_all_trims_and_rejects_blank() {
        let name = Some("  Rana ".to_string());
        let phone = Some("03 123 456".to_string());
        let [n, p] = require_all([&name, &phone], "Missing required fields").unwrap();
        assert_eq!(n, "Rana");
        assert_eq!(p, "03 123 456");

        let blank = Some("   ".to_string());
        let err = require_all([&name, &blank], "Missing required fields").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Missing required fields"));

        let missing: Option<String> = None;
        assert!(require_all([&missing], "x").is_err());
    }

    #[test]
    fn test_optional_maps_blank_to_none() {
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some("".into())), None);
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" a@x.com ".into())), Some("a@x.com".to_string()));
    }
}
