use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for optional phone numbers on the contact form
    /// Digits with optional leading plus and common separators
    /// - Valid: "+44 20 7946 0958", "020-7946-0958", "(020) 7946 0958"
    /// - Invalid: "call me", "12", "+44 abc"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9()\-\s.]{6,20}$").unwrap();
}

/// Trim a submitted optional field and drop it when blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required text fields must contain more than whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Case folding used by every text search.
///
/// ASCII only, matching SQLite's `LOWER` and `LIKE`, so both backends agree
/// on non-ASCII text.
pub fn fold_case(value: &str) -> String {
    value.to_ascii_lowercase()
}

/// Escape `%`, `_` and `\` so a search term matches literally inside `LIKE`
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+44 20 7946 0958"));
        assert!(PHONE_REGEX.is_match("020-7946-0958"));
        assert!(PHONE_REGEX.is_match("(020) 7946 0958"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("12"));
        assert!(!PHONE_REGEX.is_match("+44 abc"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Open Mic").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n ").is_err());
    }

    #[test]
    fn test_fold_case_is_ascii_only() {
        assert_eq!(fold_case("Farmers MARKET"), "farmers market");
        assert_eq!(fold_case("CAFÉ"), "cafÉ");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("farmers"), "farmers");
    }
}
