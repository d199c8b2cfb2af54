//! Access token handling.

use std::fmt;

use crate::error::{Error, Result};

/// Value the CLI uses to mean "no token supplied, ask for one".
pub const TOKEN_SENTINEL: &str = "false";

/// Authorization scheme of the token.
const SCHEME: &str = "Bearer";

/// A bearer token accepted by the Udemy API.
///
/// The raw token is never printed; `Debug` only shows a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from user input.
    ///
    /// Accepts the bare token or a pasted `Bearer <token>` header value.
    pub fn new(raw: &str) -> Result<Self> {
        let token = strip_scheme(raw);

        if token.is_empty() || token == TOKEN_SENTINEL {
            return Err(Error::MissingConfig("access_token".to_string()));
        }

        if token.chars().any(char::is_whitespace) {
            return Err(Error::Authentication(
                "Access token must not contain whitespace".to_string(),
            ));
        }

        Ok(Self(token.to_string()))
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// The bare token.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "Credential({}…)", prefix)
    }
}

/// Drop a leading `Bearer` scheme word, in any case, from a pasted header value.
fn strip_scheme(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.get(..SCHEME.len()) {
        Some(word) if word.eq_ignore_ascii_case(SCHEME) => {
            let rest = &raw[SCHEME.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim()
            } else {
                raw
            }
        }
        _ => raw,
    }
}

/// Whether a raw token value means "not supplied".
pub fn is_token_missing(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None => true,
        Some(t) => t.is_empty() || t == TOKEN_SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_token() {
        let cred = Credential::new("  abc123XYZ ").unwrap();
        assert_eq!(cred.token(), "abc123XYZ");
        assert_eq!(cred.header_value(), "Bearer abc123XYZ");
    }

    #[test]
    fn test_pasted_header_value() {
        let cred = Credential::new("Bearer abc123XYZ").unwrap();
        assert_eq!(cred.token(), "abc123XYZ");
    }

    #[test]
    fn test_sentinel_and_empty_rejected() {
        assert!(matches!(
            Credential::new("false"),
            Err(Error::MissingConfig(_))
        ));
        assert!(Credential::new("   ").is_err());
        assert!(Credential::new("Bearer ").is_err());
        assert!(Credential::new("bearer").is_err());
    }

    #[test]
    fn test_scheme_word_any_case() {
        assert_eq!(Credential::new("BEARER abc").unwrap().token(), "abc");
        assert_eq!(Credential::new("bearer\tabc").unwrap().token(), "abc");
        assert_eq!(Credential::new(" Bearer   abc  ").unwrap().token(), "abc");
        // Only a separate word is a scheme
        assert_eq!(Credential::new("Bearerabc").unwrap().token(), "Bearerabc");
    }

    #[test]
    fn test_whitespace_rejected() {
        assert!(Credential::new("abc def").is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let cred = Credential::new("supersecrettoken").unwrap();
        let shown = format!("{:?}", cred);
        assert!(!shown.contains("supersecrettoken"));
        assert!(shown.starts_with("Credential(supe"));
    }

    #[test]
    fn test_is_token_missing() {
        assert!(is_token_missing(None));
        assert!(is_token_missing(Some("false")));
        assert!(is_token_missing(Some("")));
        assert!(!is_token_missing(Some("abc")));
    }
}
