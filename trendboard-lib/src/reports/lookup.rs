use core::error::Error;
use core::fmt::{Display, Formatter, Result as FmtResult};

/// Failure to resolve a layout or theme by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name contains characters outside `[a-z0-9_-]`.
    InvalidName { kind: &'static str, name: String },

    /// The name is well formed but nothing is registered under it.
    Unknown {
        kind: &'static str,
        name: String,
        available: Vec<String>,
    },
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidName { kind, name } => {
                write!(f, "invalid {kind} name '{name}': use lowercase letters, digits, '_' or '-'")
            }
            Self::Unknown { kind, name, available } => {
                write!(f, "unknown {kind} '{name}' (available: {})", available.join(", "))
            }
        }
    }
}

impl Error for LookupError {}

/// Returns true for names made of `[a-z0-9_-]`, at least one character long.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

pub(super) fn check_name(kind: &'static str, name: &str) -> Result<(), LookupError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(LookupError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("hud"));
        assert!(is_valid_name("solar-dark_2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Hud"));
        assert!(!is_valid_name("../etc"));
        assert!(!is_valid_name("a b"));
    }

    #[test]
    fn test_messages_contain_name() {
        let invalid = check_name("layout", "Neon!").unwrap_err();
        assert!(invalid.to_string().contains("'Neon!'"));

        let unknown = LookupError::Unknown {
            kind: "layout",
            name: "neon".to_string(),
            available: vec!["minimal".to_string(), "hud".to_string()],
        };
        assert_eq!(unknown.to_string(), "unknown layout 'neon' (available: minimal, hud)");
    }
}
