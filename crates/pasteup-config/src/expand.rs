//! Environment variable and home directory expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Bare `$VAR` is left alone, so colors and CSS values pass through.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand environment variables, then a leading `~`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = expand_env(value, field)?;
    Ok(shellexpand::tilde(&expanded).into_owned())
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("PASTEUP_TEST_SIMPLE", "hello");
        }
        let result = expand_env("${PASTEUP_TEST_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("PASTEUP_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PASTEUP_TEST_UNSET");
        }
        let result = expand_env("${PASTEUP_TEST_UNSET:-#333}", "theme.text").unwrap();
        assert_eq!(result, "#333");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("PASTEUP_TEST_MISSING");
        }
        let err = expand_env("${PASTEUP_TEST_MISSING}", "output.input").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("PASTEUP_TEST_MISSING"));
        assert!(err.to_string().contains("output.input"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("#FA5151", "theme.primary").unwrap(), "#FA5151");
        assert_eq!(expand_env("cost $5", "theme.font_family").unwrap(), "cost $5");
    }

    #[test]
    fn test_expand_path_tilde() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HOME", "/home/tester");
        }
        assert_eq!(
            expand_path("~/notes/in.md", "output.input").unwrap(),
            "/home/tester/notes/in.md"
        );
        assert_eq!(expand_path("plain.md", "output.input").unwrap(), "plain.md");
    }
}
