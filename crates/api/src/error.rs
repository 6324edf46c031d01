#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: Expected value to be neither null nor undefined{}", describe(.0))]
    Missing(Option<String>),
    #[error("Internal error: Expected value to be neither null, undefined, nor empty{}", describe(.0))]
    Empty(Option<String>),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Host error: {0}")]
    Host(String),
}

fn describe(what: &Option<String>) -> String {
    what.as_ref().map(|w| format!(": {w}")).unwrap_or_default()
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Unwraps a value the host promised to provide.
pub fn require<T>(value: Option<T>, what: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::Missing(label(what)))
}

/// Like [`require`], but also rejects empty strings.
pub fn require_non_empty(value: Option<&str>, what: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::Empty(label(what))),
    }
}

fn label(what: &str) -> Option<String> {
    (!what.is_empty()).then(|| what.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_the_missing_property() {
        let err = require::<u8>(None, "content").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal error: Expected value to be neither null nor undefined: content"
        );

        let err = require::<u8>(None, "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal error: Expected value to be neither null nor undefined"
        );
        assert_eq!(require(Some(3), "x").unwrap(), 3);
    }

    #[test]
    fn require_non_empty_rejects_blank_strings() {
        assert!(matches!(
            require_non_empty(Some(""), "name"),
            Err(ApiError::Empty(Some(_)))
        ));
        assert!(require_non_empty(None, "name").is_err());
        assert_eq!(require_non_empty(Some("jdk"), "name").unwrap(), "jdk");
    }
}
