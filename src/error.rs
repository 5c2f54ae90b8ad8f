use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    Unspecified(String),
    ParseError(String),
    SerializationError(String),
    NetworkError(String),
    ApiError(u16, String),
    IoError(String),
    ConfigError(String),
    NotFound,
}

impl Error {
    /// True when the request never produced a usable body.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::NetworkError(_) | Error::ApiError(_, _))
    }

    pub(crate) fn from_json(err: serde_json::Error) -> Error {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => Error::ParseError(format!("unexpected response shape ({}).", err)),
            Category::Syntax | Category::Eof | Category::Io => {
                Error::SerializationError(format!("invalid JSON ({}).", err))
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unspecified(g) => write!(f, "{}", g),
            Error::ParseError(g) => write!(f, "{}", g),
            Error::SerializationError(g) => write!(f, "{}", g),
            Error::NetworkError(g) => write!(f, "{}", g),
            Error::ApiError(status, _) => write!(f, "server responded with status {}.", status),
            Error::IoError(g) => write!(f, "{}", g),
            Error::ConfigError(g) => write!(f, "{}", g),
            Error::NotFound => write!(f, "Not found."),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_json_is_a_serialization_error() {
        let err = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let err = Error::from_json(err);
        assert!(matches!(err, Error::SerializationError(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
        assert!(!err.is_transport());
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let err = serde_json::from_str::<Vec<u32>>(r#"{"a": 1}"#).unwrap_err();
        let err = Error::from_json(err);
        assert!(matches!(err, Error::ParseError(_)));
        assert!(err.to_string().starts_with("unexpected response shape"));
    }

    #[test]
    fn api_error_is_transport() {
        let err = Error::ApiError(503, String::from("<html>busy</html>"));
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "server responded with status 503.");
    }
}
