use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("field '{field}' is unset — allocate the nested value before binding")]
    NilField { field: &'static str },

    #[error("unsupported type for field '{field}': {type_name}")]
    UnsupportedType {
        field: &'static str,
        type_name: &'static str,
    },

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_field_names_the_field() {
        let err = BindError::NilField { field: "database" };
        assert!(err.to_string().contains("database"));
    }

    #[test]
    fn unsupported_type_names_field_and_type() {
        let err = BindError::UnsupportedType {
            field: "lookup",
            type_name: "HashMap<String, String>",
        };
        let msg = err.to_string();
        assert!(msg.contains("lookup"));
        assert!(msg.contains("HashMap"));
    }

    #[test]
    fn invalid_value_formats() {
        let err = BindError::InvalidValue {
            key: "server.port".into(),
            reason: "expected integer".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("server.port"));
        assert!(msg.contains("expected integer"));
    }
}
