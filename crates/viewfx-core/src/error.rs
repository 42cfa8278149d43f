use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_source_message() {
        let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "consent.json").into();
        assert!(matches!(io, Error::Io(_)));
        assert_eq!(io.to_string(), "IO error: consent.json");

        let json: Error = serde_json::from_str::<bool>("nope").unwrap_err().into();
        assert!(matches!(json, Error::Json(_)));
        assert!(json.to_string().starts_with("JSON error: "));
    }
}
