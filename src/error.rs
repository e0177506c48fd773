//! Error types for the browser

use thiserror::Error;

/// Failures talking to the video metadata API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not JSON
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err)
        }
    }
}

/// Failures loading the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no config directory on this platform")]
    MissingDirectory,
}

/// Failures fetching or decoding a thumbnail image
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("thumbnail request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("thumbnail could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
}

/// Failures handing a video to an external player
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("failed to start player `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read player output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to open browser: {0}")]
    Browser(String),
}

/// Failures loading the embedded category list
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("embedded asset `{0}` is missing")]
    MissingAsset(&'static str),

    #[error("category list is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_includes_code() {
        let err = ApiError::Status {
            status: 429,
            message: "Too many requests".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 429: Too many requests");
    }

    #[test]
    fn missing_asset_names_the_file() {
        let err = CategoryError::MissingAsset("categories.json");
        assert!(err.to_string().contains("categories.json"));
    }
}
