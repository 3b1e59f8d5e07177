use reqwest::Url;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the notes API, e.g. `http://localhost:4000`.
    pub api_url: Url,
}

/// Start-up configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NOTES_API_URL must be set")]
    MissingApiUrl,

    #[error("NOTES_API_URL '{value}' is not a valid http(s) URL: {reason}")]
    InvalidApiUrl { value: String, reason: String },
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var         | Required | Description               |
    /// |-----------------|----------|---------------------------|
    /// | `NOTES_API_URL` | yes      | Base URL of the notes API |
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("NOTES_API_URL") {
            Ok(value) if !value.trim().is_empty() => Self::from_api_url(value.trim()),
            _ => Err(ConfigError::MissingApiUrl),
        }
    }

    /// Build a configuration from an explicit base URL.
    pub fn from_api_url(value: &str) -> Result<Self, ConfigError> {
        let api_url = Url::parse(value).map_err(|e| ConfigError::InvalidApiUrl {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                value: value.to_string(),
                reason: format!("unsupported scheme '{}'", api_url.scheme()),
            });
        }

        Ok(Self { api_url })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn http_url_accepted() {
        let config = ClientConfig::from_api_url("http://localhost:4000").unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:4000/");
    }

    #[test]
    fn garbage_rejected() {
        assert_matches!(
            ClientConfig::from_api_url("not a url"),
            Err(ConfigError::InvalidApiUrl { .. })
        );
    }

    #[test]
    fn non_http_scheme_rejected() {
        assert_matches!(
            ClientConfig::from_api_url("ftp://example.com"),
            Err(ConfigError::InvalidApiUrl { .. })
        );
    }
}
