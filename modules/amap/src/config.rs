use crate::error::AmapError;

/// Environment variable holding the AMap web API key.
pub const AMAP_KEY_ENV: &str = "AMAP_KEY";

/// Environment variable holding the AMap security js code.
pub const AMAP_SECURITY_JS_CODE_ENV: &str = "AMAP_SECURITY_JS_CODE";

/// Credentials needed to load the AMap SDK.
///
/// Both values are required but only checked when a cold load is attempted,
/// so an incomplete configuration does not fail until geolocation is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmapConfig {
    pub key: Option<String>,
    pub security_js_code: Option<String>,
}

impl AmapConfig {
    pub fn new(key: impl Into<String>, security_js_code: impl Into<String>) -> Self {
        AmapConfig {
            key: Some(key.into()),
            security_js_code: Some(security_js_code.into()),
        }
    }

    /// Reads the configuration from [`AMAP_KEY_ENV`] and [`AMAP_SECURITY_JS_CODE_ENV`].
    pub fn from_env() -> Self {
        AmapConfig {
            key: std::env::var(AMAP_KEY_ENV).ok(),
            security_js_code: std::env::var(AMAP_SECURITY_JS_CODE_ENV).ok(),
        }
    }

    /// Returns the API key or [`AmapError::MissingConfiguration`] when absent or empty.
    pub fn key(&self) -> Result<&str, AmapError> {
        non_empty(&self.key, AMAP_KEY_ENV)
    }

    /// Returns the security code or [`AmapError::MissingConfiguration`] when absent or empty.
    pub fn security_js_code(&self) -> Result<&str, AmapError> {
        non_empty(&self.security_js_code, AMAP_SECURITY_JS_CODE_ENV)
    }
}

fn non_empty<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, AmapError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AmapError::MissingConfiguration(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_missing_values() {
        let config = AmapConfig {
            key: Some(String::new()),
            security_js_code: None,
        };
        assert_eq!(
            config.key(),
            Err(AmapError::MissingConfiguration(AMAP_KEY_ENV))
        );
        assert_eq!(
            config.security_js_code(),
            Err(AmapError::MissingConfiguration(AMAP_SECURITY_JS_CODE_ENV))
        );
    }

    #[test]
    fn read_values_from_env() {
        // SAFETY: the only test in this crate touching these variables.
        unsafe {
            std::env::set_var(AMAP_KEY_ENV, "env-key");
            std::env::set_var(AMAP_SECURITY_JS_CODE_ENV, "");
        }
        let config = AmapConfig::from_env();
        assert_eq!(config.key(), Ok("env-key"));
        assert_eq!(config.security_js_code.as_deref(), Some(""));
        assert_eq!(
            config.security_js_code(),
            Err(AmapError::MissingConfiguration(AMAP_SECURITY_JS_CODE_ENV))
        );

        unsafe {
            std::env::remove_var(AMAP_KEY_ENV);
            std::env::remove_var(AMAP_SECURITY_JS_CODE_ENV);
        }
        assert_eq!(AmapConfig::from_env(), AmapConfig::default());
    }

    #[test]
    fn return_configured_values() {
        let config = AmapConfig::new("key", "code");
        assert_eq!(config.key(), Ok("key"));
        assert_eq!(config.security_js_code(), Ok("code"));
    }
}
