//! Endpoint Configuration

/// Used when neither the runtime nor the build environment names a backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1.0";

/// Credits backend location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Read `CLOUDSHARE_API_URL` at runtime, then at build time
    ///
    /// Browser builds have no process environment, so the compile-time value
    /// is what they use.
    pub fn from_env() -> Self {
        std::env::var("CLOUDSHARE_API_URL")
            .ok()
            .or_else(|| option_env!("CLOUDSHARE_API_URL").map(String::from))
            .filter(|url| !url.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            get_credits: format!("{}/users/credits", self.base_url),
            add_credits: format!("{}/payments/add-credits", self.base_url),
            transactions: format!("{}/transactions", self.base_url),
        }
    }
}

/// Fully qualified endpoint URLs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub get_credits: String,
    pub add_credits: String,
    pub transactions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_base() {
        let endpoints = ApiConfig::new("https://api.example.com/api/v1.0/").endpoints();
        assert_eq!(endpoints.get_credits, "https://api.example.com/api/v1.0/users/credits");
        assert_eq!(
            endpoints.add_credits,
            "https://api.example.com/api/v1.0/payments/add-credits"
        );
        assert_eq!(endpoints.transactions, "https://api.example.com/api/v1.0/transactions");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(ApiConfig::default().base_url, DEFAULT_BASE_URL);
    }
}
