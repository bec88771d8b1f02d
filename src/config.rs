use crate::common::Result;

fn default_retries() -> usize {
    2
}

/// Credentials and endpoint settings for the provider API. Key names follow
/// the provider's parameter names, lower case spellings are accepted for
/// environment overrides.
#[derive(Clone, serde::Deserialize)]
pub struct Config {
    #[serde(rename = "ApiUser", alias = "apiuser")]
    pub api_user: String,
    #[serde(rename = "UserName", alias = "username")]
    pub user_name: String,
    #[serde(rename = "ApiKey", alias = "apikey")]
    pub api_key: String,
    #[serde(rename = "ClientIP", alias = "clientip")]
    pub client_ip: String,

    #[serde(rename = "Sandbox", alias = "sandbox", default)]
    pub sandbox: bool,
    #[serde(rename = "ApiUrl", alias = "apiurl", default)]
    pub api_url: Option<url::Url>,
    #[serde(rename = "Retries", alias = "retries", default = "default_retries")]
    pub retries: usize,
}

impl Config {
    /// Reads the YAML config file, then applies `NAMECHEAP_*` environment
    /// variables on top.
    #[cfg(feature = "cli")]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let prefix = path.display().to_string();
        ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Yaml))
            .add_source(::config::Environment::with_prefix("NAMECHEAP"))
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|err| {
                crate::common::ConfigSnafu {
                    message: err.to_string(),
                    prefix,
                }
                .build()
            })
    }

    pub fn get_service(self) -> Result<crate::service::DNSSync> {
        let provider = crate::namecheap::Namecheap::try_from(self)?;
        Ok(crate::service::DNSSync::new(Box::new(provider)))
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_provider_style_keys() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            "ApiUser: apiuser\nUserName: username\nApiKey: secret\nClientIP: 192.0.2.1\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api_user, "apiuser");
        assert_eq!(config.user_name, "username");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.client_ip, "192.0.2.1");
        assert!(!config.sandbox);
        assert!(config.api_url.is_none());
        assert_eq!(config.retries, 2);
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "ApiUser: apiuser").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = Config::load(std::path::Path::new("/nonexistent/dns-config.yml"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("dns-config.yml"));
    }
}
