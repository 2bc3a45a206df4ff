use std::{env, str::FromStr};

use crate::error::AppError;

mod defaults {
    pub const ALCHEMY_NETWORK: &str = "base-mainnet";
    pub const MAX_COUNT: &str = "1000";
    pub const MAX_PAGES: &str = "1";
    pub const MAX_RETRIES: &str = "5";
    pub const RPC_DELAY_MS: &str = "500";
    pub const DEDUPLICATE_TRANSFERS: &str = "false";
}

/// Transfer client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    /// Network label used in logs (never contains the API key)
    pub network: String,
    /// Records requested per page and direction
    pub max_count: u32,
    /// Pages followed per direction
    pub max_pages: u32,
    pub max_retries: u32,
    pub rpc_delay_ms: u64,
    pub deduplicate: bool,
}

impl ClientConfig {
    /// Load settings from the environment, reading `.env` if present
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network = lookup("ALCHEMY_NETWORK").unwrap_or_else(|| defaults::ALCHEMY_NETWORK.into());

        let rpc_url = match lookup("RPC_URL") {
            Some(url) => url,
            None => {
                let api_key = lookup("ALCHEMY_API_KEY")
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| AppError::MissingEnvVar("ALCHEMY_API_KEY".into()))?;
                format!("https://{network}.g.alchemy.com/v2/{api_key}")
            }
        };

        Ok(Self {
            rpc_url,
            network,
            max_count: parse_var(&lookup, "MAX_COUNT", defaults::MAX_COUNT)?,
            max_pages: parse_var(&lookup, "MAX_PAGES", defaults::MAX_PAGES)?,
            max_retries: parse_var(&lookup, "MAX_RETRIES", defaults::MAX_RETRIES)?,
            rpc_delay_ms: parse_var(&lookup, "RPC_DELAY_MS", defaults::RPC_DELAY_MS)?,
            deduplicate: parse_var(
                &lookup,
                "DEDUPLICATE_TRANSFERS",
                defaults::DEDUPLICATE_TRANSFERS,
            )?,
        })
    }

    /// `maxCount` request parameter, hex encoded
    pub fn max_count_hex(&self) -> String {
        format!("{:#x}", self.max_count)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: &str) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());

    value.parse::<T>().map_err(|_| AppError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("ALCHEMY_API_KEY", "key")])).unwrap();

        assert_eq!(config.rpc_url, "https://base-mainnet.g.alchemy.com/v2/key");
        assert_eq!(config.network, "base-mainnet");
        assert_eq!(config.max_count, 1000);
        assert_eq!(config.max_count_hex(), "0x3e8");
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.rpc_delay_ms, 500);
        assert!(!config.deduplicate);
    }

    #[test]
    fn test_missing_api_key() {
        let result = ClientConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(AppError::MissingEnvVar(name)) if name == "ALCHEMY_API_KEY"));

        let result = ClientConfig::from_lookup(lookup(&[("ALCHEMY_API_KEY", "")]));
        assert!(matches!(result, Err(AppError::MissingEnvVar(_))));
    }

    #[test]
    fn test_rpc_url_override() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("RPC_URL", "http://localhost:8545"),
            ("MAX_PAGES", "3"),
            ("DEDUPLICATE_TRANSFERS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.max_pages, 3);
        assert!(config.deduplicate);
    }

    #[test]
    fn test_invalid_number() {
        let result = ClientConfig::from_lookup(lookup(&[
            ("ALCHEMY_API_KEY", "key"),
            ("MAX_RETRIES", "lots"),
        ]));

        assert!(matches!(result, Err(AppError::InvalidEnvVar { name, .. }) if name == "MAX_RETRIES"));
    }
}
