use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BankConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub api_token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_seed_count")]
    pub count: u32,
    #[serde(default = "default_seed_balance")]
    pub starting_balance: f64,
}

fn default_seed_count() -> u32 {
    1000
}

fn default_seed_balance() -> f64 {
    1000.0
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: default_seed_count(),
            starting_balance: default_seed_balance(),
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 8000,
                log_level: "info".to_string(),
            },
            auth: AuthConfig {
                api_token: "change-me".to_string(),
            },
            seed: SeedConfig::default(),
        }
    }
}

impl BankConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => {
                        println!("Config loaded from {}", path);
                        c
                    }
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using Defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_defaults_match_reference_dataset() {
        let config = BankConfig::default();
        assert_eq!(config.seed.count, 1000);
        assert_eq!(config.seed.starting_balance, 1000.0);
    }

    #[test]
    fn test_partial_toml_fills_seed_defaults() {
        let parsed: BankConfig = toml::from_str(
            r#"
            [server]
            port = 9100
            log_level = "debug"

            [auth]
            api_token = "t0ken"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 9100);
        assert_eq!(parsed.seed.count, 1000);
        assert_eq!(parsed.seed.starting_balance, 1000.0);
    }
}
