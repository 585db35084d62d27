use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "claimshield.toml";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub reference: ReferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 参照数据文件位置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub rates_path: PathBuf,
    pub definitions_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            reference: ReferenceConfig {
                rates_path: PathBuf::from("database/cpt_medicare_rates.json"),
                definitions_path: PathBuf::from("database/cpt_codes.json"),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> 配置文件 (CLAIMSHIELD_CONFIG 或 claimshield.toml) -> 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var("CLAIMSHIELD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(Some(&path))
    }

    /// 配置文件可选；环境变量形如 CLAIMSHIELD__SERVER__PORT=9000
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default(
                "reference.rates_path",
                defaults.reference.rates_path.to_string_lossy().into_owned(),
            )?
            .set_default(
                "reference.definitions_path",
                defaults.reference.definitions_path.to_string_lossy().into_owned(),
            )?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix("CLAIMSHIELD").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
