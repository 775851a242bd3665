use serde::{Deserialize, Serialize};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/payment_linker";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub linker: LinkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// 超过该耗时的语句以 warn 级别记录
    pub slow_statement_secs: u64,
}

/// 关联服务参数 (评分常量不可配置)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// 批量关联时的并发查询数
    pub batch_concurrency: usize,
    /// 单次查询超时
    pub query_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: 20,
                slow_statement_secs: 5,
            },
            linker: LinkerConfig {
                batch_concurrency: 4,
                query_timeout_secs: 30,
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> linker.toml (可选) -> LINKER_* 环境变量 -> DATABASE_URL
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.url", defaults.database.url)?
            .set_default("database.max_connections", i64::from(defaults.database.max_connections))?
            .set_default("database.slow_statement_secs", defaults.database.slow_statement_secs as i64)?
            .set_default("linker.batch_concurrency", defaults.linker.batch_concurrency as i64)?
            .set_default("linker.query_timeout_secs", defaults.linker.query_timeout_secs as i64)?
            .add_source(config::File::with_name("linker").required(false))
            .add_source(
                config::Environment::with_prefix("LINKER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        if config.linker.batch_concurrency == 0 {
            config.linker.batch_concurrency = 1;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.slow_statement_secs, 5);
        assert_eq!(config.linker.batch_concurrency, 4);
    }

    #[test]
    fn load_produces_usable_config() {
        let config = AppConfig::load().unwrap();
        assert!(config.linker.batch_concurrency >= 1);
        assert!(!config.database.url.is_empty());
        assert!(config.database.slow_statement_secs > 0);
    }
}
