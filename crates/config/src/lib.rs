//! hrm-config - 配置加载库
//!
//! 加载顺序: `default.toml` -> `{APP_ENV}.toml` -> `HRM_` 前缀环境变量

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 菜单树递归深度的硬上限
pub const MAX_TREE_DEPTH: usize = 1024;

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 输出 JSON 格式日志
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

/// 菜单树过滤配置
#[derive(Debug, Clone, Deserialize)]
pub struct TreeConfig {
    /// 递归深度上限，超过即视为畸形树
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    64
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// 会话令牌配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: Secret<String>,
    pub issuer: String,
    pub audience: String,
}

/// 路由权限规则
///
/// `permission` / `any_of` / `all_of` / `module` 至多设置一项，全部缺省表示公开路由
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteRule {
    pub key: String,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub any_of: Option<Vec<String>>,
    #[serde(default)]
    pub all_of: Option<Vec<String>>,
    #[serde(default)]
    pub module: Option<String>,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthzConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub session: Option<SessionConfig>,
    #[serde(default)]
    pub routes: Vec<RouteRule>,
}

fn default_app_name() -> String {
    "hrm-dashboard".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AuthzConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("HRM_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tree.max_depth == 0 || self.tree.max_depth > MAX_TREE_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "tree.max_depth must be between 1 and {}, got {}",
                MAX_TREE_DEPTH, self.tree.max_depth
            )));
        }
        Ok(())
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
