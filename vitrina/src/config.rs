use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 全局配置实例
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Vitrina 配置结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 商品目录配置
    pub catalog: CatalogConfig,
    /// 页面交互配置
    pub ui: UiConfig,
    /// 预览服务器配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 商品目录配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// 依次尝试的目录文件路径
    pub candidates: Vec<String>,
    /// 推荐网格最多显示的商品数
    pub max_recommended: usize,
    /// 启动时是否加载分类
    pub load_categories: bool,
    /// 分类文件路径
    pub categories_path: String,
}

/// 页面交互配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// 触屏设备上点击展开下拉菜单的最大视口宽度（像素）
    pub mobile_breakpoint: u32,
    /// “已加入”按钮状态持续时间（毫秒）
    pub added_feedback_ms: u64,
    /// 价格前缀
    pub currency_prefix: String,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// HTTP 服务端口
    pub port: u16,
    /// 绑定地址
    pub bind_address: String,
    /// 静态站点目录
    pub static_dir: PathBuf,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志文件路径
    pub log_path: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                "data/products.json".to_string(),
                "./data/products.json".to_string(),
                "../data/products.json".to_string(),
                "/data/products.json".to_string(),
            ],
            max_recommended: 5,
            load_categories: false,
            categories_path: "data/categories.json".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768,
            added_feedback_ms: 2000,
            currency_prefix: "US$".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
            static_dir: PathBuf::from("./site"),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./logs"),
            file_prefix: "vitrina".to_string(),
            console_output: true,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// 从 TOML 文本解析配置
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // 确保目录存在
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.candidates.is_empty() {
            return Err(ConfigError::Validation("候选路径不能为空".to_string()));
        }
        if self.catalog.candidates.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation("候选路径不能包含空字符串".to_string()));
        }
        if self.catalog.max_recommended == 0 {
            return Err(ConfigError::Validation("推荐商品数必须大于0".to_string()));
        }

        if self.ui.mobile_breakpoint == 0 {
            return Err(ConfigError::Validation("移动端断点必须大于0".to_string()));
        }

        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 初始化全局配置
pub fn init_config() -> Result<&'static Config, ConfigError> {
    let config = load_config()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::Validation("配置已经初始化".to_string()))?;

    Ok(get_config())
}

/// 从文件或默认值加载配置
pub fn load_config() -> Result<Config, ConfigError> {
    let config_paths = ["config.toml", "./config/config.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            tracing::info!("从配置文件加载: {}", path);
            return Config::load_from_file(path);
        }
    }

    tracing::info!("未找到配置文件，使用默认配置");
    Ok(Config::default())
}

/// 获取全局配置实例，未初始化时返回默认配置
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.candidates[0], "data/products.json");
        assert_eq!(config.catalog.max_recommended, 5);
        assert_eq!(config.ui.mobile_breakpoint, 768);
        assert_eq!(config.ui.added_feedback_ms, 2000);
        assert_eq!(config.http.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.catalog.candidates.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [catalog]
            candidates = ["catalogo.json"]

            [http]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.candidates, vec!["catalogo.json".to_string()]);
        assert_eq!(config.catalog.max_recommended, 5);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.ui.currency_prefix, "US$");
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config/test_config.toml");

        let config = Config::default();
        config.save_to_file(&config_path).unwrap();

        let loaded_config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config, loaded_config);
    }
}
