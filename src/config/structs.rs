use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::Result;
use crate::storage::StoreLocation;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - storage: 短链接数据文件位置与短码长度
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：EL，分隔符：__
    /// 示例：EL__STORAGE__DIR=/data
    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File, FileFormat};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // 2. 从环境变量覆盖，前缀 EL，分隔符 __
            .add_source(
                Environment::with_prefix("EL")
                    .separator("__")
                    .try_parsing(true),
            );

        // 日志系统此时尚未初始化，只能写 stderr
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 存储配置
///
/// `file` 优先于 `dir`；两者都未设置时存储只在内存中运行。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

impl StorageConfig {
    /// 解析数据文件位置
    pub fn location(&self) -> StoreLocation {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|s| !s.trim().is_empty())
        }

        if let Some(file) = non_empty(&self.file) {
            return StoreLocation::File(PathBuf::from(file));
        }

        match non_empty(&self.dir) {
            Some(dir) => StoreLocation::Directory {
                dir: PathBuf::from(dir),
                file_name: self.file_name.clone(),
            },
            None => StoreLocation::Memory,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_file_name() -> String {
    "urls.json".to_string()
}

fn default_id_length() -> usize {
    crate::utils::DEFAULT_CODE_LENGTH
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file: None,
            file_name: default_file_name(),
            id_length: default_id_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
