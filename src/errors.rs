use std::fmt;

#[derive(Debug, Clone)]
pub enum EmbedlinkerError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    NotFound(String),
}

impl EmbedlinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            EmbedlinkerError::Config(_) => "E001",
            EmbedlinkerError::FileOperation(_) => "E002",
            EmbedlinkerError::Serialization(_) => "E003",
            EmbedlinkerError::NotFound(_) => "E004",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            EmbedlinkerError::Config(_) => "Configuration Error",
            EmbedlinkerError::FileOperation(_) => "File Operation Error",
            EmbedlinkerError::Serialization(_) => "Serialization Error",
            EmbedlinkerError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            EmbedlinkerError::Config(msg) => msg,
            EmbedlinkerError::FileOperation(msg) => msg,
            EmbedlinkerError::Serialization(msg) => msg,
            EmbedlinkerError::NotFound(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EmbedlinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EmbedlinkerError {}

// 便捷的构造函数
impl EmbedlinkerError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        EmbedlinkerError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        EmbedlinkerError::FileOperation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        EmbedlinkerError::NotFound(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for EmbedlinkerError {
    fn from(err: std::io::Error) -> Self {
        EmbedlinkerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EmbedlinkerError {
    fn from(err: serde_json::Error) -> Self {
        EmbedlinkerError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for EmbedlinkerError {
    fn from(err: toml::ser::Error) -> Self {
        EmbedlinkerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EmbedlinkerError>;
