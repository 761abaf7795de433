use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 短链接附带的元数据（标题、缩略图、视频尺寸等任意标量）
pub type Metadata = Map<String, Value>;

/// 元数据中的创建时间字段（毫秒时间戳）
pub const CREATED_AT_KEY: &str = "createdAt";
/// 元数据中的更新时间字段（毫秒时间戳）
pub const UPDATED_AT_KEY: &str = "updatedAt";
/// 由旧格式迁移而来的标记字段
pub const UPDATED_KEY: &str = "updated";

/// 扁平格式中的创建时间字段
const FLAT_CREATED_KEY: &str = "created";

/// 数据文件中的一条记录
///
/// 旧版本只保存目标 URL 字符串；新版本保存 `{ url, metadata }`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredEntry {
    Legacy(String),
    Full(LinkRecord),
}

impl StoredEntry {
    pub fn url(&self) -> &str {
        match self {
            StoredEntry::Legacy(url) => url,
            StoredEntry::Full(record) => &record.url,
        }
    }

    /// 旧格式记录没有元数据
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            StoredEntry::Legacy(_) => None,
            StoredEntry::Full(record) => Some(&record.metadata),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredEntry::Legacy(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLinkRecord")]
pub struct LinkRecord {
    pub url: String,
    pub metadata: Metadata,
}

impl LinkRecord {
    pub fn new(url: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            url: url.into(),
            metadata,
        }
    }
}

/// 读取时兼容两种对象格式：
/// - 嵌套：`{ "url": ..., "metadata": { ... } }`
/// - 扁平：`{ "url": ..., "title": ..., "created": ... }`
#[derive(Deserialize)]
struct RawLinkRecord {
    url: String,
    #[serde(default)]
    metadata: Option<Metadata>,
    #[serde(flatten)]
    rest: Metadata,
}

impl From<RawLinkRecord> for LinkRecord {
    fn from(raw: RawLinkRecord) -> Self {
        let mut metadata = raw.metadata.unwrap_or_default();

        for (key, value) in raw.rest {
            let key = if key == FLAT_CREATED_KEY {
                CREATED_AT_KEY.to_string()
            } else {
                key
            };
            metadata.entry(key).or_insert(value);
        }

        LinkRecord {
            url: raw.url,
            metadata,
        }
    }
}

/// 数据文件位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// 不落盘，只在内存中运行
    Memory,
    /// 直接指定的文件路径
    File(PathBuf),
    /// 存储目录 + 固定文件名
    Directory { dir: PathBuf, file_name: String },
}

impl StoreLocation {
    pub fn file_path(&self) -> Option<PathBuf> {
        match self {
            StoreLocation::Memory => None,
            StoreLocation::File(path) => Some(path.clone()),
            StoreLocation::Directory { dir, file_name } => Some(dir.join(file_name)),
        }
    }

    /// 初始化时需要创建的目录
    pub fn directory(&self) -> Option<PathBuf> {
        match self {
            StoreLocation::Memory => None,
            StoreLocation::File(path) => path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from),
            StoreLocation::Directory { dir, .. } => Some(dir.clone()),
        }
    }
}
