use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, error, info, trace, warn};

use super::models::{
    CREATED_AT_KEY, LinkRecord, Metadata, StoreLocation, StoredEntry, UPDATED_AT_KEY, UPDATED_KEY,
};
use crate::errors::Result;
use crate::utils::IdGenerator;

/// 数据文件的完整内容：短码 -> 记录
pub type LinkDocument = BTreeMap<String, StoredEntry>;

/// 无法识别的记录，原样保留并在写盘时写回
type RawEntries = BTreeMap<String, Value>;

/// 单文件短链接存储
///
/// 所有记录保存在内存中，每次修改后整体重写 JSON 文件。
/// 写盘失败只记录日志，内存中的修改不会回滚，下一次修改会重新尝试写盘。
pub struct LinkStore {
    location: StoreLocation,
    entries: LinkDocument,
    unrecognized: RawEntries,
    generator: Box<dyn IdGenerator>,
}

impl LinkStore {
    /// 创建存储并加载数据文件
    pub fn open(location: StoreLocation, generator: impl IdGenerator + 'static) -> Self {
        let mut store = Self::new(location, generator);
        store.load_db();
        store
    }

    /// 创建空存储（不读取数据文件）
    ///
    /// 如果配置了存储目录，会递归创建；失败只记录日志。
    pub fn new(location: StoreLocation, generator: impl IdGenerator + 'static) -> Self {
        if let Some(dir) = location.directory()
            && let Err(e) = fs::create_dir_all(&dir)
        {
            error!(
                path = %dir.display(),
                "Failed to create short URL directory: {}", e
            );
        }

        Self {
            location,
            entries: LinkDocument::new(),
            unrecognized: RawEntries::new(),
            generator: Box::new(generator),
        }
    }

    /// 纯内存存储
    pub fn in_memory(generator: impl IdGenerator + 'static) -> Self {
        Self::new(StoreLocation::Memory, generator)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// 从数据文件加载全部记录，替换内存中的状态
    ///
    /// - 文件不存在：内存状态保持不变
    /// - 文件为空或只有空白：清空
    /// - 读取或解析失败：记录错误并清空
    /// - 单条记录格式无法识别：跳过并原样保留，其余记录照常加载
    pub fn load_db(&mut self) {
        let Some(path) = self.location.file_path() else {
            trace!("No database file configured, running in-memory only");
            return;
        };

        match read_document(&path) {
            Ok(ReadOutcome::Loaded {
                entries,
                unrecognized,
            }) => {
                info!(
                    path = %path.display(),
                    entries = entries.len(),
                    unrecognized = unrecognized.len(),
                    "Short urls db loaded successfully"
                );
                self.entries = entries;
                self.unrecognized = unrecognized;
            }
            Ok(ReadOutcome::Empty) => {
                debug!(path = %path.display(), "Short urls db is empty");
                self.entries = LinkDocument::new();
                self.unrecognized = RawEntries::new();
            }
            Ok(ReadOutcome::Missing) => {
                debug!(path = %path.display(), "Short urls db not found, keeping current state");
            }
            Err(e) => {
                error!(path = %path.display(), "Failed to parse short urls db: {}", e);
                self.entries = LinkDocument::new();
                self.unrecognized = RawEntries::new();
            }
        }
    }

    /// 为长链接分配新短码并保存
    ///
    /// 不校验 `long_url`，调用方负责校验。
    /// 短码冲突时直接覆盖已有记录。
    pub fn shorten_url(&mut self, long_url: &str, metadata: Option<Metadata>) -> String {
        let id = self.generator.generate();

        let mut metadata = metadata.unwrap_or_default();
        metadata.insert(CREATED_AT_KEY.to_string(), Value::from(now_millis()));

        let replaced_raw = self.unrecognized.remove(&id).is_some();
        let replaced = self
            .entries
            .insert(
                id.clone(),
                StoredEntry::Full(LinkRecord::new(long_url, metadata)),
            )
            .is_some();
        if replaced || replaced_raw {
            warn!(id = %id, "Generated short code collided with an existing entry, overwritten");
        }
        debug!(id = %id, url = long_url, "Short url created");

        self.save();
        id
    }

    /// 解析短码对应的目标地址
    pub fn resolve_url(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(StoredEntry::url)
    }

    /// 获取短码对应的元数据，旧格式记录返回 `None`
    pub fn get_url_metadata(&self, id: &str) -> Option<&Metadata> {
        self.entries.get(id).and_then(StoredEntry::metadata)
    }

    /// 修改短码指向的地址
    ///
    /// 旧格式记录会被迁移为完整格式，并带上 `updated: true` 标记。
    /// 短码不存在时返回 `false`，不产生任何副作用。
    pub fn update_url(&mut self, id: &str, new_url: &str) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            debug!(id = %id, "Update skipped, short url not found");
            return false;
        };

        let now = Value::from(now_millis());
        let was_legacy = entry.is_legacy();
        match entry {
            StoredEntry::Legacy(_) => {
                let mut metadata = Metadata::new();
                metadata.insert(CREATED_AT_KEY.to_string(), now);
                metadata.insert(UPDATED_KEY.to_string(), Value::Bool(true));
                *entry = StoredEntry::Full(LinkRecord::new(new_url, metadata));
                info!(id = %id, "Migrated legacy short url entry");
            }
            StoredEntry::Full(record) => {
                record.url = new_url.to_string();
                record.metadata.insert(UPDATED_AT_KEY.to_string(), now);
            }
        }
        debug!(id = %id, url = new_url, migrated = was_legacy, "Short url updated");

        self.save();
        true
    }

    /// 将全部记录写入数据文件
    ///
    /// 失败只记录日志，存储继续在内存中工作。
    pub fn save(&self) {
        let Some(path) = self.location.file_path() else {
            return;
        };

        match write_document(&path, &self.entries, &self.unrecognized) {
            Ok(()) => trace!(path = %path.display(), entries = self.entries.len(), "Short urls db saved"),
            Err(e) => error!(
                path = %path.display(),
                "Failed to save short urls db, running in-memory only: {}", e
            ),
        }
    }

    /// 关闭存储，最后写盘一次
    pub fn close(self) {
        self.save();
        info!(entries = self.entries.len(), "Short urls db closed");
    }
}

impl std::fmt::Debug for LinkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkStore")
            .field("location", &self.location)
            .field("entries", &self.entries.len())
            .field("unrecognized", &self.unrecognized.len())
            .finish()
    }
}

enum ReadOutcome {
    Missing,
    Empty,
    Loaded {
        entries: LinkDocument,
        unrecognized: RawEntries,
    },
}

fn read_document(path: &Path) -> Result<ReadOutcome> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
        Err(e) => return Err(e.into()),
    };

    let content = content.trim();
    if content.is_empty() {
        return Ok(ReadOutcome::Empty);
    }

    // 顶层必须是对象；单条记录各自解析，一条坏记录不影响其余记录
    let raw: Map<String, Value> = serde_json::from_str(content)?;

    let mut entries = LinkDocument::new();
    let mut unrecognized = RawEntries::new();
    for (id, value) in raw {
        match serde_json::from_value::<StoredEntry>(value.clone()) {
            Ok(entry) => {
                entries.insert(id, entry);
            }
            Err(e) => {
                warn!(id = %id, "Unrecognized short url entry, kept as-is: {}", e);
                unrecognized.insert(id, value);
            }
        }
    }

    Ok(ReadOutcome::Loaded {
        entries,
        unrecognized,
    })
}

/// 先写临时文件再重命名，避免写到一半时崩溃留下损坏的数据文件
fn write_document(path: &Path, entries: &LinkDocument, unrecognized: &RawEntries) -> Result<()> {
    let mut document: Map<String, Value> = unrecognized.clone().into_iter().collect();
    for (id, entry) in entries {
        document.insert(id.clone(), serde_json::to_value(entry)?);
    }

    let json = serde_json::to_string_pretty(&document)?;
    let tmp_path = temp_path(path);

    fs::write(&tmp_path, json)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
