pub mod models;
pub mod store;

pub use models::{LinkRecord, Metadata, StoreLocation, StoredEntry};
pub use store::{LinkDocument, LinkStore};

use crate::config::StaticConfig;
use crate::utils::RandomIdGenerator;

pub struct StorageFactory;

impl StorageFactory {
    /// 根据全局配置打开存储
    pub fn create() -> LinkStore {
        Self::from_config(&crate::config::get_config())
    }

    /// 根据给定配置打开存储，并完成一次 `load_db`
    pub fn from_config(config: &StaticConfig) -> LinkStore {
        let location = config.storage.location();
        let generator = RandomIdGenerator::new(config.storage.id_length);
        LinkStore::open(location, generator)
    }
}
