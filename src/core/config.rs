use std::path::PathBuf;
use crate::compression::compress::CompressionType;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_path: PathBuf,
    pub cache_size_bytes: usize,

    // Record ids are minted from 1 up to and including this ceiling
    pub max_records: u32,

    // Codec
    pub codec_pool_size: usize,
    pub max_record_size: u64,
    pub compression: CompressionType,
}

impl Config {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Config {
            storage_path: path.into(),
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from("./data/otra.db"),
            cache_size_bytes: 64 * 1024 * 1024,     // 64MB redb page cache
            max_records: u32::MAX,
            codec_pool_size: 16,
            max_record_size: 16 * 1024 * 1024,      // 16MB per encoded record
            compression: CompressionType::Lz4,
        }
    }
}
