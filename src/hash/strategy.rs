//! 哈希策略模块 - 哈希算法选择与槽位归约

use crate::types::Key;
use ahash::RandomState;
use std::{
    hash::{BuildHasher, Hash, Hasher},
    sync::Arc,
};

/// 哈希算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// 直接取模：h1 = key mod m, h2 = (key / m) mod m
    #[default]
    Modulo,
    AHash,
    XxHash,
}

/// 哈希函数特征
pub trait HasherFunction: Send + Sync {
    fn hash_key(&self, key: Key) -> u64;
}

impl<T> HasherFunction for T
where
    T: Fn(Key) -> u64 + Send + Sync,
{
    fn hash_key(&self, key: Key) -> u64 {
        self(key)
    }
}

/// 构建带种子的混合哈希函数，取模算法不需要哈希函数
pub fn build_hasher_function(algorithm: HashAlgorithm, seed: usize) -> Option<Arc<dyn HasherFunction>> {
    match algorithm {
        HashAlgorithm::Modulo => None,
        HashAlgorithm::AHash => {
            let state = RandomState::with_seed(seed);
            Some(Arc::new(move |key: Key| {
                let mut hasher = state.build_hasher();
                key.hash(&mut hasher);
                hasher.finish()
            }))
        }
        HashAlgorithm::XxHash => {
            let seed = seed as u64;
            Some(Arc::new(move |key: Key| {
                let mut hasher = twox_hash::XxHash64::with_seed(seed);
                key.hash(&mut hasher);
                hasher.finish()
            }))
        }
    }
}

/// 非负取模，负数键也落在 0..capacity
pub fn modulo_slot(key: Key, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    key.rem_euclid(capacity as i64) as usize
}

/// 哈希值归约到槽位
pub fn reduce(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}
