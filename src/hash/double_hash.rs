//! 双哈希策略 - 使用两个独立哈希函数定位Cuckoo表的两个候选槽位

use crate::{
    hash::strategy::{build_hasher_function, modulo_slot, reduce, HashAlgorithm, HasherFunction},
    types::{Key, Side},
};
use std::sync::Arc;

const PRIMARY_SEED: usize = 42;
const SECONDARY_SEED: usize = 123;

/// 双哈希策略
#[derive(Clone)]
pub struct DoubleHashStrategy {
    primary_hasher: Option<Arc<dyn HasherFunction>>,
    secondary_hasher: Option<Arc<dyn HasherFunction>>,
    algorithm: HashAlgorithm,
    capacity: usize,
}

impl DoubleHashStrategy {
    /// 创建新双哈希策略，capacity 为单张子表大小
    pub fn new(capacity: usize, algorithm: HashAlgorithm) -> Self {
        // 使用不同种子创建两个哈希函数
        Self {
            primary_hasher: build_hasher_function(algorithm, PRIMARY_SEED),
            secondary_hasher: build_hasher_function(algorithm, SECONDARY_SEED),
            algorithm,
            capacity,
        }
    }

    /// h1：表A中的位置
    pub fn h1(&self, key: Key) -> usize {
        match &self.primary_hasher {
            None => modulo_slot(key, self.capacity),
            Some(hasher) => reduce(hasher.hash_key(key), self.capacity),
        }
    }

    /// h2：表B中的位置
    pub fn h2(&self, key: Key) -> usize {
        match &self.secondary_hasher {
            None => modulo_slot(key.div_euclid(self.capacity as i64), self.capacity),
            Some(hasher) => reduce(hasher.hash_key(key), self.capacity),
        }
    }

    /// 获取键的两个候选位置 (h1, h2)
    pub fn locate(&self, key: Key) -> (usize, usize) {
        (self.h1(key), self.h2(key))
    }

    /// 指定子表中的位置
    pub fn slot(&self, side: Side, key: Key) -> usize {
        match side {
            Side::A => self.h1(key),
            Side::B => self.h2(key),
        }
    }

    /// 更新容量
    pub fn update_capacity(&mut self, new_capacity: usize) {
        self.capacity = new_capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}
