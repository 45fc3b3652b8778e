//! 线性探测策略 - 主哈希定位后顺序环绕探测

use crate::{
    hash::strategy::{build_hasher_function, modulo_slot, reduce, HashAlgorithm, HasherFunction},
    types::Key,
};
use std::sync::Arc;

const LINEAR_SEED: usize = 42;

/// 线性探测策略
#[derive(Clone)]
pub struct LinearProbeStrategy {
    hasher: Option<Arc<dyn HasherFunction>>,
    algorithm: HashAlgorithm,
    capacity: usize,
}

impl LinearProbeStrategy {
    /// 创建新线性探测策略
    pub fn new(capacity: usize, algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: build_hasher_function(algorithm, LINEAR_SEED),
            algorithm,
            capacity,
        }
    }

    /// 主哈希位置 h(key)
    pub fn home(&self, key: Key) -> usize {
        match &self.hasher {
            None => modulo_slot(key, self.capacity),
            Some(hasher) => reduce(hasher.hash_key(key), self.capacity),
        }
    }

    /// 从 h(key) 开始的探测序列，最多 capacity 步
    pub fn probe_sequence(&self, key: Key) -> ProbeSequence {
        ProbeSequence {
            next: self.home(key),
            remaining: self.capacity,
            capacity: self.capacity,
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

/// 环绕探测序列：h, h+1, ... mod m，一整圈后结束
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    next: usize,
    remaining: usize,
    capacity: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.next;
        self.remaining -= 1;
        self.next = (self.next + 1) % self.capacity;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_probe_home() {
        let strategy = LinearProbeStrategy::new(11, HashAlgorithm::Modulo);
        assert_eq!(strategy.home(10), 10);
        assert_eq!(strategy.home(21), 10);
        assert_eq!(strategy.home(99), 0);
    }

    #[test]
    fn test_probe_sequence_wraps() {
        let strategy = LinearProbeStrategy::new(5, HashAlgorithm::Modulo);
        let seq: Vec<usize> = strategy.probe_sequence(3).collect();
        assert_eq!(seq, vec![3, 4, 0, 1, 2]);
    }

    #[test]
    fn test_probe_sequence_bounded() {
        let strategy = LinearProbeStrategy::new(7, HashAlgorithm::XxHash);
        assert_eq!(strategy.probe_sequence(12345).len(), 7);
    }

    #[test]
    fn test_capacity_update() {
        let mut strategy = LinearProbeStrategy::new(11, HashAlgorithm::AHash);
        strategy.update_capacity(23);
        assert_eq!(strategy.capacity(), 23);
        for key in 0..100 {
            assert!(strategy.home(key) < 23, "桶索引应在更新后的容量范围内");
        }
    }

    #[test]
    fn test_same_key_same_home() {
        let strategy = LinearProbeStrategy::new(101, HashAlgorithm::XxHash);
        assert_eq!(strategy.home(777), strategy.home(777));
        assert_eq!(strategy.algorithm(), HashAlgorithm::XxHash);
    }
}
