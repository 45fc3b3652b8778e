//! 线性探测哈希表 - 开放寻址、墓碑惰性删除、超阈值重哈希

use crate::{
    config::LinearProbeConfig,
    error::TableError,
    hash::{CapacityPolicy, LinearProbeStrategy},
    map::HashTable,
    stats::{default_recorder, StatsRecorder, TableStats},
    types::{InsertOutcome, Key, OperationType, SlotState},
};
use std::{fmt, sync::Arc};

/// 探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// 键所在槽位
    Found(usize),
    /// 键不存在，可写入的槽位（优先第一个墓碑）
    Vacant(usize),
    /// 键不存在且整圈没有可写入槽位
    Full,
}

/// 线性探测哈希表
pub struct LinearProbeTable {
    slots: Vec<SlotState>,
    len: usize,
    tombstones: usize,
    strategy: LinearProbeStrategy,
    policy: Box<dyn CapacityPolicy>,
    config: LinearProbeConfig,
    stats_recorder: Arc<dyn StatsRecorder>,
}

impl LinearProbeTable {
    /// 创建哈希表，初始容量调整为合法容量（默认质数）
    pub fn new(initial_capacity: usize) -> Self {
        Self::build(LinearProbeConfig::with_capacity(initial_capacity), default_recorder())
    }

    pub fn with_config(config: LinearProbeConfig) -> Result<Self, TableError> {
        Self::with_config_and_recorder(config, default_recorder())
    }

    /// 使用外部统计记录器创建
    pub fn with_config_and_recorder(
        config: LinearProbeConfig,
        stats_recorder: Arc<dyn StatsRecorder>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::build(config, stats_recorder))
    }

    fn build(config: LinearProbeConfig, stats_recorder: Arc<dyn StatsRecorder>) -> Self {
        let policy = config.capacity_policy.policy();
        let capacity = policy.initial(config.initial_capacity);
        debug_assert!(policy.is_valid(capacity));
        Self {
            slots: vec![SlotState::Empty; capacity],
            len: 0,
            tombstones: 0,
            strategy: LinearProbeStrategy::new(capacity, config.algorithm),
            policy,
            config,
            stats_recorder,
        }
    }

    /// 插入键
    pub fn insert(&mut self, key: Key) -> bool {
        match self.try_insert(key) {
            Ok(_) => true,
            Err(e) => {
                log_error!("linear probe insert of {} failed: {}", key, e);
                false
            }
        }
    }

    /// 插入键，返回具体结果或错误
    pub fn try_insert(&mut self, key: Key) -> Result<InsertOutcome, TableError> {
        let mut probe = self.locate(key);
        if let Probe::Found(_) = probe {
            self.stats_recorder.record(OperationType::Insert, true);
            return Ok(InsertOutcome::AlreadyPresent);
        }

        if self.exceeds_threshold(self.len + 1) {
            if let Err(e) = self.grow() {
                self.stats_recorder.record(OperationType::Insert, false);
                return Err(e);
            }
            probe = self.locate(key);
        }

        match probe {
            Probe::Vacant(pos) => {
                debug_assert!(self.slots[pos].is_vacant());
                if self.slots[pos].is_deleted() {
                    self.tombstones -= 1;
                }
                self.slots[pos] = SlotState::Occupied(key);
                self.len += 1;
                self.stats_recorder.record(OperationType::Insert, true);
                Ok(InsertOutcome::Inserted)
            }
            // 重哈希后的新表中不会再遇到已存在的键
            Probe::Found(_) => Ok(InsertOutcome::AlreadyPresent),
            Probe::Full => {
                self.stats_recorder.record(OperationType::Insert, false);
                Err(TableError::TableFull {
                    capacity: self.capacity(),
                    size: self.len,
                    load_factor: self.load_factor(),
                })
            }
        }
    }

    /// 查找键
    pub fn search(&self, key: Key) -> bool {
        let found = matches!(self.locate(key), Probe::Found(_));
        self.stats_recorder.record(OperationType::Search, found);
        found
    }

    /// 删除键，槽位标记为墓碑
    pub fn remove(&mut self, key: Key) -> bool {
        match self.locate(key) {
            Probe::Found(pos) => {
                self.slots[pos] = SlotState::Deleted;
                self.len -= 1;
                self.tombstones += 1;
                self.stats_recorder.record(OperationType::Remove, true);
                true
            }
            _ => {
                self.stats_recorder.record(OperationType::Remove, false);
                false
            }
        }
    }

    /// 沿探测序列查找键；墓碑不终止探测，遇到空槽位或走完一整圈结束
    fn locate(&self, key: Key) -> Probe {
        let mut first_tombstone = None;
        let mut steps = 0u64;
        let mut result = None;

        for pos in self.strategy.probe_sequence(key) {
            steps += 1;
            match self.slots[pos] {
                SlotState::Occupied(k) if k == key => {
                    result = Some(Probe::Found(pos));
                    break;
                }
                SlotState::Empty => {
                    result = Some(Probe::Vacant(first_tombstone.unwrap_or(pos)));
                    break;
                }
                SlotState::Deleted => {
                    first_tombstone.get_or_insert(pos);
                }
                SlotState::Occupied(_) => {}
            }
        }

        self.stats_recorder.record_many(OperationType::Probe, steps);
        result.unwrap_or(match first_tombstone {
            Some(pos) => Probe::Vacant(pos),
            None => Probe::Full,
        })
    }

    fn exceeds_threshold(&self, len: usize) -> bool {
        len as f32 > self.config.max_load_factor * self.capacity() as f32
    }

    /// 扩容到策略给出的下一个合法容量
    fn grow(&mut self) -> Result<(), TableError> {
        let new_capacity = self.policy.grow(self.capacity())?;
        debug_assert!(self.policy.is_valid(new_capacity));
        self.rehash_to(new_capacity)
    }

    /// 在新存储中重新插入所有键，成功后整体替换旧存储
    fn rehash_to(&mut self, new_capacity: usize) -> Result<(), TableError> {
        log_info!(
            "linear probe rehash: {} -> {} slots ({} keys, {} tombstones dropped)",
            self.capacity(),
            new_capacity,
            self.len,
            self.tombstones
        );

        let mut strategy = self.strategy.clone();
        strategy.update_capacity(new_capacity);
        let mut slots = vec![SlotState::Empty; new_capacity];

        for key in self.keys() {
            let pos = strategy
                .probe_sequence(key)
                .find(|&pos| slots[pos].is_empty())
                .ok_or_else(|| TableError::TableFull {
                    capacity: new_capacity,
                    size: self.len,
                    load_factor: self.len as f32 / new_capacity as f32,
                })?;
            slots[pos] = SlotState::Occupied(key);
        }

        self.slots = slots;
        self.strategy = strategy;
        self.tombstones = 0;
        self.stats_recorder.record(OperationType::Rehash, true);
        log_debug!("linear probe rehash complete, load factor {:.3}", self.load_factor());
        Ok(())
    }

    /// 当前键数量
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 当前槽位数 m
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.capacity() as f32
    }

    /// 墓碑数量
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// 槽位视图
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    /// 遍历所有键（按槽位顺序）
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.slots.iter().filter_map(SlotState::key)
    }

    /// 清空所有键，保留当前容量
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = SlotState::Empty);
        self.len = 0;
        self.tombstones = 0;
    }

    pub fn config(&self) -> &LinearProbeConfig {
        &self.config
    }

    /// 获取统计信息
    pub fn stats(&self) -> TableStats {
        TableStats {
            len: self.len,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            tombstones: self.tombstones,
            operations: self.stats_recorder.snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats_recorder.export_prometheus("linear_probe")
    }
}

impl HashTable for LinearProbeTable {
    fn insert(&mut self, key: Key) -> bool {
        LinearProbeTable::insert(self, key)
    }

    fn search(&self, key: Key) -> bool {
        LinearProbeTable::search(self, key)
    }

    fn remove(&mut self, key: Key) -> bool {
        LinearProbeTable::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for LinearProbeTable {
    fn default() -> Self {
        Self::build(LinearProbeConfig::default(), default_recorder())
    }
}

impl Extend<Key> for LinearProbeTable {
    fn extend<T: IntoIterator<Item = Key>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for LinearProbeTable {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl fmt::Debug for LinearProbeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearProbeTable")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("tombstones", &self.tombstones)
            .field("load_factor", &self.load_factor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash::HashAlgorithm, stats::AtomicStatsRecorder};

    #[test]
    fn test_capacity_adjusted_to_prime() {
        assert_eq!(LinearProbeTable::new(10).capacity(), 11);
        assert_eq!(LinearProbeTable::new(11).capacity(), 11);
        assert_eq!(LinearProbeTable::new(0).capacity(), 2);
    }

    #[test]
    fn test_colliding_keys() {
        let mut table = LinearProbeTable::new(11);
        assert!(table.insert(10));
        assert!(table.insert(21));
        // 21 沿探测序列环绕到槽位0
        assert_eq!(table.slots()[10], SlotState::Occupied(10));
        assert_eq!(table.slots()[0], SlotState::Occupied(21));
        assert!(table.search(10));
        assert!(table.search(21));
        assert!(!table.search(99));
    }

    #[test]
    fn test_tombstone_keeps_probe_alive() {
        let mut table = LinearProbeTable::new(11);
        for key in [0, 11, 22] {
            assert!(table.insert(key));
        }
        assert!(table.remove(11));
        assert_eq!(table.slots()[1], SlotState::Deleted);
        assert_eq!(table.tombstones(), 1);
        assert!(table.search(22), "墓碑不能截断探测序列");
        assert!(!table.search(11));
    }

    #[test]
    fn test_insert_reuses_tombstone_without_duplicate() {
        let mut table = LinearProbeTable::new(11);
        for key in [0, 11, 22] {
            assert!(table.insert(key));
        }
        assert!(table.remove(11));
        // 22 仍在墓碑之后，重复插入不能写进墓碑
        assert_eq!(table.try_insert(22).unwrap(), InsertOutcome::AlreadyPresent);
        assert_eq!(table.keys().filter(|&k| k == 22).count(), 1);

        assert_eq!(table.try_insert(33).unwrap(), InsertOutcome::Inserted);
        assert_eq!(table.slots()[1], SlotState::Occupied(33));
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_idempotent_insert_keeps_len() {
        let mut table = LinearProbeTable::new(11);
        assert!(table.insert(42));
        assert!(table.insert(42));
        assert_eq!(table.len(), 1);
        assert!(table.remove(42));
        assert!(!table.search(42));
        assert!(!table.remove(42));
    }

    #[test]
    fn test_rehash_on_threshold() {
        let recorder = Arc::new(AtomicStatsRecorder::new());
        let mut table = LinearProbeTable::with_config_and_recorder(
            LinearProbeConfig::with_capacity(10),
            recorder.clone(),
        )
        .unwrap();

        for key in 0..7 {
            assert!(table.insert(key));
        }
        assert_eq!(table.capacity(), 11);
        assert_eq!(recorder.snapshot().rehash_count, 0);

        assert!(table.insert(7));
        assert_eq!(table.capacity(), 23);
        assert_eq!(recorder.snapshot().rehash_count, 1);
        assert!((0..8).all(|key| table.search(key)));
    }

    #[test]
    fn test_duplicate_at_threshold_does_not_grow() {
        let recorder = Arc::new(AtomicStatsRecorder::new());
        let mut table = LinearProbeTable::with_config_and_recorder(
            LinearProbeConfig::with_capacity(10),
            recorder.clone(),
        )
        .unwrap();

        // 7个键，下一个新键会触发扩容
        for key in 0..7 {
            assert!(table.insert(key));
        }
        assert_eq!(table.try_insert(6), Ok(InsertOutcome::AlreadyPresent));
        assert!(table.insert(6));
        assert_eq!(table.capacity(), 11);
        assert_eq!(table.len(), 7);
        assert_eq!(recorder.snapshot().rehash_count, 0);
    }

    #[test]
    fn test_rehash_drops_tombstones() {
        let mut table = LinearProbeTable::new(11);
        for key in 0..7 {
            table.insert(key);
        }
        table.remove(3);
        table.remove(4);
        assert_eq!(table.tombstones(), 2);
        for key in 100..103 {
            table.insert(key);
        }
        assert!(table.capacity() > 11);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_saturated_probe_terminates() {
        // 没有空槽位时整圈探测必须终止
        let config = LinearProbeConfig {
            initial_capacity: 5,
            max_load_factor: 0.99,
            ..LinearProbeConfig::default()
        };
        let mut table = LinearProbeTable::with_config(config).unwrap();
        for key in 0..4 {
            assert!(table.insert(key));
        }
        assert!(table.remove(0));
        assert!(table.insert(4));
        assert_eq!(table.capacity(), 5);
        assert!(table.slots().iter().all(|slot| !slot.is_empty()));

        assert!(!table.search(100));
        assert!(!table.search(0));
        assert!(table.search(4));
        assert!(!table.remove(9));
    }

    #[test]
    fn test_negative_keys() {
        let mut table = LinearProbeTable::new(11);
        assert!(table.insert(-1));
        assert!(table.insert(-12));
        assert!(table.search(-1));
        assert!(table.search(-12));
        assert!(!table.search(10));
    }

    #[test]
    fn test_mixed_algorithm() {
        let config = LinearProbeConfig {
            algorithm: HashAlgorithm::AHash,
            ..LinearProbeConfig::with_capacity(7)
        };
        let mut table = LinearProbeTable::with_config(config).unwrap();
        for key in 0..200 {
            assert!(table.insert(key * 7));
        }
        assert!((0..200).all(|key| table.search(key * 7)));
        assert!(!table.search(1));
    }

    #[test]
    fn test_clear_and_collect() {
        let mut table: LinearProbeTable = (0..20).collect();
        assert_eq!(table.len(), 20);
        let mut keys: Vec<Key> = table.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..20).collect::<Vec<_>>());

        let capacity = table.capacity();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert!(!table.search(5));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LinearProbeConfig {
            max_load_factor: 0.0,
            ..LinearProbeConfig::default()
        };
        assert!(LinearProbeTable::with_config(config).is_err());
    }

    #[test]
    fn test_stats_snapshot() {
        let mut table = LinearProbeTable::new(11);
        table.insert(1);
        table.search(1);
        table.search(2);
        table.remove(1);
        let stats = table.stats();
        assert_eq!(stats.len, 0);
        assert_eq!(stats.tombstones, 1);
        assert_eq!(stats.operations.insert_count, 1);
        assert_eq!(stats.operations.search_count, 2);
        assert_eq!(stats.operations.remove_count, 1);
        assert_eq!(stats.operations.miss_count, 1);
        assert!(stats.operations.probe_count >= 4);
        assert!(table.export_prometheus().contains("linear_probe_operation_search_count 2"));
    }
}
