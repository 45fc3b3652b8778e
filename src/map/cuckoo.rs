//! Cuckoo哈希表核心实现 - 两张子表、有界踢出链、失败或超阈值时重哈希

use crate::{
    config::CuckooConfig,
    error::TableError,
    hash::{CapacityPolicy, DoubleHashStrategy, HashAlgorithm},
    map::HashTable,
    stats::{default_recorder, StatsRecorder, TableStats},
    types::{InsertOutcome, Key, OperationType, Side},
};
use std::{fmt, sync::Arc};

/// 踢出轨迹的初始容量，多数踢出链只有一两步
const TRAIL_CAPACITY: usize = 16;

/// 两张子表及其哈希策略
#[derive(Clone)]
struct Nest {
    table_a: Vec<Option<Key>>,
    table_b: Vec<Option<Key>>,
    strategy: DoubleHashStrategy,
}

impl Nest {
    fn new(table_size: usize, algorithm: HashAlgorithm) -> Self {
        Self {
            table_a: vec![None; table_size],
            table_b: vec![None; table_size],
            strategy: DoubleHashStrategy::new(table_size, algorithm),
        }
    }

    fn table_size(&self) -> usize {
        self.table_a.len()
    }

    fn slot_mut(&mut self, side: Side, idx: usize) -> &mut Option<Key> {
        match side {
            Side::A => &mut self.table_a[idx],
            Side::B => &mut self.table_b[idx],
        }
    }

    /// 键所在的子表与位置
    fn find(&self, key: Key) -> Option<(Side, usize)> {
        let (h1, h2) = self.strategy.locate(key);
        if self.table_a[h1] == Some(key) {
            Some((Side::A, h1))
        } else if self.table_b[h2] == Some(key) {
            Some((Side::B, h2))
        } else {
            None
        }
    }

    /// 放置一个不存在的键，成功时返回踢出次数。
    ///
    /// 两个候选槽位都被占用时，从表A开始沿踢出链交替位移，最多 `limit` 步。
    /// 超过上限时按踢出轨迹逆序回滚，子表恢复到调用前的状态。
    fn place(&mut self, key: Key, limit: usize) -> Result<usize, TableError> {
        let (h1, h2) = self.strategy.locate(key);
        if self.table_a[h1].is_none() {
            self.table_a[h1] = Some(key);
            return Ok(0);
        }
        if self.table_b[h2].is_none() {
            self.table_b[h2] = Some(key);
            return Ok(0);
        }

        let mut trail: Vec<(Side, usize)> = Vec::with_capacity(limit.min(TRAIL_CAPACITY));
        let mut current = key;
        let mut side = Side::A;

        for _ in 0..limit {
            let idx = self.strategy.slot(side, current);
            let displaced = self.slot_mut(side, idx).replace(current);
            trail.push((side, idx));
            match displaced {
                None => return Ok(trail.len() - 1),
                Some(evicted) => {
                    current = evicted;
                    side = side.other();
                }
            }
        }

        // 逆序回滚：每个槽位换回原占用者，最终 current 回到 key
        for &(side, idx) in trail.iter().rev() {
            if let Some(placed) = self.slot_mut(side, idx).replace(current) {
                current = placed;
            }
        }
        debug_assert_eq!(current, key);

        Err(TableError::KickPathExceeded { depth: limit })
    }

    fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.table_a
            .iter()
            .chain(self.table_b.iter())
            .filter_map(|slot| *slot)
    }
}

/// Cuckoo哈希表
pub struct CuckooTable {
    nest: Nest,
    len: usize,
    policy: Box<dyn CapacityPolicy>,
    config: CuckooConfig,
    stats_recorder: Arc<dyn StatsRecorder>,
}

impl CuckooTable {
    /// 创建哈希表，initial_capacity 为单张子表大小
    pub fn new(initial_capacity: usize) -> Self {
        Self::build(CuckooConfig::with_capacity(initial_capacity), default_recorder())
    }

    pub fn with_config(config: CuckooConfig) -> Result<Self, TableError> {
        Self::with_config_and_recorder(config, default_recorder())
    }

    /// 使用外部统计记录器创建
    pub fn with_config_and_recorder(
        config: CuckooConfig,
        stats_recorder: Arc<dyn StatsRecorder>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::build(config, stats_recorder))
    }

    fn build(config: CuckooConfig, stats_recorder: Arc<dyn StatsRecorder>) -> Self {
        let policy = config.capacity_policy.policy();
        let table_size = policy.initial(config.initial_capacity);
        debug_assert!(policy.is_valid(table_size));
        Self {
            nest: Nest::new(table_size, config.algorithm),
            len: 0,
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
                log_error!("cuckoo insert of {} failed: {}", key, e);
                false
            }
        }
    }

    /// 插入键，返回具体结果或错误
    pub fn try_insert(&mut self, key: Key) -> Result<InsertOutcome, TableError> {
        if self.nest.find(key).is_some() {
            self.stats_recorder.record(OperationType::Insert, true);
            return Ok(InsertOutcome::AlreadyPresent);
        }

        let result = self.insert_absent(key);
        self.stats_recorder.record(OperationType::Insert, result.is_ok());
        result.map(|_| InsertOutcome::Inserted)
    }

    fn insert_absent(&mut self, key: Key) -> Result<(), TableError> {
        if self.exceeds_threshold(self.len + 1) {
            log_debug!("cuckoo load threshold reached at {} keys, growing", self.len);
            self.rehash(None)?;
        }

        match self.nest.place(key, self.kick_limit()) {
            Ok(kicks) => {
                self.stats_recorder.record_many(OperationType::Kick, kicks as u64);
            }
            Err(e) if e.needs_growth() => {
                log_warn!("cuckoo kick chain for {} gave up: {}", key, e);
                self.stats_recorder
                    .record_many(OperationType::Kick, self.kick_limit() as u64);
                // 重建时一并放入待插入的键
                self.rehash(Some(key))?;
            }
            Err(e) => return Err(e),
        }
        self.len += 1;
        Ok(())
    }

    /// 查找键：恰好检查两个槽位
    pub fn search(&self, key: Key) -> bool {
        let found = self.nest.find(key).is_some();
        self.stats_recorder.record(OperationType::Search, found);
        found
    }

    /// 删除键，槽位直接置空
    pub fn remove(&mut self, key: Key) -> bool {
        let removed = match self.nest.find(key) {
            Some((side, idx)) => {
                *self.nest.slot_mut(side, idx) = None;
                self.len -= 1;
                true
            }
            None => false,
        };
        self.stats_recorder.record(OperationType::Remove, removed);
        removed
    }

    fn exceeds_threshold(&self, len: usize) -> bool {
        len as f32 > self.config.max_load_factor * self.capacity() as f32
    }

    /// 扩容重建：所有现有键加上待插入键放进更大的新子表。
    ///
    /// 新子表中踢出失败时继续扩容，最多 `max_rehash_attempts` 次；
    /// 全部失败时当前存储保持不变。
    fn rehash(&mut self, pending: Option<Key>) -> Result<(), TableError> {
        let mut table_size = self.nest.table_size();

        for attempt in 1..=self.config.max_rehash_attempts {
            table_size = self.policy.grow(table_size)?;
            debug_assert!(self.policy.is_valid(table_size));
            log_info!(
                "cuckoo rehash attempt {}: {} -> {} slots per table ({} keys)",
                attempt,
                self.nest.table_size(),
                table_size,
                self.len + pending.iter().count()
            );

            let limit = self.config.kick_limit(table_size);
            let mut nest = Nest::new(table_size, self.config.algorithm);
            let mut kicks = 0usize;
            let placed_all = self
                .nest
                .keys()
                .chain(pending)
                .all(|key| match nest.place(key, limit) {
                    Ok(n) => {
                        kicks += n;
                        true
                    }
                    Err(_) => false,
                });

            self.stats_recorder.record_many(OperationType::Kick, kicks as u64);
            if placed_all {
                self.nest = nest;
                self.stats_recorder.record(OperationType::Rehash, true);
                return Ok(());
            }
            log_warn!("cuckoo rehash to {} slots per table hit the kick limit", table_size);
        }

        log_error!(
            "cuckoo rehash failed after {} attempts, keeping {} slots per table",
            self.config.max_rehash_attempts,
            self.nest.table_size()
        );
        Err(TableError::RehashFailed {
            attempts: self.config.max_rehash_attempts,
            capacity: table_size,
        })
    }

    /// 当前键数量
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 槽位总数 2m
    pub fn capacity(&self) -> usize {
        self.nest.table_size() * 2
    }

    /// 单张子表大小 m
    pub fn table_size(&self) -> usize {
        self.nest.table_size()
    }

    /// 当前子表大小下的踢出深度上限
    pub fn kick_limit(&self) -> usize {
        self.config.kick_limit(self.nest.table_size())
    }

    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.capacity() as f32
    }

    /// 键的位置：所在子表与下标
    pub fn position(&self, key: Key) -> Option<(Side, usize)> {
        self.nest.find(key)
    }

    /// 遍历所有键（先表A后表B）
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.nest.keys()
    }

    /// 清空所有键，保留当前容量
    pub fn clear(&mut self) {
        self.nest.table_a.iter_mut().for_each(|slot| *slot = None);
        self.nest.table_b.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    pub fn config(&self) -> &CuckooConfig {
        &self.config
    }

    /// 获取统计信息
    pub fn stats(&self) -> TableStats {
        TableStats {
            len: self.len,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            tombstones: 0,
            operations: self.stats_recorder.snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats_recorder.export_prometheus("cuckoo")
    }
}

impl HashTable for CuckooTable {
    fn insert(&mut self, key: Key) -> bool {
        CuckooTable::insert(self, key)
    }

    fn search(&self, key: Key) -> bool {
        CuckooTable::search(self, key)
    }

    fn remove(&mut self, key: Key) -> bool {
        CuckooTable::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        CuckooTable::capacity(self)
    }
}

impl Default for CuckooTable {
    fn default() -> Self {
        Self::build(CuckooConfig::default(), default_recorder())
    }
}

impl Extend<Key> for CuckooTable {
    fn extend<T: IntoIterator<Item = Key>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromIterator<Key> for CuckooTable {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl fmt::Debug for CuckooTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooTable")
            .field("len", &self.len)
            .field("table_size", &self.table_size())
            .field("load_factor", &self.load_factor())
            .finish()
    }
}
