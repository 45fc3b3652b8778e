// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表操作计数

use crate::types::OperationType;
use std::sync::atomic::{AtomicU64, Ordering};

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub search_count: u64,
    pub remove_count: u64,
    pub probe_count: u64,
    pub kick_count: u64,
    pub rehash_count: u64,
    /// 失败操作数（未找到、插入失败）
    pub miss_count: u64,
}

impl OperationStatsSnapshot {
    /// 指定操作的计数
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Insert => self.insert_count,
            OperationType::Search => self.search_count,
            OperationType::Remove => self.remove_count,
            OperationType::Probe => self.probe_count,
            OperationType::Kick => self.kick_count,
            OperationType::Rehash => self.rehash_count,
        }
    }

    /// 每次查找平均探测槽位数
    pub fn average_probe_length(&self) -> f64 {
        let lookups = self.insert_count + self.search_count + self.remove_count;
        if lookups == 0 {
            0.0
        } else {
            self.probe_count as f64 / lookups as f64
        }
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    search_count: AtomicU64,
    remove_count: AtomicU64,
    probe_count: AtomicU64,
    kick_count: AtomicU64,
    rehash_count: AtomicU64,
    miss_count: AtomicU64,
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Search => &self.search_count,
            OperationType::Remove => &self.remove_count,
            OperationType::Probe => &self.probe_count,
            OperationType::Kick => &self.kick_count,
            OperationType::Rehash => &self.rehash_count,
        }
    }

    /// 记录操作
    pub fn record(&self, op_type: OperationType, success: bool) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        if !success {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 批量累加计数
    pub fn record_many(&self, op_type: OperationType, n: u64) {
        if n > 0 {
            self.counter(op_type).fetch_add(n, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            search_count: self.search_count.load(Ordering::Relaxed),
            remove_count: self.remove_count.load(Ordering::Relaxed),
            probe_count: self.probe_count.load(Ordering::Relaxed),
            kick_count: self.kick_count.load(Ordering::Relaxed),
            rehash_count: self.rehash_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for op in OperationType::ALL {
            self.counter(op).store(0, Ordering::Relaxed);
        }
        self.miss_count.store(0, Ordering::Relaxed);
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self, prefix: &str) -> String {
        let mut output = String::new();

        for op in OperationType::ALL {
            let count = self.counter(op).load(Ordering::Relaxed);
            output.push_str(&format!(
                "# HELP {prefix}_operation_{op}_count Total {op} operations\n",
                prefix = prefix,
                op = op.as_str()
            ));
            output.push_str(&format!(
                "# TYPE {}_operation_{}_count counter\n",
                prefix,
                op.as_str()
            ));
            output.push_str(&format!(
                "{}_operation_{}_count {}\n",
                prefix,
                op.as_str(),
                count
            ));
        }

        output.push_str(&format!(
            "# HELP {}_operation_miss_count Total failed lookups and inserts\n",
            prefix
        ));
        output.push_str(&format!("# TYPE {}_operation_miss_count counter\n", prefix));
        output.push_str(&format!(
            "{}_operation_miss_count {}\n",
            prefix,
            self.miss_count.load(Ordering::Relaxed)
        ));

        output
    }
}
