// src/stats/recorder.rs
//! 统计记录器接口 - 定义统一统计API

use crate::{
    stats::operation::{AtomicOperationStats, OperationStatsSnapshot},
    types::OperationType,
};

/// 统计记录器特征
pub trait StatsRecorder: Send + Sync {
    /// 记录操作
    fn record(&self, op_type: OperationType, success: bool);

    /// 批量累加计数（探测步、踢出次数）
    fn record_many(&self, op_type: OperationType, n: u64);

    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置所有统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self, prefix: &str) -> String;
}

/// 默认统计记录器实现
#[derive(Debug, Default)]
pub struct AtomicStatsRecorder {
    operation: AtomicOperationStats,
}

impl AtomicStatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsRecorder for AtomicStatsRecorder {
    fn record(&self, op_type: OperationType, success: bool) {
        self.operation.record(op_type, success);
    }

    fn record_many(&self, op_type: OperationType, n: u64) {
        self.operation.record_many(op_type, n);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        self.operation.snapshot()
    }

    fn reset(&self) {
        self.operation.reset();
    }

    fn export_prometheus(&self, prefix: &str) -> String {
        self.operation.export_prometheus(prefix)
    }
}

/// 禁用统计实现
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStatsRecorder;

impl StatsRecorder for DisabledStatsRecorder {
    fn record(&self, _op_type: OperationType, _success: bool) {}
    fn record_many(&self, _op_type: OperationType, _n: u64) {}
    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot::default()
    }
    fn reset(&self) {}
    fn export_prometheus(&self, _prefix: &str) -> String {
        String::new()
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone)]
pub struct TableStats {
    pub len: usize,
    pub capacity: usize,
    pub load_factor: f32,
    /// 墓碑数量（Cuckoo表恒为0）
    pub tombstones: usize,
    pub operations: OperationStatsSnapshot,
}
