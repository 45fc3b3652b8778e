//! 统计模块 - 统一管理哈希表操作指标

pub mod operation;
pub mod recorder;

use std::sync::Arc;

pub use operation::{AtomicOperationStats, OperationStatsSnapshot};
pub use recorder::{AtomicStatsRecorder, DisabledStatsRecorder, StatsRecorder, TableStats};

/// 默认记录器
pub fn default_recorder() -> Arc<dyn StatsRecorder> {
    Arc::new(AtomicStatsRecorder::new())
}
