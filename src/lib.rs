//! 可扩容整数哈希表库
//!
//! 提供两种开放寻址的整数集合实现：
//!
//! - [`LinearProbeTable`]：线性探测 + 墓碑删除，负载超过阈值时扩容到下一个质数
//! - [`CuckooTable`]：双子表Cuckoo哈希，有界踢出链，失败或超阈值时重哈希
//!
//! ## 快速开始
//!
//! ```rust
//! use probe_tables::{CuckooTable, HashTable, LinearProbeTable};
//!
//! let mut linear = LinearProbeTable::new(10);
//! assert!(linear.insert(42));
//! assert!(linear.search(42));
//! assert!(linear.remove(42));
//! assert!(!linear.search(42));
//!
//! let mut cuckoo = CuckooTable::new(10);
//! cuckoo.extend([1, 6, 31]);
//! assert_eq!(cuckoo.len(), 3);
//! println!("{:?}", cuckoo.stats());
//!
//! fn fill(table: &mut dyn HashTable) {
//!     for key in 0..100 {
//!         table.insert(key);
//!     }
//! }
//! fill(&mut linear);
//! assert_eq!(linear.len(), 100);
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[doc(hidden)]
pub use log as __log;

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod config;
pub mod error;
pub mod hash;
pub mod map;
pub mod stats;
pub mod types;

// 公共接口导出
pub use crate::{
    config::{CuckooConfig, LinearProbeConfig, MIN_KICK_DEPTH},
    error::TableError,
    hash::{CapacityKind, CapacityPolicy, HashAlgorithm},
    map::{CuckooTable, HashTable, LinearProbeTable},
    stats::{
        AtomicStatsRecorder, DisabledStatsRecorder, OperationStatsSnapshot, StatsRecorder,
        TableStats,
    },
    types::{InsertOutcome, Key, OperationType, Side, SlotState},
};
