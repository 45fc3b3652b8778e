//! 哈希模块 - 统一管理哈希函数与容量策略

pub mod capacity;
pub mod double_hash;
pub mod linear_probe;
pub mod strategy;

pub use capacity::{is_prime, next_prime, CapacityKind, CapacityPolicy, DoublingCapacity, PrimeCapacity};
pub use double_hash::DoubleHashStrategy;
pub use linear_probe::{LinearProbeStrategy, ProbeSequence};
pub use strategy::{HashAlgorithm, HasherFunction};
