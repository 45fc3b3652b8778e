//! 哈希表配置

use crate::{
    error::TableError,
    hash::{CapacityKind, HashAlgorithm},
};

/// 踢出深度下限，保证小表也能完成几次位移
pub const MIN_KICK_DEPTH: usize = 8;

/// 线性探测表配置
#[derive(Clone, Debug)]
pub struct LinearProbeConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f32,
    pub algorithm: HashAlgorithm,
    pub capacity_policy: CapacityKind,
}

impl Default for LinearProbeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 11,
            max_load_factor: 0.7,
            algorithm: HashAlgorithm::Modulo,
            capacity_policy: CapacityKind::Prime,
        }
    }
}

impl LinearProbeConfig {
    /// 指定初始容量的默认配置
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        validate_load_factor(self.max_load_factor)
    }
}

/// Cuckoo表配置
#[derive(Clone, Debug)]
pub struct CuckooConfig {
    /// 单张子表的初始大小
    pub initial_capacity: usize,
    /// 相对两张子表总槽位数的最大负载因子
    pub max_load_factor: f32,
    pub max_kick_depth: usize,
    pub max_rehash_attempts: usize,
    pub algorithm: HashAlgorithm,
    pub capacity_policy: CapacityKind,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 11,
            max_load_factor: 0.5,
            max_kick_depth: 500,
            max_rehash_attempts: 8,
            algorithm: HashAlgorithm::Modulo,
            capacity_policy: CapacityKind::Prime,
        }
    }
}

impl CuckooConfig {
    /// 指定初始容量的默认配置
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        validate_load_factor(self.max_load_factor)?;
        if self.max_kick_depth == 0 {
            return Err(TableError::InvalidConfig {
                reason: "max_kick_depth must be positive".to_string(),
            });
        }
        if self.max_rehash_attempts == 0 {
            return Err(TableError::InvalidConfig {
                reason: "max_rehash_attempts must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// 子表大小为 m 时的踢出深度上限：2m，夹在 [MIN_KICK_DEPTH, max_kick_depth] 之间
    pub fn kick_limit(&self, table_size: usize) -> usize {
        let upper = self.max_kick_depth.max(MIN_KICK_DEPTH);
        table_size.saturating_mul(2).clamp(MIN_KICK_DEPTH, upper)
    }
}

fn validate_load_factor(load_factor: f32) -> Result<(), TableError> {
    if load_factor > 0.0 && load_factor < 1.0 {
        Ok(())
    } else {
        Err(TableError::InvalidConfig {
            reason: format!("max_load_factor must be in (0, 1), got {}", load_factor),
        })
    }
}
