//! 容量策略 - 决定初始容量与扩容后的新容量

use crate::error::TableError;

/// 容量策略特征
pub trait CapacityPolicy: Send + Sync {
    /// 将请求的初始容量调整为合法容量
    fn initial(&self, requested: usize) -> usize;

    /// 计算扩容后的合法容量（严格大于当前容量）
    fn grow(&self, current: usize) -> Result<usize, TableError>;

    /// 判断容量是否合法
    fn is_valid(&self, capacity: usize) -> bool;
}

/// 容量策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    /// 质数容量，扩容到不小于两倍的下一个质数
    Prime,
    /// 任意正整数容量，扩容时翻倍
    Doubling,
}

impl CapacityKind {
    /// 创建对应策略
    pub fn policy(self) -> Box<dyn CapacityPolicy> {
        match self {
            CapacityKind::Prime => Box::new(PrimeCapacity),
            CapacityKind::Doubling => Box::new(DoublingCapacity),
        }
    }
}

/// 质数容量策略
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeCapacity;

impl CapacityPolicy for PrimeCapacity {
    fn initial(&self, requested: usize) -> usize {
        // 找不到更大的质数时保留请求值
        next_prime(requested.max(2)).unwrap_or(requested)
    }

    fn grow(&self, current: usize) -> Result<usize, TableError> {
        let doubled = current
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow { requested: current })?;
        next_prime(doubled).ok_or(TableError::CapacityOverflow { requested: doubled })
    }

    fn is_valid(&self, capacity: usize) -> bool {
        is_prime(capacity)
    }
}

/// 翻倍容量策略
#[derive(Debug, Clone, Copy, Default)]
pub struct DoublingCapacity;

impl CapacityPolicy for DoublingCapacity {
    fn initial(&self, requested: usize) -> usize {
        requested.max(1)
    }

    fn grow(&self, current: usize) -> Result<usize, TableError> {
        current
            .max(1)
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow { requested: current })
    }

    fn is_valid(&self, capacity: usize) -> bool {
        capacity > 0
    }
}

/// 质数判定（6k±1 试除）
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    while let Some(sq) = i.checked_mul(i) {
        if sq > n {
            break;
        }
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// 不小于n的最小质数，溢出时返回None
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    loop {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_add(1)?;
    }
}
