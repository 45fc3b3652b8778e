//! 核心类型定义 - 共享类型和接口

use std::fmt;

/// 键类型 - 普通整数
pub type Key = i64;

/// 线性探测槽位状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    /// 从未使用过的空槽位，终止探测
    #[default]
    Empty,
    /// 已占用槽位
    Occupied(Key),
    /// 已删除槽位（墓碑），不终止探测
    Deleted,
}

impl SlotState {
    /// 检查是否为空槽位
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 检查是否被占用
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// 检查是否被删除
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// 槽位是否可写入新键（空或墓碑）
    pub fn is_vacant(&self) -> bool {
        !self.is_occupied()
    }

    /// 占用键
    pub fn key(&self) -> Option<Key> {
        match self {
            Self::Occupied(key) => Some(*key),
            _ => None,
        }
    }

    /// 是否精确持有指定键
    pub fn holds(&self, key: Key) -> bool {
        matches!(self, Self::Occupied(k) if *k == key)
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Occupied(key) => write!(f, "Occupied({})", key),
            Self::Deleted => write!(f, "Deleted"),
        }
    }
}

/// 插入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// 新键已写入
    Inserted,
    /// 键已存在，未做修改
    AlreadyPresent,
}

impl InsertOutcome {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Cuckoo子表标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// 表A，由h1定位
    A,
    /// 表B，由h2定位
    B,
}

impl Side {
    /// 另一张子表
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入操作
    Insert,
    /// 查找操作
    Search,
    /// 删除操作
    Remove,
    /// 探测步（线性探测检查的槽位）
    Probe,
    /// 踢出操作
    Kick,
    /// 重哈希操作
    Rehash,
}

impl OperationType {
    /// 全部操作类型，按导出顺序
    pub const ALL: [OperationType; 6] = [
        OperationType::Insert,
        OperationType::Search,
        OperationType::Remove,
        OperationType::Probe,
        OperationType::Kick,
        OperationType::Rehash,
    ];

    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(self, OperationType::Search | OperationType::Probe)
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        !self.is_read()
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Search => "search",
            OperationType::Remove => "remove",
            OperationType::Probe => "probe",
            OperationType::Kick => "kick",
            OperationType::Rehash => "rehash",
        }
    }
}
