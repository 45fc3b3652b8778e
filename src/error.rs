//! 统一错误处理 - 哈希表可能出现的错误及恢复建议

/// 哈希表可能发生的错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("表已满，无法插入新键 (容量: {capacity}, 当前大小: {size}, 负载因子: {load_factor:.2})")]
    TableFull {
        capacity: usize,
        size: usize,
        load_factor: f32,
    },

    #[error("踢出路径超过最大深度限制 (深度: {depth})")]
    KickPathExceeded {
        depth: usize,
    },

    #[error("重哈希失败 (尝试次数: {attempts}, 最后容量: {capacity})")]
    RehashFailed {
        attempts: usize,
        capacity: usize,
    },

    #[error("容量溢出 (请求容量: {requested})")]
    CapacityOverflow {
        requested: usize,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl TableError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TableFull { .. } => Some("降低最大负载因子或增大初始容量"),
            Self::KickPathExceeded { .. } => Some("增加最大踢出深度或扩容表"),
            Self::RehashFailed { .. } => Some("增加重哈希尝试次数或改用混合哈希算法"),
            Self::CapacityOverflow { .. } => Some("键数量超出可寻址范围"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::CapacityOverflow { .. } | Self::InvalidConfig { .. }
        )
    }

    /// 是否应当通过扩容解决
    pub fn needs_growth(&self) -> bool {
        matches!(
            self,
            Self::TableFull { .. } | Self::KickPathExceeded { .. }
        )
    }
}
