//! 哈希表模块 - 线性探测表与Cuckoo表

pub mod cuckoo;
pub mod linear_probe;

pub use cuckoo::CuckooTable;
pub use linear_probe::LinearProbeTable;

use crate::types::Key;

/// 两种哈希表共同的整数集合接口
pub trait HashTable {
    /// 插入键；重复插入视为成功，返回false表示无法扩容
    fn insert(&mut self, key: Key) -> bool;

    /// 查找键
    fn search(&self, key: Key) -> bool;

    /// 删除键，键不存在时返回false
    fn remove(&mut self, key: Key) -> bool;

    /// 当前键数量
    fn len(&self) -> usize;

    /// 当前槽位总数
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 负载因子 = 键数量 / 槽位总数
    fn load_factor(&self) -> f32 {
        match self.capacity() {
            0 => 0.0,
            capacity => self.len() as f32 / capacity as f32,
        }
    }
}
