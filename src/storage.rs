//! 键值存储抽象
//!
//! 浏览器端由 LocalStorage / SessionStorage 实现，测试与原生环境使用 `MemoryStore`。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 同步键值存储
///
/// 与浏览器存储 API 的语义一致：读取失败视为不存在，写入失败返回 `false`。
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 内存实现，克隆后共享同一份数据
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}
