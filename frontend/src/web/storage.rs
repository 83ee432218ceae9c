//! 浏览器存储适配器
//!
//! 令牌与用户信息存放在 LocalStorage，分页记忆存放在 SessionStorage。
//! 值一律按原始字符串读写，不经过 gloo 的 JSON 编码。

use chicham::KeyValueStore;
use gloo_storage::{LocalStorage, SessionStorage, Storage};

fn get_raw(storage: web_sys::Storage, key: &str) -> Option<String> {
    storage.get_item(key).ok().flatten()
}

fn set_raw(storage: web_sys::Storage, key: &str, value: &str) -> bool {
    storage.set_item(key, value).is_ok()
}

fn delete_raw(storage: web_sys::Storage, key: &str) -> bool {
    storage.remove_item(key).is_ok()
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        get_raw(LocalStorage::raw(), key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        set_raw(LocalStorage::raw(), key, value)
    }

    fn delete(&self, key: &str) -> bool {
        delete_raw(LocalStorage::raw(), key)
    }
}

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        get_raw(SessionStorage::raw(), key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        set_raw(SessionStorage::raw(), key, value)
    }

    fn delete(&self, key: &str) -> bool {
        delete_raw(SessionStorage::raw(), key)
    }
}
