//! 分页记忆
//!
//! 每个管理视图的页码与每页条数保存在会话存储中，键为
//! `<view>.page` 与 `<view>.rowsPerPage`。

use crate::storage::KeyValueStore;

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// 界面分页状态（页码从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl PageSettings {
    /// 线上页码从 1 开始
    pub const fn wire_page(&self) -> usize {
        self.page + 1
    }

    /// 总页数，至少为 1
    pub fn page_count(&self, total: u64) -> usize {
        let rows = self.rows_per_page.max(1) as u64;
        (total.div_ceil(rows) as usize).max(1)
    }
}

#[derive(Clone)]
pub struct PaginationMemory<S> {
    store: S,
    view: &'static str,
}

impl<S: KeyValueStore> PaginationMemory<S> {
    pub fn new(store: S, view: &'static str) -> Self {
        Self { store, view }
    }

    fn page_key(&self) -> String {
        format!("{}.page", self.view)
    }

    fn rows_key(&self) -> String {
        format!("{}.rowsPerPage", self.view)
    }

    /// 读取保存的分页状态；缺失或无法解析的值回退为默认值
    pub fn load(&self) -> PageSettings {
        let defaults = PageSettings::default();
        let page = self
            .store
            .get(&self.page_key())
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.page);
        let rows_per_page = self
            .store
            .get(&self.rows_key())
            .and_then(|v| v.parse().ok())
            .filter(|rows: &usize| *rows > 0)
            .unwrap_or(defaults.rows_per_page);
        PageSettings {
            page,
            rows_per_page,
        }
    }

    pub fn save(&self, settings: PageSettings) {
        let saved = self.store.set(&self.page_key(), &settings.page.to_string())
            & self
                .store
                .set(&self.rows_key(), &settings.rows_per_page.to_string());
        if !saved {
            tracing::warn!(view = self.view, "failed to persist pagination");
        }
    }
}
