//! 通用 CRUD 控制器
//!
//! 任何增删改成功后都会按当前页重新拉取列表，不做本地修补；
//! 删除也不做乐观移除。

use super::{CrudOp, CrudResource, PageSettings};
use crate::cancel::TaskScope;
use crate::client::ApiClient;
use crate::error::{AppError, AppResult};
use crate::notice::{Notice, Notifier};
use crate::request::HttpClient;
use crate::state::StateCell;
use crate::storage::KeyValueStore;
use chicham_shared::protocol::{IdTarget, ListPayload, PageQuery};
use serde_json::Value;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    /// 从 0 开始
    pub page: usize,
    pub limit: usize,
    pub total: u64,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        let settings = PageSettings::default();
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            page: settings.page,
            limit: settings.rows_per_page,
            total: 0,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn settings(&self) -> PageSettings {
        PageSettings {
            page: self.page,
            rows_per_page: self.limit,
        }
    }
}

pub struct ResourceController<T, H, S, N, C> {
    api: ApiClient<H, S>,
    notifier: N,
    state: C,
    scope: TaskScope,
    _resource: PhantomData<fn() -> T>,
}

impl<T, H: Clone, S: Clone, N: Clone, C: Clone> Clone for ResourceController<T, H, S, N, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: self.notifier.clone(),
            state: self.state.clone(),
            scope: self.scope.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T, H, S, N, C> ResourceController<T, H, S, N, C>
where
    T: CrudResource,
    H: HttpClient,
    S: KeyValueStore,
    N: Notifier,
    C: StateCell<ResourceState<T>>,
{
    pub fn new(api: ApiClient<H, S>, notifier: N, state: C) -> Self {
        Self {
            api,
            notifier,
            state,
            scope: TaskScope::new(),
            _resource: PhantomData,
        }
    }

    pub fn state(&self) -> ResourceState<T> {
        self.state.read(Clone::clone)
    }

    pub fn scope(&self) -> &TaskScope {
        &self.scope
    }

    /// 拉取一页（`page` 从 0 开始）
    pub async fn fetch_all(&self, page: usize, limit: usize) {
        self.state.write(|s| {
            s.loading = true;
            s.page = page;
            s.limit = limit;
        });

        let settings = PageSettings {
            page,
            rows_per_page: limit,
        };
        let query = PageQuery {
            page: settings.wire_page() as u32,
            limit: settings.rows_per_page as u32,
        };
        let result = self
            .scope
            .run(
                self.api
                    .call_endpoint::<_, ListPayload<T>>(&T::endpoint(CrudOp::List), &query),
            )
            .await
            .and_then(|inner| inner);

        match result {
            Ok(payload) => {
                let (items, total) = payload.into_parts();
                tracing::debug!(resource = T::BASE, count = items.len(), total, "page loaded");
                self.state.write(|s| {
                    s.items = items;
                    s.total = total;
                    s.error = None;
                    s.loading = false;
                });
            }
            Err(AppError::Cancelled) => {}
            Err(e) => {
                tracing::warn!(resource = T::BASE, error = %e, "failed to load page");
                self.state.write(|s| {
                    s.error = Some(e.user_message());
                    s.loading = false;
                });
            }
        }
    }

    /// 按当前页重新拉取
    pub async fn reload(&self) {
        let (page, limit) = self.state.read(|s| (s.page, s.limit));
        self.fetch_all(page, limit).await;
    }

    pub async fn fetch_by_id(&self, id: &str) -> AppResult<T> {
        let target = IdTarget { id: id.to_string() };
        self.scope
            .run(self.api.call_endpoint(&T::endpoint(CrudOp::Get), &target))
            .await?
    }

    pub async fn create(&self, item: &T) -> bool {
        self.mutate(CrudOp::Create, item, "Registro creado correctamente")
            .await
    }

    pub async fn update(&self, item: &T) -> bool {
        if item.id().is_empty() {
            tracing::warn!(resource = T::BASE, "update without id");
            self.notifier
                .notify(Notice::error("No se puede actualizar un registro sin id"));
            return false;
        }
        self.mutate(CrudOp::Update, item, "Registro actualizado correctamente")
            .await
    }

    pub async fn delete(&self, id: &str) -> bool {
        let target = IdTarget { id: id.to_string() };
        self.send(CrudOp::Delete, &target, "Registro eliminado correctamente")
            .await
    }

    async fn mutate(&self, op: CrudOp, item: &T, success: &str) -> bool {
        if let Err(errors) = item.validate() {
            tracing::debug!(resource = T::BASE, missing = errors.len(), "validation failed");
            self.notifier
                .notify(Notice::warning(AppError::Validation(errors).user_message()));
            return false;
        }
        self.send(op, item, success).await
    }

    async fn send<B: serde::Serialize>(&self, op: CrudOp, body: &B, success: &str) -> bool {
        let result = self
            .scope
            .run(
                self.api
                    .call_endpoint::<_, Value>(&T::endpoint(op), body),
            )
            .await
            .and_then(|inner| inner);

        match result {
            Ok(_) => {
                tracing::info!(resource = T::BASE, op = op.as_str(), "mutation applied");
                self.notifier.notify(Notice::success(success));
                self.reload().await;
                true
            }
            Err(AppError::Cancelled) => false,
            Err(e) => {
                tracing::warn!(resource = T::BASE, op = op.as_str(), error = %e, "mutation failed");
                self.notifier.notify(Notice::error(e.user_message()));
                false
            }
        }
    }
}
