//! 审核队列控制器
//!
//! - `load()`：先拉取贡献列表，成功后再拉取历史记录；失败只记日志，不弹出通知
//! - 审核操作必须先经过确认框：`request_resolution()` → `confirm()`
//! - `resolve()` 成功后直接从内存列表移除该项，不重新拉取

use super::queue::{ModerationState, PendingAction, Resolution, TypeFilter};
use super::stats::compute_stats;
use crate::cancel::TaskScope;
use crate::client::ApiClient;
use crate::error::AppError;
use crate::notice::{Notice, Notifier};
use crate::request::HttpClient;
use crate::state::StateCell;
use crate::storage::KeyValueStore;
use chicham_shared::protocol::{ContributionHistoryRequest, IdTarget, ListContributionsRequest};
use chicham_shared::{Contribution, ContributionList, Timestamp};
use chrono::{DateTime, FixedOffset, Local};
use serde_json::Value;
use std::sync::Arc;

/// 时钟注入点
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().fixed_offset())
}

/// 记录被跳过的条目，返回可用的部分
fn accept_records(list: ContributionList, source: &'static str) -> Vec<Contribution> {
    for (id, error) in &list.skipped {
        tracing::warn!(source, id = %id, error = %error, "skipping undecodable contribution");
    }
    list.items
}

#[derive(Clone)]
pub struct ModerationController<H, S, N, C> {
    api: ApiClient<H, S>,
    notifier: N,
    state: C,
    clock: Clock,
    scope: TaskScope,
}

impl<H, S, N, C> ModerationController<H, S, N, C>
where
    H: HttpClient,
    S: KeyValueStore,
    N: Notifier,
    C: StateCell<ModerationState>,
{
    pub fn new(api: ApiClient<H, S>, notifier: N, state: C) -> Self {
        Self {
            api,
            notifier,
            state,
            clock: system_clock(),
            scope: TaskScope::new(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> ModerationState {
        self.state.read(Clone::clone)
    }

    pub fn scope(&self) -> &TaskScope {
        &self.scope
    }

    // =========================================================
    // 加载
    // =========================================================

    /// 拉取待审列表，成功后再拉取历史并计算统计
    ///
    /// 列表成功即写入队列；历史失败只记日志，历史保持为空。
    pub async fn load(&self) {
        self.state.write(|s| s.loading = true);

        let listed = self
            .scope
            .run(self.api.call(&ListContributionsRequest {}))
            .await
            .and_then(|inner| inner);
        let contributions = match listed {
            Ok(list) => accept_records(list, "queue"),
            Err(AppError::Cancelled) => return,
            Err(e) => {
                tracing::error!(error = %e, "failed to load moderation queue");
                self.state.write(|s| s.loading = false);
                return;
            }
        };

        let stats = compute_stats(&contributions, &[], &(self.clock)());
        self.state.write(|s| {
            s.contributions = contributions;
            s.history.clear();
            s.stats = stats;
        });

        let history = self
            .scope
            .run(self.api.call(&ContributionHistoryRequest {}))
            .await
            .and_then(|inner| inner);
        match history {
            Ok(history) => {
                let history = accept_records(history, "history");
                let now = (self.clock)();
                self.state.write(|s| {
                    s.stats = compute_stats(&s.contributions, &history, &now);
                    s.history = history;
                    s.loading = false;
                });
            }
            Err(AppError::Cancelled) => return,
            Err(e) => {
                tracing::error!(error = %e, "failed to load moderation history");
                self.state.write(|s| s.loading = false);
            }
        }

        let (pending, resolved) = self.state.read(|s| (s.contributions.len(), s.history.len()));
        tracing::debug!(pending, history = resolved, "moderation queue loaded");
    }

    // =========================================================
    // 本地筛选与选择
    // =========================================================

    pub fn set_search(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.write(|s| s.search = query);
    }

    pub fn set_type_filter(&self, filter: TypeFilter) {
        self.state.write(|s| s.type_filter = filter);
    }

    /// 选中详情面板中的贡献；`None` 取消选择
    pub fn select(&self, id: Option<String>) {
        self.state.write(|s| s.selected = id);
    }

    // =========================================================
    // 审核
    // =========================================================

    /// 打开确认框；该项不在队列中时不做任何事
    pub fn request_resolution(&self, id: &str, resolution: Resolution) -> bool {
        let mut opened = false;
        self.state.write(|s| {
            if let Some(item) = s.contributions.iter().find(|c| c.id == id) {
                s.pending_action = Some(PendingAction {
                    id: id.to_string(),
                    resolution,
                    dialog: resolution.dialog(item),
                });
                opened = true;
            }
        });
        opened
    }

    pub fn dismiss(&self) {
        self.state.write(|s| s.pending_action = None);
    }

    /// 执行确认框中的操作
    pub async fn confirm(&self) -> bool {
        let mut action = None;
        self.state.write(|s| action = s.pending_action.take());
        match action {
            Some(PendingAction { id, resolution, .. }) => self.resolve(&id, resolution).await,
            None => false,
        }
    }

    /// 调用审核接口；成功时从队列移除并记入历史
    pub async fn resolve(&self, id: &str, resolution: Resolution) -> bool {
        let _resolving = Resolving::mark(&self.state);
        let target = IdTarget { id: id.to_string() };
        let result = self
            .scope
            .run(
                self.api
                    .call_endpoint::<_, Value>(resolution.endpoint(), &target),
            )
            .await
            .and_then(|inner| inner);

        match result {
            Ok(_) => {
                tracing::info!(id, ?resolution, "contribution resolved");
                let now = (self.clock)();
                self.state.write(|s| {
                    if let Some(pos) = s.contributions.iter().position(|c| c.id == id) {
                        let mut item = s.contributions.remove(pos);
                        item.status = resolution.status();
                        item.resolved_at = Some(Timestamp::from_datetime(&now));
                        s.history.push(item);
                    }
                    if s.selected.as_deref() == Some(id) {
                        s.selected = None;
                    }
                    s.stats = compute_stats(&s.contributions, &s.history, &now);
                });
                self.notifier.notify(Notice::success(resolution.success_message()));
                true
            }
            Err(AppError::Cancelled) => false,
            Err(e) => {
                tracing::warn!(id, error = %e, "resolution failed");
                self.notifier.notify(Notice::error(e.user_message()));
                false
            }
        }
    }
}

/// `resolving` 标志，离开作用域时复位
struct Resolving<'a, C: StateCell<ModerationState>>(&'a C);

impl<'a, C: StateCell<ModerationState>> Resolving<'a, C> {
    fn mark(state: &'a C) -> Self {
        state.write(|s| s.resolving = true);
        Self(state)
    }
}

impl<C: StateCell<ModerationState>> Drop for Resolving<'_, C> {
    fn drop(&mut self) {
        self.0.write(|s| s.resolving = false);
    }
}

#[cfg(test)]
mod tests;
