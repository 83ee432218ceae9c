//! 管理端页面
//!
//! 面板与审核页共用同一种 `ModerationController`，各自在挂载时拉取。

pub mod dashboard;
pub mod moderation;
pub mod resources;

use crate::api::use_app;
use crate::state::{SignalCell, Toaster};
use crate::web::{FetchClient, LocalStore};
use chicham::moderation::{ModerationController, ModerationState, ModerationStats};
use chicham_shared::{ContributionStatus, Timestamp};
use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) type Moderation =
    ModerationController<FetchClient, LocalStore, Toaster, SignalCell<ModerationState>>;

/// 创建控制器，挂载时加载，卸载时取消
pub(crate) fn use_moderation() -> (Moderation, SignalCell<ModerationState>) {
    let app = use_app();
    let state = SignalCell::new(ModerationState::default());
    let controller: Moderation = ModerationController::new(app.api.clone(), app.toaster, state);

    on_cleanup({
        let scope = controller.scope().clone();
        move || scope.cancel()
    });

    let loader = controller.clone();
    spawn_local(async move { loader.load().await });

    (controller, state)
}

/// 本地时区的日期时间
pub(crate) fn format_timestamp(ts: Timestamp) -> String {
    ts.to_utc()
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}

pub(crate) fn status_badge(status: ContributionStatus) -> (&'static str, &'static str) {
    match status {
        ContributionStatus::Pending => ("badge badge-warning", "Pendiente"),
        ContributionStatus::Approved => ("badge badge-success", "Aprobada"),
        ContributionStatus::Rejected => ("badge badge-error", "Rechazada"),
    }
}

fn trend_label(percentage: i64) -> String {
    if percentage >= 0 {
        format!("+{percentage}% respecto a ayer")
    } else {
        format!("{percentage}% respecto a ayer")
    }
}

/// 三张统计卡片
#[component]
pub(crate) fn StatsCards(#[prop(into)] stats: Signal<ModerationStats>) -> impl IntoView {
    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Pendientes"</div>
                <div class="stat-value text-warning">{move || stats.get().pending.count}</div>
                <div class="stat-desc">{move || format!("{} nuevas en 24 h", stats.get().pending.new)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Aprobadas hoy"</div>
                <div class="stat-value text-success">{move || stats.get().approved_today.count}</div>
                <div class="stat-desc">{move || trend_label(stats.get().approved_today.percentage)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Rechazadas"</div>
                <div class="stat-value text-error">{move || stats.get().rejected.count}</div>
                <div class="stat-desc">"Total histórico"</div>
            </div>
        </div>
    }
}
