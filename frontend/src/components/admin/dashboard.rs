use super::{StatsCards, format_timestamp, status_badge, use_moderation};
use crate::components::icons::RefreshCw;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 最近处理记录的条数
const RECENT_LIMIT: usize = 5;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (controller, state) = use_moderation();

    let stats = Signal::derive(move || state.with(|s| s.stats));
    let loading = move || state.with(|s| s.loading);

    let reload = move |_: leptos::ev::MouseEvent| {
        let controller = controller.clone();
        spawn_local(async move { controller.load().await });
    };

    view! {
        <StatsCards stats=stats />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Actividad reciente"</h3>
                        <p class="text-base-content/70 text-sm">"Últimas contribuciones revisadas."</p>
                    </div>
                    <div class="flex gap-2">
                        <Link to="/admin/contribuciones" class="btn btn-primary btn-sm">"Revisar pendientes"</Link>
                        <button on:click=reload disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Contribución"</th>
                                <th class="hidden md:table-cell">"Autor"</th>
                                <th>"Estado"</th>
                                <th class="hidden md:table-cell">"Fecha"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                state.with(|s| {
                                    let mut recent: Vec<_> = s.history.iter().collect();
                                    recent.sort_by_key(|c| std::cmp::Reverse(c.resolved_at.unwrap_or(c.created_at)));
                                    if recent.is_empty() {
                                        return view! {
                                            <tr>
                                                <td colspan="4" class="text-center py-8 text-base-content/50">
                                                    "Aún no se ha revisado ninguna contribución."
                                                </td>
                                            </tr>
                                        }
                                        .into_any();
                                    }
                                    recent
                                        .into_iter()
                                        .take(RECENT_LIMIT)
                                        .map(|item| {
                                            let (badge, label) = status_badge(item.status);
                                            let when = format_timestamp(item.resolved_at.unwrap_or(item.created_at));
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{item.data.primary_text().to_string()}</td>
                                                    <td class="hidden md:table-cell">{item.submitter_name().to_string()}</td>
                                                    <td><span class=badge>{label}</span></td>
                                                    <td class="hidden md:table-cell text-sm opacity-70">{when}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                        .into_any()
                                })
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
