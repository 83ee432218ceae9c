//! 学生端页面：欢迎页与只读的内容目录
use crate::api::use_app;
use crate::components::pager::Pager;
use crate::session::use_session;
use crate::state::{SignalCell, Toaster};
use crate::web::router::Link;
use crate::web::{FetchClient, LocalStore};
use chicham::policy::{self, Role};
use chicham::resource::{CrudResource, PageSettings, ResourceController, ResourceState};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn StudentHome() -> impl IntoView {
    let session = use_session();
    let first_name = move || {
        session
            .state()
            .user
            .map(|u| u.first_name)
            .unwrap_or_default()
    };
    // 除“Inicio”本身之外的入口
    let shortcuts = policy::policy(Role::Student)
        .menu_items
        .iter()
        .skip(1)
        .map(|item| {
            view! {
                <Link to=item.path class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                    <div class="card-body">
                        <h3 class="card-title">{item.label}</h3>
                    </div>
                </Link>
            }
        })
        .collect_view();

    view! {
        <div class="space-y-6">
            <div>
                <h2 class="text-3xl font-bold">{move || format!("¡Pujamek, {}!", first_name())}</h2>
                <p class="text-base-content/70">"¿Qué quieres aprender hoy?"</p>
            </div>
            <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-4">{shortcuts}</div>
        </div>
    }
}

/// 只读目录页，按资源类型实例化
pub fn catalog_page<T>() -> impl IntoView
where
    T: CrudResource + Send + Sync,
{
    let app = use_app();
    let state = SignalCell::new(ResourceState::<T>::default());
    let controller: ResourceController<T, FetchClient, LocalStore, Toaster, _> =
        ResourceController::new(app.api.clone(), app.toaster, state);

    on_cleanup({
        let scope = controller.scope().clone();
        move || scope.cancel()
    });

    let load = {
        let controller = controller.clone();
        move |settings: PageSettings| {
            let controller = controller.clone();
            spawn_local(async move {
                controller
                    .fetch_all(settings.page, settings.rows_per_page)
                    .await;
            });
        }
    };
    load(PageSettings::default());

    let settings = Signal::derive(move || state.with(|s| s.settings()));
    let total = Signal::derive(move || state.with(|s| s.total));

    view! {
        <div class="space-y-4">
            <Show when=move || state.with(|s| s.loading)>
                <div class="flex justify-center py-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>
            <Show when=move || state.with(|s| s.error.is_some())>
                <div role="alert" class="alert alert-error">
                    <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                </div>
            </Show>
            <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
                {move || {
                    state.with(|s| {
                        s.items
                            .iter()
                            .map(|item| {
                                let title = item.title().to_string();
                                let subtitle = item.subtitle().to_string();
                                let category = item.category().to_string();
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body">
                                            <h3 class="card-title">{title}</h3>
                                            <p class="text-base-content/70">{subtitle}</p>
                                            <div class="badge badge-outline">{category}</div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    })
                }}
            </div>
            <Show when=move || state.with(|s| !s.loading && s.items.is_empty() && s.error.is_none())>
                <p class="text-center text-base-content/50 py-8">"Todavía no hay contenido publicado."</p>
            </Show>
            <div class="card bg-base-100 shadow">
                <Pager settings=settings total=total on_change=Callback::new(load) />
            </div>
        </div>
    }
}
