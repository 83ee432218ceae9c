//! 贡献审核页
//!
//! 左侧是筛选后的待审列表，右侧是选中项的详情；
//! 通过与拒绝都先弹出确认框，确认后才调用后端。

use super::{Moderation, StatsCards, format_timestamp, status_badge, use_moderation};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{Check, Search, X};
use crate::state::SignalCell;
use chicham::StateCell;
use chicham::moderation::{ModerationState, Resolution, TypeFilter};
use chicham_shared::{Contribution, ContributionData};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn optional_image(src: Option<String>, alt: String) -> impl IntoView {
    src.filter(|s| !s.is_empty()).map(|src| {
        view! { <img src=src alt=alt class="rounded-lg max-h-64 object-contain" /> }
    })
}

/// 贡献内容的只读展示
fn detail_view(item: &Contribution) -> AnyView {
    let submitted = format_timestamp(item.created_at);
    let submitter = item.submitter_name().to_string();
    let body = match &item.data {
        ContributionData::Dictionary(word) => {
            let examples = word
                .examples
                .iter()
                .map(|ex| view! { <li>{ex.clone()}</li> })
                .collect_view();
            view! {
                <dl class="space-y-2">
                    <dt class="text-sm opacity-60">"Palabra en Shuar"</dt>
                    <dd class="text-2xl font-bold">{word.word_shuar.clone()}</dd>
                    <dt class="text-sm opacity-60">"Traducción"</dt>
                    <dd>{word.word_spanish.clone()}</dd>
                    <dt class="text-sm opacity-60">"Categoría"</dt>
                    <dd>{word.category.clone()}</dd>
                    <dt class="text-sm opacity-60">"Ejemplos"</dt>
                    <dd><ul class="list-disc ml-5">{examples}</ul></dd>
                </dl>
                {optional_image(word.image.clone(), word.image_description.clone())}
            }
            .into_any()
        }
        ContributionData::Story(story) => view! {
            <dl class="space-y-2">
                <dt class="text-sm opacity-60">"Título"</dt>
                <dd class="text-2xl font-bold">{story.title_shuar.clone()}</dd>
                <dd class="italic">{story.title_spanish.clone()}</dd>
                <dt class="text-sm opacity-60">"Autor"</dt>
                <dd>{story.author.clone()}</dd>
                <dt class="text-sm opacity-60">"Categoría"</dt>
                <dd>{story.category.clone()}</dd>
            </dl>
            {optional_image(story.cover_image.clone(), story.image_description.clone())}
            <div class="grid md:grid-cols-2 gap-4">
                <p class="whitespace-pre-line">{story.content_shuar.clone()}</p>
                <p class="whitespace-pre-line opacity-80">{story.content_spanish.clone()}</p>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center gap-2">
                <span class="badge badge-outline">{item.kind().label()}</span>
                <span class="text-sm opacity-70">{format!("{submitter} · {submitted}")}</span>
            </div>
            {body}
        </div>
    }
    .into_any()
}

#[component]
fn QueueTable(controller: Moderation, state: SignalCell<ModerationState>) -> impl IntoView {
    let rows = move || {
        state.with(|s| {
            let selected = s.selected.clone();
            s.visible()
                .into_iter()
                .map(|item| {
                    let id = item.id.clone();
                    let row_class = if selected.as_deref() == Some(id.as_str()) {
                        "bg-base-200"
                    } else {
                        ""
                    };
                    let (select, approve, reject) =
                        (controller.clone(), controller.clone(), controller.clone());
                    let (select_id, approve_id, reject_id) = (id.clone(), id.clone(), id);
                    view! {
                        <tr class=row_class>
                            <td>
                                <button
                                    class="link link-hover font-bold text-left"
                                    on:click=move |_| select.select(Some(select_id.clone()))
                                >
                                    {item.data.primary_text().to_string()}
                                </button>
                                <div class="text-sm opacity-60">{item.data.secondary_text().to_string()}</div>
                            </td>
                            <td class="hidden md:table-cell">{item.submitter_name().to_string()}</td>
                            <td><span class="badge badge-outline">{item.kind().label()}</span></td>
                            <td class="hidden lg:table-cell text-sm opacity-70">{format_timestamp(item.created_at)}</td>
                            <td class="flex gap-1 justify-end">
                                <button
                                    class="btn btn-success btn-sm btn-square"
                                    title="Aprobar"
                                    on:click=move |_| { approve.request_resolution(&approve_id, Resolution::Approve); }
                                >
                                    <Check attr:class="h-4 w-4" />
                                </button>
                                <button
                                    class="btn btn-error btn-sm btn-square"
                                    title="Rechazar"
                                    on:click=move |_| { reject.request_resolution(&reject_id, Resolution::Reject); }
                                >
                                    <X attr:class="h-4 w-4" />
                                </button>
                            </td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <table class="table w-full">
            <thead>
                <tr>
                    <th>"Contribución"</th>
                    <th class="hidden md:table-cell">"Enviada por"</th>
                    <th>"Tipo"</th>
                    <th class="hidden lg:table-cell">"Fecha"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {rows}
                <Show when=move || state.with(|s| !s.loading && s.visible().is_empty())>
                    <tr>
                        <td colspan="5" class="text-center py-8 text-base-content/50">
                            "No hay contribuciones pendientes."
                        </td>
                    </tr>
                </Show>
                <Show when=move || state.with(|s| s.loading)>
                    <tr>
                        <td colspan="5" class="text-center py-8">
                            <span class="loading loading-spinner loading-md"></span>
                        </td>
                    </tr>
                </Show>
            </tbody>
        </table>
    }
}

#[component]
pub fn ModerationPage() -> impl IntoView {
    let (controller, state) = use_moderation();

    let stats = Signal::derive(move || state.with(|s| s.stats));
    let dialog = Signal::derive(move || {
        state.with(|s| s.pending_action.as_ref().map(|a| a.dialog.clone()))
    });
    let resolving = Signal::derive(move || state.with(|s| s.resolving));

    let on_confirm = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.confirm().await;
            });
        }
    });
    let on_cancel = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            if !state.read(|s| s.resolving) {
                controller.dismiss();
            }
        }
    });

    let search = {
        let controller = controller.clone();
        move |ev: leptos::ev::Event| controller.set_search(event_target_value(&ev))
    };
    let type_filter = {
        let controller = controller.clone();
        move |ev: leptos::ev::Event| controller.set_type_filter(TypeFilter::from_value(&event_target_value(&ev)))
    };
    let close_detail = {
        let controller = controller.clone();
        move |_: leptos::ev::MouseEvent| controller.select(None)
    };

    let history = move || {
        state.with(|s| {
            s.history
                .iter()
                .map(|item| {
                    let (badge, label) = status_badge(item.status);
                    view! {
                        <li class="flex justify-between items-center py-2">
                            <span>
                                <span class="font-bold">{item.data.primary_text().to_string()}</span>
                                <span class="text-sm opacity-60">{format!(" · {}", item.submitter_name())}</span>
                            </span>
                            <span class=badge>{label}</span>
                        </li>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <StatsCards stats=stats />

        <div class="grid gap-6 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <div class="card-body p-0">
                    <div class="flex flex-wrap gap-2 p-4">
                        <label class="input input-bordered flex items-center gap-2 flex-1">
                            <Search attr:class="h-4 w-4 opacity-60" />
                            <input
                                type="search"
                                class="grow"
                                placeholder="Buscar por palabra, título o autor"
                                prop:value=move || state.with(|s| s.search.clone())
                                on:input=search
                            />
                        </label>
                        <select class="select select-bordered" on:change=type_filter>
                            {TypeFilter::ALL
                                .iter()
                                .map(|filter| {
                                    let filter = *filter;
                                    view! {
                                        <option
                                            value=filter.value()
                                            selected=move || state.with(|s| s.type_filter == filter)
                                        >
                                            {filter.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="overflow-x-auto">
                        <QueueTable controller=controller.clone() state=state />
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    {move || match state.with(|s| s.selected_item().map(detail_view)) {
                        Some(detail) => view! {
                            <div class="flex justify-end">
                                <button class="btn btn-ghost btn-sm" on:click=close_detail.clone()>"Cerrar"</button>
                            </div>
                            {detail}
                        }
                        .into_any(),
                        None => view! {
                            <p class="text-base-content/50">"Selecciona una contribución para ver el detalle."</p>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title">"Historial"</h3>
                <ul class="divide-y divide-base-200">{history}</ul>
            </div>
        </div>

        <ConfirmDialog content=dialog busy=resolving on_confirm=on_confirm on_cancel=on_cancel />
    }
}
