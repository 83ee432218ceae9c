//! 内容管理页（课程、词典、故事）
//!
//! 同一套页面按 `CrudResource` 实例化：表格、分页、编辑弹窗与删除确认。
//! 分页状态按视图名记在 SessionStorage 中。

use crate::api::use_app;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::components::pager::Pager;
use crate::state::{SignalCell, Toaster};
use crate::web::file::{read_data_url, selected_file};
use crate::web::{FetchClient, LocalStore, SessionStore};
use chicham::resource::{
    CrudResource, FieldSpec, InputKind, PageSettings, PaginationMemory, ResourceController,
    ResourceDraft, ResourceState,
};
use chicham::{DialogContent, Notice, Notifier, Tone};
use chicham_shared::PublishState;
use leptos::prelude::*;
use leptos::task::spawn_local;

type Controller<T> =
    ResourceController<T, FetchClient, LocalStore, Toaster, SignalCell<ResourceState<T>>>;

/// 编辑弹窗中的单个字段
#[component]
fn DraftInput(spec: &'static FieldSpec, draft: RwSignal<Option<ResourceDraft>>) -> impl IntoView {
    let value = move || draft.with(|d| d.as_ref().map(|d| d.text(spec.name)).unwrap_or_default());
    let set = move |value: String| {
        draft.update(|d| {
            if let Some(d) = d {
                d.set(spec, value);
            }
        })
    };
    let marker = if spec.required { " *" } else { "" };

    let control = match spec.input {
        InputKind::Text => view! {
            <input
                id=spec.name
                type="text"
                class="input input-bordered w-full"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        InputKind::TextArea => view! {
            <textarea
                id=spec.name
                rows="5"
                class="textarea textarea-bordered w-full"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        // 按行拆分会吞掉正在输入的空行，因此失焦时才写回
        InputKind::Lines => view! {
            <textarea
                id=spec.name
                rows="4"
                class="textarea textarea-bordered w-full"
                prop:value=value
                on:change=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        InputKind::Image => view! {
            <div class="flex items-center gap-4">
                <input
                    id=spec.name
                    type="file"
                    accept="image/*"
                    class="file-input file-input-bordered w-full"
                    on:change=move |ev| {
                        let Some(file) = selected_file(&ev) else { return };
                        spawn_local(async move {
                            if let Some(data_url) = read_data_url(file).await {
                                set(data_url);
                            }
                        });
                    }
                />
                <Show when=move || !value().is_empty()>
                    <img src=value class="h-16 w-16 rounded object-cover" />
                    <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| set(String::new())>
                        "Quitar"
                    </button>
                </Show>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="form-control">
            <label for=spec.name class="label">
                <span class="label-text">{spec.label}{marker}</span>
            </label>
            {control}
        </div>
    }
}

#[component]
fn EditorDialog(
    title: &'static str,
    fields: &'static [FieldSpec],
    draft: RwSignal<Option<ResourceDraft>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_save: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        let open = draft.with(Option::is_some);
        if let Some(dialog) = dialog_ref.get() {
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let close = move || {
        if !busy.get_untracked() {
            draft.set(None);
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">{title}</h3>
                <form
                    class="space-y-4 mt-4"
                    on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                        ev.prevent_default();
                        on_save.run(());
                    }
                >
                    {fields
                        .iter()
                        .map(|spec| view! { <DraftInput spec=spec draft=draft /> })
                        .collect_view()}
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" disabled=move || busy.get() on:click=move |_| close()>
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                            {move || if busy.get() {
                                view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                            } else {
                                "Guardar".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}

/// 管理端资源页，按资源类型实例化
pub fn resource_page<T>() -> impl IntoView
where
    T: CrudResource + Send + Sync,
{
    let app = use_app();
    let toaster = app.toaster;
    let state = SignalCell::new(ResourceState::<T>::default());
    let controller: Controller<T> = ResourceController::new(app.api.clone(), toaster, state);
    let memory = PaginationMemory::new(SessionStore, T::VIEW);

    on_cleanup({
        let scope = controller.scope().clone();
        move || scope.cancel()
    });

    let editor = RwSignal::new(Option::<ResourceDraft>::None);
    let saving = RwSignal::new(false);
    let pending_delete = RwSignal::new(Option::<String>::None);
    let deleting = RwSignal::new(false);

    let saved = memory.load();
    let load = {
        let controller = controller.clone();
        move |settings: PageSettings| {
            memory.save(settings);
            let controller = controller.clone();
            spawn_local(async move {
                controller
                    .fetch_all(settings.page, settings.rows_per_page)
                    .await;
            });
        }
    };
    load(saved);

    let open_new = move |_: leptos::ev::MouseEvent| editor.set(Some(ResourceDraft::new()));

    // 编辑前重新读取，表格里的数据可能已过期
    let open_edit = {
        let controller = controller.clone();
        move |id: String| {
            let controller = controller.clone();
            spawn_local(async move {
                match controller.fetch_by_id(&id).await {
                    Ok(item) => editor.set(Some(ResourceDraft::from_item(&item))),
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => toaster.notify(Notice::error(e.user_message())),
                }
            });
        }
    };

    let on_save = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            let Some(draft) = editor.get_untracked() else { return };
            let item: T = match draft.to_item() {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(error = %e, resource = T::BASE, "form does not map to resource");
                    toaster.notify(Notice::error(e.user_message()));
                    return;
                }
            };
            saving.set(true);
            let controller = controller.clone();
            spawn_local(async move {
                let saved = if item.id().is_empty() {
                    controller.create(&item).await
                } else {
                    controller.update(&item).await
                };
                saving.set(false);
                if saved {
                    editor.set(None);
                }
            });
        }
    });

    let delete_dialog = Signal::derive(move || {
        pending_delete.with(|id| {
            id.as_ref().map(|_| DialogContent {
                title: format!("Eliminar {}", T::LABEL.to_lowercase()),
                message: "Esta acción no se puede deshacer. ¿Deseas continuar?".to_string(),
                confirm_label: "Eliminar".to_string(),
                tone: Tone::Error,
            })
        })
    });
    let on_delete = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            let Some(id) = pending_delete.get_untracked() else { return };
            deleting.set(true);
            let controller = controller.clone();
            spawn_local(async move {
                controller.delete(&id).await;
                deleting.set(false);
                pending_delete.set(None);
            });
        }
    });
    let on_delete_cancel = Callback::new(move |_: ()| {
        if !deleting.get_untracked() {
            pending_delete.set(None);
        }
    });

    let settings = Signal::derive(move || state.with(|s| s.settings()));
    let total = Signal::derive(move || state.with(|s| s.total));

    let rows = move || {
        state.with(|s| {
            s.items
                .iter()
                .map(|item| {
                    let edit_id = item.id().to_string();
                    let delete_id = edit_id.clone();
                    let open_edit = open_edit.clone();
                    let status = item.status().map(|_| PublishState::display(item.status()));
                    view! {
                        <tr>
                            <td class="font-bold">{item.title().to_string()}</td>
                            <td>{item.subtitle().to_string()}</td>
                            <td class="hidden md:table-cell">
                                <span class="badge badge-outline">{item.category().to_string()}</span>
                            </td>
                            <td class="hidden md:table-cell">
                                {status.map(|label| view! { <span class="badge badge-ghost">{label}</span> })}
                            </td>
                            <td class="flex gap-1 justify-end">
                                <button class="btn btn-ghost btn-sm btn-square" title="Editar"
                                    on:click=move |_| open_edit(edit_id.clone())>
                                    <Pencil attr:class="h-4 w-4" />
                                </button>
                                <button class="btn btn-ghost btn-sm btn-square text-error" title="Eliminar"
                                    on:click=move |_| pending_delete.set(Some(delete_id.clone()))>
                                    <Trash2 attr:class="h-4 w-4" />
                                </button>
                            </td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">{T::LABEL}</h3>
                    <button class="btn btn-primary gap-2" on:click=open_new>
                        <Plus attr:class="h-4 w-4" /> "Nuevo"
                    </button>
                </div>
                <Show when=move || state.with(|s| s.error.is_some())>
                    <div role="alert" class="alert alert-error mx-6">
                        <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                    </div>
                </Show>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Shuar"</th>
                                <th>"Español"</th>
                                <th class="hidden md:table-cell">"Categoría"</th>
                                <th class="hidden md:table-cell">"Estado"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows}
                            <Show when=move || state.with(|s| s.loading)>
                                <tr>
                                    <td colspan="5" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                        </tbody>
                    </table>
                </div>
                <Pager settings=settings total=total on_change=Callback::new(load) />
            </div>
        </div>

        <EditorDialog title=T::LABEL fields=T::FIELDS draft=editor busy=saving on_save=on_save />
        <ConfirmDialog content=delete_dialog busy=deleting on_confirm=on_delete on_cancel=on_delete_cancel />
    }
}
