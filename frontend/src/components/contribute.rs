//! 学生贡献页面
//!
//! 页面只负责渲染，状态机全部在 `ContributionComposer` 中：
//! 切换类型、内联校验、确认对话框、防重复提交。

mod fields;

use crate::api::use_app;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::state::{SignalCell, Toaster};
use crate::web::{FetchClient, LocalStore};
use chicham::StateCell;
use chicham::contribution::{ComposerState, ContributionComposer};
use chicham_shared::ContributionType;
use fields::{StorySection, WordSection};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) type Composer =
    ContributionComposer<FetchClient, LocalStore, Toaster, SignalCell<ComposerState>>;

#[component]
pub fn ContributePage() -> impl IntoView {
    let app = use_app();
    let state = SignalCell::new(ComposerState::default());
    let composer: Composer = ContributionComposer::new(app.api.clone(), app.toaster, state);

    on_cleanup({
        let scope = composer.scope().clone();
        move || scope.cancel()
    });

    let kind = move || state.with(|s| s.draft.kind);
    let submitting = Signal::derive(move || state.with(|s| s.submitting));
    let dialog = Signal::derive(move || state.with(|s| s.dialog.clone()));

    let on_submit = {
        let composer = composer.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            composer.request_submit();
        }
    };

    let on_confirm = Callback::new({
        let composer = composer.clone();
        move |_: ()| {
            let composer = composer.clone();
            spawn_local(async move {
                composer.submit().await;
            });
        }
    });
    let on_cancel = Callback::new({
        let composer = composer.clone();
        move |_: ()| {
            if !state.read(|s| s.submitting) {
                composer.dismiss();
            }
        }
    });

    let tab = {
        let composer = composer.clone();
        move |target: ContributionType| {
            let composer = composer.clone();
            view! {
                <a
                    role="tab"
                    class=move || if kind() == target { "tab tab-active" } else { "tab" }
                    on:click=move |_| composer.switch_type(target)
                >
                    {target.label()}
                </a>
            }
        }
    };

    let sections = {
        let composer = composer.clone();
        move || match kind() {
            ContributionType::Dictionary => {
                view! { <WordSection composer=composer.clone() state=state /> }.into_any()
            }
            ContributionType::Story => {
                view! { <StorySection composer=composer.clone() state=state /> }.into_any()
            }
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Comparte tu conocimiento"</h2>
                <p class="text-base-content/70">
                    "Propón una palabra o un cuento en Shuar. Un administrador lo revisará antes de publicarlo."
                </p>
                <div role="tablist" class="tabs tabs-boxed w-fit my-2">
                    {tab(ContributionType::Dictionary)}
                    {tab(ContributionType::Story)}
                </div>
                <form class="space-y-4" on:submit=on_submit>
                    {sections}
                    <div class="card-actions justify-end">
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            "Enviar contribución"
                        </button>
                    </div>
                </form>
            </div>
        </div>
        <ConfirmDialog content=dialog busy=submitting on_confirm=on_confirm on_cancel=on_cancel />
    }
}
