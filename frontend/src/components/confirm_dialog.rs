//! 确认对话框
//!
//! 是否打开完全由 `content` 决定；关闭（Esc、背景点击、取消按钮）统一回调 `on_cancel`。

use chicham::DialogContent;
use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    #[prop(into)] content: Signal<Option<DialogContent>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        let open = content.with(Option::is_some);
        if let Some(dialog) = dialog_ref.get() {
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let title = move || content.with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let message =
        move || content.with(|c| c.as_ref().map(|c| c.message.clone()).unwrap_or_default());
    let confirm_label = move || {
        content.with(|c| c.as_ref().map(|c| c.confirm_label.clone()).unwrap_or_default())
    };
    let confirm_class = move || {
        content.with(|c| c.as_ref().map(|c| c.tone).unwrap_or_default().button_class())
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_cancel.run(())>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4 text-base-content/70">{message}</p>
                <div class="modal-action">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="button"
                        class=confirm_class
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() {
                            view! { <span class="loading loading-spinner"></span> }.into_any()
                        } else {
                            ().into_any()
                        }}
                        {confirm_label}
                    </button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button disabled=move || busy.get()>"close"</button>
            </form>
        </dialog>
    }
}
