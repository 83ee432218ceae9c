//! 提示消息浮层
use crate::api::use_app;
use chicham::NoticeKind;
use leptos::prelude::*;

fn alert_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "alert alert-success shadow-lg",
        NoticeKind::Error => "alert alert-error shadow-lg",
        NoticeKind::Warning => "alert alert-warning shadow-lg",
        NoticeKind::Info => "alert alert-info shadow-lg",
    }
}

#[component]
pub fn Toasts() -> impl IntoView {
    let toaster = use_app().toaster;

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toaster.notices()
                key=|notice| notice.id
                children=move |notice| {
                    let closing = notice.clone();
                    view! {
                        <div role="alert" class=alert_class(notice.kind)>
                            <span>{notice.message}</span>
                            <button
                                class="btn btn-ghost btn-xs"
                                on:click=move |_| toaster.dismiss(&closing)
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
