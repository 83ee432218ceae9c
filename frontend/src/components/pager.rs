//! 分页控件
use chicham::resource::PageSettings;
use chicham::resource::pagination::ROWS_PER_PAGE_OPTIONS;
use leptos::prelude::*;

#[component]
pub fn Pager(
    #[prop(into)] settings: Signal<PageSettings>,
    #[prop(into)] total: Signal<u64>,
    #[prop(into)] on_change: Callback<PageSettings>,
) -> impl IntoView {
    let page_count = move || settings.get().page_count(total.get());
    let go_to = move |page: usize| {
        let current = settings.get_untracked();
        on_change.run(PageSettings { page, ..current });
    };

    view! {
        <div class="flex flex-wrap items-center justify-between gap-4 p-4">
            <label class="flex items-center gap-2 text-sm">
                "Filas por página"
                <select
                    class="select select-bordered select-sm"
                    on:change=move |ev| {
                        if let Ok(rows) = event_target_value(&ev).parse::<usize>() {
                            on_change.run(PageSettings { page: 0, rows_per_page: rows });
                        }
                    }
                >
                    {ROWS_PER_PAGE_OPTIONS
                        .iter()
                        .map(|rows| {
                            let rows = *rows;
                            view! {
                                <option value=rows.to_string() selected=move || settings.get().rows_per_page == rows>
                                    {rows}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || settings.get().page == 0
                    on:click=move |_| go_to(settings.get_untracked().page.saturating_sub(1))
                >
                    "«"
                </button>
                <span class="join-item btn btn-sm btn-disabled">
                    {move || format!("Página {} de {}", settings.get().page + 1, page_count())}
                </span>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || settings.get().page + 1 >= page_count()
                    on:click=move |_| go_to(settings.get_untracked().page + 1)
                >
                    "»"
                </button>
            </div>
        </div>
    }
}
