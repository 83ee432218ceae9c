//! 内联 SVG 图标（线条风格，24x24）
//!
//! 通过 `attr:class` 传入尺寸与颜色。

use leptos::prelude::*;

macro_rules! icon {
    ($name:ident, $($d:literal),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    $(<path d=$d />)+
                </svg>
            }
        }
    };
}

icon!(Home, "M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 22V12h6v10");
icon!(BookOpen, "M2 3h6a4 4 0 0 1 4 4v14a3 3 0 0 0-3-3H2z", "M22 3h-6a4 4 0 0 0-4 4v14a3 3 0 0 1 3-3h7z");
icon!(Languages, "M5 8l6 6", "M4 14l6-6 2-3", "M2 5h12", "M7 2h1", "M22 22l-5-10-5 10", "M14 18h6");
icon!(Feather, "M20.24 12.24a6 6 0 0 0-8.49-8.49L5 10.5V19h8.5z", "M16 8L2 22", "M17.5 15H9");
icon!(Upload, "M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4", "M17 8l-5-5-5 5", "M12 3v12");
icon!(LayoutDashboard, "M3 3h7v9H3z", "M14 3h7v5h-7z", "M14 12h7v9h-7z", "M3 16h7v5H3z");
icon!(Inbox, "M22 12h-6l-2 3h-4l-2-3H2", "M5.45 5.11L2 12v6a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2v-6l-3.45-6.89A2 2 0 0 0 16.76 4H7.24a2 2 0 0 0-1.79 1.11z");
icon!(LogOut, "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9");
icon!(Check, "M20 6L9 17l-5-5");
icon!(X, "M18 6L6 18", "M6 6l12 12");
icon!(Search, "M11 19a8 8 0 1 0 0-16 8 8 0 0 0 0 16z", "M21 21l-4.35-4.35");
icon!(Plus, "M12 5v14", "M5 12h14");
icon!(Pencil, "M17 3a2.85 2.83 0 1 1 4 4L7.5 20.5 2 22l1.5-5.5z");
icon!(Trash2, "M3 6h18", "M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6", "M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2");
icon!(RefreshCw, "M23 4v6h-6", "M1 20v-6h6", "M3.51 9a9 9 0 0 1 14.85-3.36L23 10", "M20.49 15a9 9 0 0 1-14.85 3.36L1 14");

/// 按菜单项的图标名渲染
#[component]
pub fn MenuIcon(name: &'static str) -> impl IntoView {
    match name {
        "home" => view! { <Home attr:class="h-5 w-5" /> }.into_any(),
        "book" => view! { <BookOpen attr:class="h-5 w-5" /> }.into_any(),
        "language" => view! { <Languages attr:class="h-5 w-5" /> }.into_any(),
        "story" => view! { <Feather attr:class="h-5 w-5" /> }.into_any(),
        "upload" => view! { <Upload attr:class="h-5 w-5" /> }.into_any(),
        "dashboard" => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        "inbox" => view! { <Inbox attr:class="h-5 w-5" /> }.into_any(),
        _ => ().into_any(),
    }
}
