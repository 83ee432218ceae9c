//! 登录后页面的外壳：顶栏、按角色生成的侧边菜单、注销
use crate::components::icons::{LogOut, MenuIcon};
use crate::session::use_session;
use crate::web::router::{Link, use_navigate, use_router};
use chicham::policy;
use leptos::prelude::*;

#[component]
pub fn Shell(
    /// 页面标题
    title: &'static str,
    children: Children,
) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let navigate = use_navigate();

    let menu = {
        let session = session.clone();
        move || {
            session
                .state()
                .role()
                .map(|role| policy::policy(role).menu_items)
                .unwrap_or_default()
        }
    };
    let user_name = {
        let session = session.clone();
        move || {
            session
                .state()
                .user
                .map(|u| u.full_name())
                .unwrap_or_default()
        }
    };

    let on_logout = {
        let store = session.store.clone();
        move |_: leptos::ev::MouseEvent| {
            let target = store.logout();
            navigate(target);
        }
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="chicham-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-none lg:hidden">
                        <label for="chicham-drawer" class="btn btn-square btn-ghost">"☰"</label>
                    </div>
                    <div class="flex-1 px-2 text-xl font-bold">{title}</div>
                    <div class="flex-none gap-2">
                        <span class="hidden md:inline text-sm text-base-content/70">{user_name}</span>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" />
                            "Cerrar sesión"
                        </button>
                    </div>
                </div>
                <main class="p-4 md:p-8 max-w-7xl w-full mx-auto space-y-6">{children()}</main>
            </div>
            <div class="drawer-side">
                <label for="chicham-drawer" class="drawer-overlay"></label>
                <aside class="bg-base-100 w-64 min-h-full">
                    <div class="p-4 text-2xl font-bold text-primary">"Chicham"</div>
                    <ul class="menu p-2 gap-1">
                        {move || {
                            let current = router.current_route().get().to_path();
                            menu()
                                .iter()
                                .map(|item| {
                                    let class = if item.path == current { "active" } else { "" };
                                    view! {
                                        <li>
                                            <Link to=item.path class=class>
                                                <MenuIcon name=item.icon />
                                                {item.label}
                                            </Link>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </aside>
            </div>
        </div>
    }
}
