//! 角色 → 菜单 / 路由 的静态策略表
//!
//! 角色是封闭枚举，映射是穷尽的 `match`；无法识别的角色标签在解析阶段
//! 就以 `AppError::UnknownRole` 显式失败。

use crate::error::{AppError, AppResult};
pub use chicham_shared::Role;

/// 未登录或角色无法识别时的落地页
pub const ROOT_ROUTE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    pub menu_items: &'static [MenuItem],
    /// 第一个元素是该角色的默认落地页
    pub routes: &'static [&'static str],
}

impl RolePolicy {
    pub fn landing(&self) -> &'static str {
        self.routes.first().copied().unwrap_or(ROOT_ROUTE)
    }
}

const STUDENT_MENU: &[MenuItem] = &[
    MenuItem { label: "Inicio", path: "/estudiante/inicio", icon: "home" },
    MenuItem { label: "Lecciones", path: "/estudiante/lecciones", icon: "book" },
    MenuItem { label: "Diccionario", path: "/estudiante/diccionario", icon: "language" },
    MenuItem { label: "Cuentos", path: "/estudiante/cuentos", icon: "story" },
    MenuItem { label: "Contribuir", path: "/estudiante/contribuir", icon: "upload" },
];

const ADMIN_MENU: &[MenuItem] = &[
    MenuItem { label: "Panel", path: "/admin/dashboard", icon: "dashboard" },
    MenuItem { label: "Lecciones", path: "/admin/lecciones", icon: "book" },
    MenuItem { label: "Diccionario", path: "/admin/diccionario", icon: "language" },
    MenuItem { label: "Cuentos", path: "/admin/cuentos", icon: "story" },
    MenuItem { label: "Contribuciones", path: "/admin/contribuciones", icon: "inbox" },
];

const STUDENT_ROUTES: &[&str] = &[
    "/estudiante/inicio",
    "/estudiante/lecciones",
    "/estudiante/diccionario",
    "/estudiante/cuentos",
    "/estudiante/contribuir",
];

const ADMIN_ROUTES: &[&str] = &[
    "/admin/dashboard",
    "/admin/lecciones",
    "/admin/diccionario",
    "/admin/cuentos",
    "/admin/contribuciones",
];

/// 解析角色标签
pub fn parse_role(tag: &str) -> AppResult<Role> {
    Role::from_tag(tag).ok_or_else(|| AppError::UnknownRole(tag.to_string()))
}

pub const fn policy(role: Role) -> RolePolicy {
    match role {
        Role::Admin => RolePolicy {
            menu_items: ADMIN_MENU,
            routes: ADMIN_ROUTES,
        },
        Role::Student => RolePolicy {
            menu_items: STUDENT_MENU,
            routes: STUDENT_ROUTES,
        },
    }
}

/// 登录后的跳转目标；无法识别的角色落到根路径
pub fn landing_route(tag: &str) -> &'static str {
    match parse_role(tag) {
        Ok(role) => policy(role).landing(),
        Err(e) => {
            tracing::warn!(error = %e, "no landing route for role");
            ROOT_ROUTE
        }
    }
}

/// 路由守卫：该角色是否可以访问此路径
pub fn can_access(role: Role, path: &str) -> bool {
    policy(role).routes.contains(&path)
}
