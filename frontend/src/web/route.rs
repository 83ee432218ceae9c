//! 路由定义模块 - 领域模型
//!
//! 不依赖 DOM。路径表与角色策略共用同一组常量，
//! 守卫逻辑通过 `chicham::policy::can_access` 判定。

use chicham::policy::{self, ROOT_ROUTE, Role};
use std::fmt::Display;

/// 学生端页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentPage {
    Inicio,
    Lecciones,
    Diccionario,
    Cuentos,
    Contribuir,
}

/// 管理端页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    Dashboard,
    Lecciones,
    Diccionario,
    Cuentos,
    Contribuciones,
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 公开首页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    Student(StudentPage),
    Admin(AdminPage),
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => ROOT_ROUTE,
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/registro" => Self::Register,
            "/estudiante/inicio" => Self::Student(StudentPage::Inicio),
            "/estudiante/lecciones" => Self::Student(StudentPage::Lecciones),
            "/estudiante/diccionario" => Self::Student(StudentPage::Diccionario),
            "/estudiante/cuentos" => Self::Student(StudentPage::Cuentos),
            "/estudiante/contribuir" => Self::Student(StudentPage::Contribuir),
            "/admin/dashboard" => Self::Admin(AdminPage::Dashboard),
            "/admin/lecciones" => Self::Admin(AdminPage::Lecciones),
            "/admin/diccionario" => Self::Admin(AdminPage::Diccionario),
            "/admin/cuentos" => Self::Admin(AdminPage::Cuentos),
            "/admin/contribuciones" => Self::Admin(AdminPage::Contribuciones),
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => ROOT_ROUTE,
            Self::Login => "/login",
            Self::Register => "/registro",
            Self::Student(page) => match page {
                StudentPage::Inicio => "/estudiante/inicio",
                StudentPage::Lecciones => "/estudiante/lecciones",
                StudentPage::Diccionario => "/estudiante/diccionario",
                StudentPage::Cuentos => "/estudiante/cuentos",
                StudentPage::Contribuir => "/estudiante/contribuir",
            },
            Self::Admin(page) => match page {
                AdminPage::Dashboard => "/admin/dashboard",
                AdminPage::Lecciones => "/admin/lecciones",
                AdminPage::Diccionario => "/admin/diccionario",
                AdminPage::Cuentos => "/admin/cuentos",
                AdminPage::Contribuciones => "/admin/contribuciones",
            },
            Self::NotFound => "/404",
        }
    }

    /// 是否需要登录
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Student(_) | Self::Admin(_))
    }

    /// 已登录用户是否应该离开此路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 角色的落地页
    pub fn landing_for(role: Role) -> Self {
        Self::from_path(policy::policy(role).landing())
    }

    /// **核心守卫逻辑**：给定当前角色，返回实际应当展示的路由
    ///
    /// `role` 为 `None` 表示未登录（或角色无法识别）。
    pub fn guard(self, role: Option<Role>) -> Self {
        match role {
            None if self.requires_auth() => Self::auth_failure_redirect(),
            Some(role) if self.requires_auth() && !policy::can_access(role, self.to_path()) => {
                Self::landing_for(role)
            }
            Some(role) if self.should_redirect_when_authenticated() => Self::landing_for(role),
            _ => self,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_policy_route_resolves() {
        for role in [Role::Admin, Role::Student] {
            for path in policy::policy(role).routes {
                let route = AppRoute::from_path(path);
                assert_ne!(route, AppRoute::NotFound, "{path}");
                assert_eq!(route.to_path(), *path);
            }
        }
    }

    #[test]
    fn test_guests_are_sent_to_login() {
        let route = AppRoute::Admin(AdminPage::Contribuciones);
        assert_eq!(route.guard(None), AppRoute::Login);
        assert_eq!(AppRoute::Home.guard(None), AppRoute::Home);
    }

    #[test]
    fn test_students_cannot_open_admin_pages() {
        let route = AppRoute::Admin(AdminPage::Dashboard);
        assert_eq!(
            route.guard(Some(Role::Student)),
            AppRoute::Student(StudentPage::Inicio)
        );
        assert_eq!(route.guard(Some(Role::Admin)), route);
    }

    #[test]
    fn test_login_page_forwards_signed_in_users() {
        assert_eq!(
            AppRoute::Login.guard(Some(Role::Admin)),
            AppRoute::Admin(AdminPage::Dashboard)
        );
        assert_eq!(AppRoute::from_path("/login/"), AppRoute::Login);
    }
}
