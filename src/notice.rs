//! 通知与确认对话框的数据模型

use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

/// 短暂显示的提示消息（toast）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }
}

/// 通知出口
pub trait Notifier: Clone {
    fn notify(&self, notice: Notice);
}

/// 记录所有通知，供测试和非浏览器环境使用
impl Notifier for Rc<RefCell<Vec<Notice>>> {
    fn notify(&self, notice: Notice) {
        self.borrow_mut().push(notice);
    }
}

/// 确认对话框的色调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Primary,
    Success,
    Error,
}

impl Tone {
    /// daisyUI 按钮样式
    pub const fn button_class(&self) -> &'static str {
        match self {
            Tone::Primary => "btn btn-primary",
            Tone::Success => "btn btn-success",
            Tone::Error => "btn btn-error",
        }
    }
}

/// 确认对话框内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogContent {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub tone: Tone,
}
