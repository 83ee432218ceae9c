//! 审核队列的状态与纯查询

use super::stats::ModerationStats;
use crate::notice::{DialogContent, Tone};
use chicham_shared::protocol::{
    ApiRequest, ApproveContributionRequest, RejectContributionRequest,
};
use chicham_shared::{Contribution, ContributionStatus, ContributionType};

/// 类型筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Dictionary,
    Story,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Dictionary, TypeFilter::Story];

    pub fn matches(&self, kind: ContributionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Dictionary => kind == ContributionType::Dictionary,
            TypeFilter::Story => kind == ContributionType::Story,
        }
    }

    /// `<select>` 的取值
    pub const fn value(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Dictionary => "dictionary",
            TypeFilter::Story => "story",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "dictionary" => TypeFilter::Dictionary,
            "story" => TypeFilter::Story,
            _ => TypeFilter::All,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            TypeFilter::All => "Todos",
            TypeFilter::Dictionary => "Palabras",
            TypeFilter::Story => "Cuentos",
        }
    }
}

/// 审核决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Resolution::Approve => ApproveContributionRequest::PATH,
            Resolution::Reject => RejectContributionRequest::PATH,
        }
    }

    /// 决定后的终态
    pub const fn status(&self) -> ContributionStatus {
        match self {
            Resolution::Approve => ContributionStatus::Approved,
            Resolution::Reject => ContributionStatus::Rejected,
        }
    }

    pub fn dialog(&self, item: &Contribution) -> DialogContent {
        let noun = match item.kind() {
            ContributionType::Dictionary => "la palabra",
            ContributionType::Story => "el cuento",
        };
        let headline = item.data.primary_text();
        match self {
            Resolution::Approve => DialogContent {
                title: "Aprobar contribución".to_string(),
                message: format!("¿Aprobar {noun} \"{headline}\"? Se publicará en la plataforma."),
                confirm_label: "Aprobar".to_string(),
                tone: Tone::Success,
            },
            Resolution::Reject => DialogContent {
                title: "Rechazar contribución".to_string(),
                message: format!("¿Rechazar {noun} \"{headline}\"? Esta acción no se puede deshacer."),
                confirm_label: "Rechazar".to_string(),
                tone: Tone::Error,
            },
        }
    }

    pub const fn success_message(&self) -> &'static str {
        match self {
            Resolution::Approve => "Contribución aprobada",
            Resolution::Reject => "Contribución rechazada",
        }
    }
}

/// 等待确认的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub id: String,
    pub resolution: Resolution,
    pub dialog: DialogContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationState {
    pub contributions: Vec<Contribution>,
    pub history: Vec<Contribution>,
    pub stats: ModerationStats,
    pub selected: Option<String>,
    pub search: String,
    pub type_filter: TypeFilter,
    pub pending_action: Option<PendingAction>,
    pub loading: bool,
    pub resolving: bool,
}

impl ModerationState {
    /// 当前筛选条件下可见的待审项
    pub fn visible(&self) -> Vec<&Contribution> {
        filter(&self.contributions, &self.search, self.type_filter)
    }

    pub fn selected_item(&self) -> Option<&Contribution> {
        let id = self.selected.as_deref()?;
        self.contributions.iter().find(|c| c.id == id)
    }
}

/// 按提交者姓名或主要字段做不区分大小写的子串匹配
///
/// 只返回待审项；查询为空时仅按类型筛选。
pub fn filter<'a>(
    items: &'a [Contribution],
    query: &str,
    type_filter: TypeFilter,
) -> Vec<&'a Contribution> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|c| c.is_pending() && type_filter.matches(c.kind()))
        .filter(|c| {
            needle.is_empty()
                || c.submitter_name().to_lowercase().contains(&needle)
                || c.data.primary_text().to_lowercase().contains(&needle)
        })
        .collect()
}
