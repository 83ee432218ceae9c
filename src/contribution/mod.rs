//! 学生贡献：表单状态与提交流程

pub mod composer;
pub mod form;

pub use composer::{ComposerState, ContributionComposer, SubmitOutcome};
pub use form::{ContributionDraft, FormField, StoryFields, WordFields};
