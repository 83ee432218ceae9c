//! 贡献审核

pub mod controller;
pub mod queue;
pub mod stats;

pub use controller::{Clock, ModerationController, system_clock};
pub use queue::{ModerationState, PendingAction, Resolution, TypeFilter, filter};
pub use stats::{ModerationStats, compute_stats, trend_percentage};
