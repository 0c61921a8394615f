pub mod bot;
pub mod policy;

pub use bot::{Decision, FollowPlanner, LeadPlanner, PlayReason, decide, trash_card};
pub use policy::{PolicyOptions, RuleBasedPolicy};
