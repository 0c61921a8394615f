mod rule_based;

pub use rule_based::RuleBasedPolicy;

const DECISION_DETAILS_ENV: &str = "TRUMPS_DECISION_DETAILS";

/// Switches that change what a policy reports, never what it plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOptions {
    decision_details: bool,
}

impl PolicyOptions {
    pub const fn new(decision_details: bool) -> Self {
        Self { decision_details }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn decision_details(self) -> bool {
        self.decision_details
    }

    pub fn with_decision_details(mut self, enabled: bool) -> Self {
        self.decision_details = enabled;
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let decision_details = read(DECISION_DETAILS_ENV)
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);
        Self { decision_details }
    }
}
