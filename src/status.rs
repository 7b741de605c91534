//! Unit status reporting
//!
//! The status is the charm's only operator-visible health signal. It is
//! overwritten synchronously during each handler.

/// Self-reported unit status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    /// Unit is up and the workload spec is in place
    Active,
    /// Unit is busy applying a change
    Maintenance(String),
    /// Operator intervention is required; the message names the reason
    Blocked(String),
}

impl UnitStatus {
    /// Status name as `status-set` expects it
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance(_) => "maintenance",
            Self::Blocked(_) => "blocked",
        }
    }

    /// Human-readable reason, empty for Active
    pub fn message(&self) -> &str {
        match self {
            Self::Active => "",
            Self::Maintenance(msg) | Self::Blocked(msg) => msg,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

impl std::fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            "" => write!(f, "{}", self.name()),
            msg => write!(f, "{}: {}", self.name(), msg),
        }
    }
}
