//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DailySummary, DomainError, IntakeLog, UserProfile};

/// Profile persistence. One profile, stored under a fixed key.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile. `None` means first-time setup has not run yet.
    async fn load_profile(&self) -> Result<Option<UserProfile>, DomainError>;

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), DomainError>;
}

/// Intake log persistence. The whole collection is read and written at once.
#[async_trait::async_trait]
pub trait IntakeLogStore: Send + Sync {
    /// Load all logs. Returns an empty collection if nothing was stored.
    async fn load_logs(&self) -> Result<Vec<IntakeLog>, DomainError>;

    /// Replace the stored collection with `logs`.
    async fn save_logs(&self, logs: &[IntakeLog]) -> Result<(), DomainError>;
}

/// Coach advice generator (e.g. an LLM).
///
/// Best-effort: callers must degrade to a static tip on error.
#[async_trait::async_trait]
pub trait AdvicePort: Send + Sync {
    /// Short free-text tip for the user's current status.
    ///
    /// # Arguments
    /// * `profile` - Current profile, including the cached goal
    /// * `intake_today` - Today's total so far, mL
    /// * `history` - The 7-day window ending today, oldest first
    async fn advise(
        &self,
        profile: &UserProfile,
        intake_today: f64,
        history: &[DailySummary],
    ) -> Result<String, DomainError>;
}
