//! Mock advice adapter for running without API calls.
//!
//! Returns canned tips chosen by today's progress.

use crate::domain::{DailySummary, DomainError, UserProfile, progress_percent};
use crate::ports::AdvicePort;
use std::time::Duration;
use tracing::info;

/// Mock advice adapter.
///
/// Returns predetermined tips without making API calls.
/// Simulates network latency with configurable delay, or always fails when built with `failing()`.
pub struct MockAdviceAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    fail: bool,
}

impl MockAdviceAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self {
            delay_ms: 100,
            fail: false,
        }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: false,
        }
    }

    /// Adapter whose every call errors, as an unreachable service would.
    pub fn failing() -> Self {
        Self {
            delay_ms: 0,
            fail: true,
        }
    }

    fn tip_for(progress: f64) -> &'static str {
        if progress >= 100.0 {
            "[MOCK] Goal reached! Keep sipping lightly through the evening to stay topped up."
        } else if progress >= 50.0 {
            "[MOCK] Over halfway there. A glass with your next meal keeps you on track."
        } else {
            "[MOCK] Start strong: a large glass now helps with focus and energy."
        }
    }
}

impl Default for MockAdviceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AdvicePort for MockAdviceAdapter {
    async fn advise(
        &self,
        profile: &UserProfile,
        intake_today: f64,
        history: &[DailySummary],
    ) -> Result<String, DomainError> {
        info!(
            intake_today,
            goal = profile.daily_goal(),
            history_days = history.len(),
            "[MOCK] Simulating coach tip"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if self.fail {
            return Err(DomainError::Advice("[MOCK] service unavailable".to_string()));
        }

        let progress = progress_percent(intake_today, profile.daily_goal());
        Ok(Self::tip_for(progress).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProfileDetails;

    #[tokio::test]
    async fn test_mock_adapter_tip_follows_progress() {
        let adapter = MockAdviceAdapter::with_delay(1);
        let profile = UserProfile::new(ProfileDetails::default());

        let low = adapter.advise(&profile, 100.0, &[]).await.unwrap();
        let half = adapter.advise(&profile, 1600.0, &[]).await.unwrap();
        let done = adapter.advise(&profile, 3050.0, &[]).await.unwrap();

        assert!(low.contains("Start strong"));
        assert!(half.contains("halfway"));
        assert!(done.contains("Goal reached"));
    }

    #[tokio::test]
    async fn test_failing_adapter_errors() {
        let adapter = MockAdviceAdapter::failing();
        let profile = UserProfile::new(ProfileDetails::default());
        assert!(matches!(
            adapter.advise(&profile, 0.0, &[]).await,
            Err(DomainError::Advice(_))
        ));
    }
}
