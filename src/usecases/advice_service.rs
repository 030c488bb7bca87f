//! Coach tips. Best-effort: failures never reach the caller.

use crate::domain::{DailySummary, UserProfile};
use crate::ports::AdvicePort;
use std::sync::Arc;
use tracing::warn;

/// Shown whenever the advice service fails or returns nothing.
pub const FALLBACK_TIP: &str = "Keep drinking water to stay energized throughout your day!";

pub struct AdviceService {
    advice: Arc<dyn AdvicePort>,
}

impl AdviceService {
    pub fn new(advice: Arc<dyn AdvicePort>) -> Self {
        Self { advice }
    }

    /// Tip for the current status, or [`FALLBACK_TIP`].
    pub async fn tip(
        &self,
        profile: &UserProfile,
        intake_today: f64,
        history: &[DailySummary],
    ) -> String {
        match self.advice.advise(profile, intake_today, history).await {
            Ok(tip) if !tip.trim().is_empty() => tip,
            Ok(_) => {
                warn!("advice service returned an empty tip, using fallback");
                FALLBACK_TIP.to_string()
            }
            Err(e) => {
                warn!(error = %e, "advice service failed, using fallback");
                FALLBACK_TIP.to_string()
            }
        }
    }
}
