//! Profile setup and updates. The goal is computed here, once per save.

use crate::domain::{DomainError, ProfileDetails, UserProfile};
use crate::ports::ProfileStore;
use std::sync::Arc;
use tracing::info;

pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Stored profile, or `None` when first-time setup is still needed.
    pub async fn load(&self) -> Result<Option<UserProfile>, DomainError> {
        self.store.load_profile().await
    }

    /// Create or replace the profile from `details`, computing its goal, and persist it.
    pub async fn save_details(&self, details: ProfileDetails) -> Result<UserProfile, DomainError> {
        let profile = match self.store.load_profile().await? {
            Some(mut existing) => {
                let previous_goal = existing.daily_goal();
                existing.update(details);
                info!(
                    previous_goal,
                    daily_goal = existing.daily_goal(),
                    "profile updated"
                );
                existing
            }
            None => {
                let profile = UserProfile::new(details);
                info!(daily_goal = profile.daily_goal(), "profile created");
                profile
            }
        };
        self.store.save_profile(&profile).await?;
        Ok(profile)
    }
}
