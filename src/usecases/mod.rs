//! Application use cases. Orchestrate domain logic via ports.

pub mod advice_service;
pub mod profile_service;
pub mod tracker_service;

pub use advice_service::{AdviceService, FALLBACK_TIP};
pub use profile_service::ProfileService;
pub use tracker_service::{Dashboard, TrackerService};
