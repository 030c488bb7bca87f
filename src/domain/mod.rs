//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the goal formula and the streak/history aggregation live here.
//! Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod goal;
pub mod insights;
pub mod streaks;

pub use entities::{
    Beverage, Climate, DailySummary, Gender, INTAKE_LOGS_KEY, IntakeLog, PROFILE_KEY,
    ProfileDetails, StreakStats, UserProfile, WATER, WATER_PRESETS, WaterPreset, WeightUnit,
};
pub use errors::DomainError;
pub use goal::compute_daily_goal;
pub use insights::{HistoryInsights, Milestone, format_volume, progress_percent};
pub use streaks::{
    DailyTotals, compute_daily_totals, compute_seven_day_history, compute_streaks, day_key,
};
