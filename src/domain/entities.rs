//! Domain entities. Pure data structures for the core business.
//!
//! No storage/UI types here. Serialized field names match the stored JSON blobs.

use crate::domain::goal::compute_daily_goal;
use serde::{Deserialize, Serialize};

/// Storage key for the profile blob.
pub const PROFILE_KEY: &str = "hydrate_me_user_profile";
/// Storage key for the full intake log collection.
pub const INTAKE_LOGS_KEY: &str = "hydrate_me_intake_logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Climate {
    HotHumid,
    Moderate,
    Cold,
    HighAltitude,
}

impl std::fmt::Display for Climate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Climate::HotHumid => "Hot/Humid",
            Climate::Moderate => "Moderate",
            Climate::Cold => "Cold",
            Climate::HighAltitude => "High Altitude",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightUnit::Kg => f.write_str("kg"),
            WeightUnit::Lbs => f.write_str("lbs"),
        }
    }
}

/// Biometric and lifestyle inputs of the goal formula.
///
/// Not validated: sanitizing ranges is the job of whoever collects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    #[serde(default)]
    pub name: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub age: f64,
    pub gender: Gender,
    pub exercise_minutes_per_session: f64,
    pub exercise_days_per_week: f64,
    pub climate: Climate,
    pub caffeine_cups: u32,
    pub has_medical_condition: bool,
}

impl Default for ProfileDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            weight: 70.0,
            weight_unit: WeightUnit::Kg,
            age: 25.0,
            gender: Gender::Male,
            exercise_minutes_per_session: 0.0,
            exercise_days_per_week: 0.0,
            climate: Climate::Moderate,
            caffeine_cups: 0,
            has_medical_condition: false,
        }
    }
}

/// Stored profile: the inputs plus the goal computed from them.
///
/// `daily_goal` is cached at creation/update time and never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    details: ProfileDetails,
    daily_goal: u32,
}

impl UserProfile {
    pub fn new(details: ProfileDetails) -> Self {
        let daily_goal = compute_daily_goal(&details);
        Self {
            details,
            daily_goal,
        }
    }

    /// Replace the inputs and recompute the cached goal.
    pub fn update(&mut self, details: ProfileDetails) {
        self.daily_goal = compute_daily_goal(&details);
        self.details = details;
    }

    pub fn details(&self) -> &ProfileDetails {
        &self.details
    }

    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }
}

/// A single logged drink. Immutable once created; only deletion by `id` is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeLog {
    pub id: String,
    /// Hydration-equivalent volume in mL.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
}

impl IntakeLog {
    /// New log with a fresh opaque id.
    pub fn new(amount: f64, kind: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            amount,
            kind: kind.into(),
            timestamp,
        }
    }
}

/// Total for one calendar day, compared against the current goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Day key, `YYYY-MM-DD` in local time.
    pub date: String,
    pub total: f64,
    pub goal: u32,
}

impl DailySummary {
    pub fn goal_met(&self) -> bool {
        self.total >= f64::from(self.goal)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Non-water drinks, credited at a fraction of their volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beverage {
    Coffee,
    Tea,
    Juice,
}

impl Beverage {
    pub const ALL: [Beverage; 3] = [Beverage::Coffee, Beverage::Tea, Beverage::Juice];

    pub fn label(self) -> &'static str {
        match self {
            Beverage::Coffee => "Coffee",
            Beverage::Tea => "Tea",
            Beverage::Juice => "Juice",
        }
    }

    /// Nominal serving in mL.
    pub fn volume(self) -> f64 {
        match self {
            Beverage::Coffee | Beverage::Tea => 250.0,
            Beverage::Juice => 300.0,
        }
    }

    pub fn hydrating_factor(self) -> f64 {
        match self {
            Beverage::Coffee => 0.9,
            Beverage::Tea => 0.95,
            Beverage::Juice => 0.85,
        }
    }

    /// Water-equivalent credited for one serving, whole mL.
    pub fn hydration_equivalent(self) -> f64 {
        (self.volume() * self.hydrating_factor()).round()
    }
}

impl std::fmt::Display for Beverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Quick-log water sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterPreset {
    pub label: &'static str,
    pub amount: f64,
}

pub const WATER_PRESETS: [WaterPreset; 4] = [
    WaterPreset {
        label: "Small Glass",
        amount: 200.0,
    },
    WaterPreset {
        label: "Medium Glass",
        amount: 350.0,
    },
    WaterPreset {
        label: "Large Bottle",
        amount: 500.0,
    },
    WaterPreset {
        label: "Large Bottle XL",
        amount: 750.0,
    },
];

/// Label used for plain water logs.
pub const WATER: &str = "Water";
