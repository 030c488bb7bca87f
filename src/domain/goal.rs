//! Daily hydration goal from biometric and lifestyle inputs.

use crate::domain::entities::{Climate, Gender, ProfileDetails, WeightUnit};

pub const KG_PER_LB: f64 = 0.453592;

/// Lower bound of any computed goal, mL.
pub const MIN_DAILY_GOAL: f64 = 1500.0;
/// Upper bound of any computed goal, mL.
pub const MAX_DAILY_GOAL: f64 = 6000.0;

/// 500 mL per hour of exercise, expressed per minute.
const EXERCISE_ML_PER_MINUTE: f64 = 500.0 / 60.0;
const CAFFEINE_ML_PER_CUP: f64 = 50.0;
const MALE_BONUS_ML: f64 = 250.0;
const MEDICAL_CONDITION_ML: f64 = 300.0;

/// mL per kg of body weight for the given age.
fn base_multiplier(age: f64) -> f64 {
    if age < 30.0 {
        40.0
    } else if age <= 55.0 {
        35.0
    } else if age <= 65.0 {
        30.0
    } else {
        25.0
    }
}

fn climate_adjustment(climate: Climate) -> f64 {
    match climate {
        Climate::HotHumid => 600.0,
        Climate::HighAltitude => 500.0,
        Climate::Cold => 200.0,
        Climate::Moderate => 0.0,
    }
}

pub fn weight_kg(details: &ProfileDetails) -> f64 {
    match details.weight_unit {
        WeightUnit::Lbs => details.weight * KG_PER_LB,
        WeightUnit::Kg => details.weight,
    }
}

/// Goal before the clamp and rounding are applied.
pub fn unclamped_goal(details: &ProfileDetails) -> f64 {
    let mut goal = weight_kg(details) * base_multiplier(details.age);

    // Weekly exercise amortized over seven days.
    goal += details.exercise_minutes_per_session * details.exercise_days_per_week / 7.0
        * EXERCISE_ML_PER_MINUTE;
    goal += climate_adjustment(details.climate);
    if details.gender == Gender::Male {
        goal += MALE_BONUS_ML;
    }
    goal += f64::from(details.caffeine_cups) * CAFFEINE_ML_PER_CUP;
    if details.has_medical_condition {
        goal += MEDICAL_CONDITION_ML;
    }
    goal
}

/// Daily target in mL, always within [1500, 6000].
///
/// Inputs are not validated; out-of-range values are absorbed by the clamp.
pub fn compute_daily_goal(details: &ProfileDetails) -> u32 {
    let goal = unclamped_goal(details);
    // f64::clamp keeps NaN; pin it to the floor instead.
    let clamped = if goal.is_nan() {
        MIN_DAILY_GOAL
    } else {
        goal.clamp(MIN_DAILY_GOAL, MAX_DAILY_GOAL)
    };
    clamped.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ProfileDetails {
        ProfileDetails {
            name: "Test".to_string(),
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

    #[test]
    fn test_reference_profile() {
        assert_eq!(compute_daily_goal(&reference()), 3050);
    }

    #[test]
    fn test_additive_adjustments() {
        let details = ProfileDetails {
            climate: Climate::HotHumid,
            caffeine_cups: 2,
            has_medical_condition: true,
            ..reference()
        };
        assert_eq!(compute_daily_goal(&details), 4050);
    }

    #[test]
    fn test_age_bands() {
        let at = |age: f64| {
            compute_daily_goal(&ProfileDetails {
                age,
                gender: Gender::Female,
                ..reference()
            })
        };
        assert_eq!(at(29.9), 2800);
        assert_eq!(at(30.0), 2450);
        assert_eq!(at(55.0), 2450);
        assert_eq!(at(60.0), 2100);
        assert_eq!(at(65.0), 2100);
        // 70 * 25 = 1750
        assert_eq!(at(66.0), 1750);
    }

    #[test]
    fn test_exercise_is_amortized_over_the_week() {
        let details = ProfileDetails {
            exercise_minutes_per_session: 60.0,
            exercise_days_per_week: 7.0,
            ..reference()
        };
        assert_eq!(compute_daily_goal(&details), 3550);

        let details = ProfileDetails {
            exercise_minutes_per_session: 42.0,
            exercise_days_per_week: 5.0,
            ..reference()
        };
        // 42 * 5 / 7 = 30 minutes a day -> 250 mL
        assert_eq!(compute_daily_goal(&details), 3300);
    }

    #[test]
    fn test_climate_and_gender() {
        let with = |climate, gender| {
            compute_daily_goal(&ProfileDetails {
                climate,
                gender,
                ..reference()
            })
        };
        assert_eq!(with(Climate::HighAltitude, Gender::Other), 3300);
        assert_eq!(with(Climate::Cold, Gender::Female), 3000);
        assert_eq!(with(Climate::Moderate, Gender::Other), 2800);
    }

    #[test]
    fn test_pounds_match_kilograms() {
        let lbs = ProfileDetails {
            weight: 154.0,
            weight_unit: WeightUnit::Lbs,
            ..reference()
        };
        let kg = ProfileDetails {
            weight: 154.0 * KG_PER_LB,
            ..reference()
        };
        assert!((unclamped_goal(&lbs) - unclamped_goal(&kg)).abs() < 1e-9);
        assert!((weight_kg(&lbs) - 69.853168).abs() < 1e-9);
        assert_eq!(compute_daily_goal(&lbs), compute_daily_goal(&kg));
    }

    #[test]
    fn test_clamp_bounds() {
        let tiny = ProfileDetails {
            weight: 10.0,
            gender: Gender::Female,
            ..reference()
        };
        assert_eq!(compute_daily_goal(&tiny), 1500);

        let huge = ProfileDetails {
            weight: 400.0,
            caffeine_cups: 40,
            has_medical_condition: true,
            ..reference()
        };
        assert_eq!(compute_daily_goal(&huge), 6000);

        let negative = ProfileDetails {
            weight: -80.0,
            age: -5.0,
            exercise_minutes_per_session: -30.0,
            exercise_days_per_week: 9.0,
            ..reference()
        };
        assert_eq!(compute_daily_goal(&negative), 1500);

        let nan = ProfileDetails {
            weight: f64::NAN,
            ..reference()
        };
        assert_eq!(compute_daily_goal(&nan), 1500);
    }

    #[test]
    fn test_result_always_in_range() {
        for weight in [-500.0, 0.0, 1.0, 45.0, 90.0, 250.0, 1e9] {
            for age in [-1.0, 0.0, 30.0, 60.0, 99.0] {
                for climate in [
                    Climate::HotHumid,
                    Climate::Moderate,
                    Climate::Cold,
                    Climate::HighAltitude,
                ] {
                    let details = ProfileDetails {
                        weight,
                        age,
                        climate,
                        ..reference()
                    };
                    let goal = compute_daily_goal(&details);
                    assert!((1500..=6000).contains(&goal));
                    assert_eq!(goal, compute_daily_goal(&details));
                }
            }
        }
    }

    #[test]
    fn test_rounds_to_nearest() {
        let at = |age: f64| {
            compute_daily_goal(&ProfileDetails {
                weight: 70.25,
                age,
                gender: Gender::Female,
                ..reference()
            })
        };
        // 70.25 * 35 = 2458.75
        assert_eq!(at(40.0), 2459);
        // 70.25 * 30 = 2107.5
        assert_eq!(at(60.0), 2108);
        // 70.25 * 25 = 1756.25
        assert_eq!(at(70.0), 1756);
    }
}
