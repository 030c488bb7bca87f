//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Esc at a prompt goes back one level; Ctrl-C ends the session.

use crate::adapters::ui::banner;
use crate::domain::{
    Beverage, Climate, DomainError, Gender, ProfileDetails, UserProfile, WATER_PRESETS,
    WeightUnit, format_volume,
};
use crate::ports::InputPort;
use crate::usecases::{AdviceService, Dashboard, ProfileService, TrackerService};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Width of the history bars, in characters.
const HISTORY_BAR_WIDTH: usize = 20;

const GENDERS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
const WEIGHT_UNITS: [WeightUnit; 2] = [WeightUnit::Kg, WeightUnit::Lbs];
const CLIMATES: [Climate; 4] = [
    Climate::Moderate,
    Climate::HotHumid,
    Climate::Cold,
    Climate::HighAltitude,
];

/// Applies the water theme to every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("💧").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(Color::LightBlue))
        .with_selected_checkbox(Styled::new("[x]").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

/// Esc -> `Ok(None)`, Ctrl-C -> `Interrupted`, anything else -> `Ui`.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(InquireError::OperationInterrupted) => Err(DomainError::Interrupted),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    LogWater,
    LogBeverage,
    LogCustom,
    Today,
    Trends,
    Coach,
    EditProfile,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 8] = [
        MenuAction::LogWater,
        MenuAction::LogBeverage,
        MenuAction::LogCustom,
        MenuAction::Today,
        MenuAction::Trends,
        MenuAction::Coach,
        MenuAction::EditProfile,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::LogWater => "Log water",
            MenuAction::LogBeverage => "Log other beverage",
            MenuAction::LogCustom => "Log custom amount",
            MenuAction::Today => "Today's history",
            MenuAction::Trends => "Trends & streaks",
            MenuAction::Coach => "Ask the coach",
            MenuAction::EditProfile => "Edit profile",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Display wrapper for select lists: label plus the value it stands for.
struct Choice<T> {
    label: String,
    value: T,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn choices<T: Copy + fmt::Display>(values: &[T]) -> Vec<Choice<T>> {
    values
        .iter()
        .map(|v| Choice {
            label: v.to_string(),
            value: *v,
        })
        .collect()
}

/// Index of `current` in `values`, so an edit form starts on the stored option.
fn cursor_at<T: PartialEq>(values: &[T], current: &T) -> usize {
    values.iter().position(|v| v == current).unwrap_or(0)
}

fn local_time(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Text bar for one history row, filled in proportion to the goal.
fn history_bar(total: f64, goal: u32) -> String {
    let ratio = if goal == 0 {
        1.0
    } else {
        (total / f64::from(goal)).clamp(0.0, 1.0)
    };
    let filled = (ratio * HISTORY_BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(HISTORY_BAR_WIDTH - filled)
    )
}

/// Draws today's progress towards the goal and leaves it on screen.
fn render_progress(dash: &Dashboard) {
    let goal = u64::from(dash.goal.max(1));
    let position = (dash.today_total.max(0.0).round() as u64).min(goal);
    let style = ProgressStyle::with_template("{prefix} [{bar:40.cyan/blue}] {msg}")
        .map(|s| s.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let bar = ProgressBar::new(goal)
        .with_style(style)
        .with_prefix("💧")
        .with_message(format!(
            "{} of {} ({:.0}%)",
            format_volume(dash.today_total),
            format_volume(f64::from(dash.goal)),
            dash.progress_percent
        ));
    bar.set_position(position);
    bar.abandon();
    if dash.goal_met {
        println!("🏆 Goal reached!");
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    profiles: Arc<ProfileService>,
    tracker: Arc<TrackerService>,
    advice: Arc<AdviceService>,
}

impl TuiInputPort {
    pub fn new(
        profiles: Arc<ProfileService>,
        tracker: Arc<TrackerService>,
        advice: Arc<AdviceService>,
    ) -> Self {
        Self {
            profiles,
            tracker,
            advice,
        }
    }

    /// Setup form. Pre-filled from `current` when editing. `None` if the user backed out.
    async fn run_setup(
        &self,
        current: Option<&UserProfile>,
    ) -> Result<Option<UserProfile>, DomainError> {
        let base = current
            .map(|p| p.details().clone())
            .unwrap_or_default();

        if current.is_none() {
            println!("Welcome! Let's calculate your personalized daily goal.");
        }

        let Some(name) = answered(Text::new("Your name:").with_default(&base.name).prompt())?
        else {
            return Ok(None);
        };
        let Some(age) = answered(
            CustomType::<f64>::new("Age (years):")
                .with_default(base.age)
                .with_validator(|v: &f64| {
                    if (0.0..=120.0).contains(v) {
                        Ok(Validation::Valid)
                    } else {
                        Ok(Validation::Invalid("Age must be between 0 and 120".into()))
                    }
                })
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(gender) = answered(
            Select::new("Gender:", choices(&GENDERS))
                .with_starting_cursor(cursor_at(&GENDERS, &base.gender))
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(weight_unit) = answered(
            Select::new("Weight unit:", choices(&WEIGHT_UNITS))
                .with_starting_cursor(cursor_at(&WEIGHT_UNITS, &base.weight_unit))
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(weight) = answered(
            CustomType::<f64>::new(&format!("Weight ({}):", weight_unit.value))
                .with_default(base.weight)
                .with_validator(|v: &f64| {
                    if *v > 0.0 {
                        Ok(Validation::Valid)
                    } else {
                        Ok(Validation::Invalid("Weight must be positive".into()))
                    }
                })
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(exercise_minutes_per_session) = answered(
            CustomType::<f64>::new("Exercise minutes per session:")
                .with_default(base.exercise_minutes_per_session)
                .with_validator(|v: &f64| {
                    if *v >= 0.0 {
                        Ok(Validation::Valid)
                    } else {
                        Ok(Validation::Invalid("Minutes cannot be negative".into()))
                    }
                })
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(exercise_days_per_week) = answered(
            CustomType::<f64>::new("Exercise days per week:")
                .with_default(base.exercise_days_per_week)
                .with_validator(|v: &f64| {
                    if (0.0..=7.0).contains(v) {
                        Ok(Validation::Valid)
                    } else {
                        Ok(Validation::Invalid("Days must be between 0 and 7".into()))
                    }
                })
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(climate) = answered(
            Select::new("Climate:", choices(&CLIMATES))
                .with_starting_cursor(cursor_at(&CLIMATES, &base.climate))
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(caffeine_cups) = answered(
            CustomType::<u32>::new("Caffeinated drinks per day:")
                .with_default(base.caffeine_cups)
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        let Some(has_medical_condition) = answered(
            Confirm::new("Any medical condition that affects hydration?")
                .with_default(base.has_medical_condition)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let details = ProfileDetails {
            name: name.trim().to_string(),
            weight,
            weight_unit: weight_unit.value,
            age,
            gender: gender.value,
            exercise_minutes_per_session,
            exercise_days_per_week,
            climate: climate.value,
            caffeine_cups,
            has_medical_condition,
        };
        let profile = self.profiles.save_details(details).await?;
        println!(
            "Your daily goal: {} ({} ml)",
            format_volume(f64::from(profile.daily_goal())),
            profile.daily_goal()
        );
        Ok(Some(profile))
    }

    async fn log_water(&self) -> Result<(), DomainError> {
        let options: Vec<Choice<f64>> = WATER_PRESETS
            .iter()
            .map(|p| Choice {
                label: format!("{} ({}ml)", p.label, p.amount),
                value: p.amount,
            })
            .collect();
        if let Some(choice) = answered(Select::new("How much water?", options).prompt())? {
            let log = self.tracker.add_water(choice.value).await?;
            println!("+{} water", format_volume(log.amount));
        }
        Ok(())
    }

    async fn log_beverage(&self) -> Result<(), DomainError> {
        let options: Vec<Choice<Beverage>> = Beverage::ALL
            .iter()
            .map(|b| Choice {
                label: format!(
                    "{} ({}ml, counts as {}ml)",
                    b.label(),
                    b.volume(),
                    b.hydration_equivalent()
                ),
                value: *b,
            })
            .collect();
        if let Some(choice) = answered(Select::new("Which beverage?", options).prompt())? {
            let log = self.tracker.add_beverage(choice.value).await?;
            println!("+{} {}", format_volume(log.amount), log.kind);
        }
        Ok(())
    }

    async fn log_custom(&self) -> Result<(), DomainError> {
        let amount = answered(
            CustomType::<f64>::new("Amount of water (ml):")
                .with_validator(|v: &f64| {
                    if *v > 0.0 && *v <= 5000.0 {
                        Ok(Validation::Valid)
                    } else {
                        Ok(Validation::Invalid("Enter between 1 and 5000 ml".into()))
                    }
                })
                .prompt(),
        )?;
        if let Some(amount) = amount {
            let log = self.tracker.add_water(amount).await?;
            println!("+{} water", format_volume(log.amount));
        }
        Ok(())
    }

    /// Today's entries, newest first, with delete.
    async fn show_today(&self, profile: &UserProfile) -> Result<(), DomainError> {
        loop {
            let dash = self.tracker.dashboard(profile.daily_goal()).await;
            render_progress(&dash);

            if dash.today_logs.is_empty() {
                println!("No water logged yet today.");
                return Ok(());
            }

            let mut options: Vec<Choice<Option<String>>> = dash
                .today_logs
                .iter()
                .map(|log| Choice {
                    label: format!(
                        "{}  +{}  {}",
                        local_time(log.timestamp),
                        format_volume(log.amount),
                        log.kind
                    ),
                    value: Some(log.id.clone()),
                })
                .collect();
            options.push(Choice {
                label: "Back".to_string(),
                value: None,
            });

            let title = format!("{} entries today. Select one to delete:", dash.today_logs.len());
            let Some(Choice {
                value: Some(id), ..
            }) = answered(Select::new(&title, options).prompt())?
            else {
                return Ok(());
            };
            let confirmed = answered(
                Confirm::new("Delete this entry?")
                    .with_default(false)
                    .prompt(),
            )?
            .unwrap_or(false);
            if confirmed && self.tracker.delete_log(&id).await? {
                println!("Entry deleted.");
            }
        }
    }

    async fn show_trends(&self, profile: &UserProfile) {
        let dash = self.tracker.dashboard(profile.daily_goal()).await;

        println!("\nHydration trends (last 7 days)");
        for day in &dash.history {
            println!(
                "  {}  {}  {:>6} / {}{}",
                day.date,
                history_bar(day.total, day.goal),
                format_volume(day.total),
                format_volume(f64::from(day.goal)),
                if day.goal_met() { "  ✓" } else { "" }
            );
        }

        println!(
            "\n🔥 Current streak: {} days   Best ever: {} days",
            dash.streaks.current_streak, dash.streaks.best_streak
        );
        println!(
            "📈 Avg daily: {}ml   Goals met: {} / {}",
            dash.insights.average_daily, dash.insights.goals_met, dash.insights.days
        );

        println!("\nMilestones");
        for (milestone, done) in &dash.milestones {
            println!(
                "  [{}] {} - {}",
                if *done { "x" } else { " " },
                milestone.label(),
                milestone.description()
            );
        }
        println!();
    }

    async fn show_coach(&self, profile: &UserProfile) {
        let dash = self.tracker.dashboard(profile.daily_goal()).await;

        let spinner = ProgressBar::new_spinner().with_message("Asking your coach...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let tip = self
            .advice
            .tip(profile, dash.today_total, &dash.history)
            .await;
        spinner.finish_and_clear();

        println!("\n💬 {}\n", tip);
    }

    async fn main_menu(&self, profile: &mut UserProfile) -> Result<bool, DomainError> {
        let dash = self.tracker.dashboard(profile.daily_goal()).await;
        if profile.name().is_empty() {
            println!();
        } else {
            println!("\nHello, {}!", profile.name());
        }
        render_progress(&dash);

        let Some(action) =
            answered(Select::new("What next?", MenuAction::ALL.to_vec()).prompt())?
        else {
            return Ok(false);
        };

        match action {
            MenuAction::LogWater => self.log_water().await?,
            MenuAction::LogBeverage => self.log_beverage().await?,
            MenuAction::LogCustom => self.log_custom().await?,
            MenuAction::Today => self.show_today(profile).await?,
            MenuAction::Trends => self.show_trends(profile).await,
            MenuAction::Coach => self.show_coach(profile).await,
            MenuAction::EditProfile => {
                if let Some(updated) = self.run_setup(Some(&*profile)).await? {
                    *profile = updated;
                }
            }
            MenuAction::Quit => return Ok(false),
        }
        Ok(true)
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let stored = self.profiles.load().await?;
        let mut profile = match stored {
            Some(profile) => {
                let dash = self.tracker.dashboard(profile.daily_goal()).await;
                banner::print_banner(Some(&dash));
                profile
            }
            None => {
                banner::print_banner(None);
                match self.run_setup(None).await {
                    Ok(Some(profile)) => profile,
                    Ok(None) | Err(DomainError::Interrupted) => {
                        info!("setup cancelled, exiting");
                        return Ok(());
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        loop {
            match self.main_menu(&mut profile).await {
                Ok(true) => continue,
                Ok(false) | Err(DomainError::Interrupted) => break,
                Err(e) => return Err(e),
            }
        }
        println!("Stay hydrated! 💧");
        Ok(())
    }
}
