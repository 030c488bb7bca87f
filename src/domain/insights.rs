//! Trend figures and milestones shown next to the history window.

use crate::domain::entities::{DailySummary, StreakStats};

/// Single-day total that earns the "Gallon Chugger" milestone, mL.
pub const GALLON_ML: f64 = 3800.0;

/// Progress towards `goal` in percent. Not capped at 100.
pub fn progress_percent(total: f64, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    total / f64::from(goal) * 100.0
}

/// `>= 1000` mL as litres with one decimal, otherwise whole mL.
pub fn format_volume(ml: f64) -> String {
    if ml >= 1000.0 {
        format!("{:.1}L", ml / 1000.0)
    } else {
        format!("{}ml", ml.round() as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryInsights {
    /// Mean over the whole window, empty days included, whole mL.
    pub average_daily: f64,
    pub goals_met: usize,
    pub days: usize,
}

impl HistoryInsights {
    pub fn from_history(history: &[DailySummary]) -> Self {
        let days = history.len();
        let sum: f64 = history.iter().map(|d| d.total).sum();
        let average_daily = if days == 0 {
            0.0
        } else {
            (sum / days as f64).round()
        };
        Self {
            average_daily,
            goals_met: history.iter().filter(|d| d.goal_met()).count(),
            days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    StreakStarter,
    GallonChugger,
    WaterLegend,
}

impl Milestone {
    pub const ALL: [Milestone; 3] = [
        Milestone::StreakStarter,
        Milestone::GallonChugger,
        Milestone::WaterLegend,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Milestone::StreakStarter => "Streak Starter",
            Milestone::GallonChugger => "Gallon Chugger",
            Milestone::WaterLegend => "Water Legend",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Milestone::StreakStarter => "Hit your goal 3 days in a row",
            Milestone::GallonChugger => "Drink over 3.8L in one day",
            Milestone::WaterLegend => "Hit a 7-day streak",
        }
    }

    pub fn achieved(self, streaks: &StreakStats, today_total: f64) -> bool {
        match self {
            Milestone::StreakStarter => streaks.current_streak >= 3,
            Milestone::GallonChugger => today_total > GALLON_ML,
            Milestone::WaterLegend => streaks.best_streak >= 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, total: f64) -> DailySummary {
        DailySummary {
            date: date.to_string(),
            total,
            goal: 2000,
        }
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(350.0), "350ml");
        assert_eq!(format_volume(999.6), "1000ml");
        assert_eq!(format_volume(1000.0), "1.0L");
        assert_eq!(format_volume(2540.0), "2.5L");
        assert_eq!(format_volume(0.0), "0ml");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(1000.0, 2000), 50.0);
        assert_eq!(progress_percent(3000.0, 2000), 150.0);
        assert_eq!(progress_percent(500.0, 0), 0.0);
    }

    #[test]
    fn test_history_insights() {
        let history = vec![
            day("2024-03-04", 2100.0),
            day("2024-03-05", 0.0),
            day("2024-03-06", 1999.0),
            day("2024-03-07", 2000.0),
            day("2024-03-08", 0.0),
            day("2024-03-09", 500.0),
            day("2024-03-10", 250.0),
        ];
        let insights = HistoryInsights::from_history(&history);
        // 6849 / 7 = 978.43
        assert_eq!(insights.average_daily, 978.0);
        assert_eq!(insights.goals_met, 2);
        assert_eq!(insights.days, 7);

        let empty = HistoryInsights::from_history(&[]);
        assert_eq!(empty.average_daily, 0.0);
        assert_eq!(empty.goals_met, 0);
    }

    #[test]
    fn test_milestones() {
        let streaks = StreakStats {
            current_streak: 3,
            best_streak: 6,
        };
        assert!(Milestone::StreakStarter.achieved(&streaks, 0.0));
        assert!(!Milestone::WaterLegend.achieved(&streaks, 0.0));
        assert!(!Milestone::GallonChugger.achieved(&streaks, 3800.0));
        assert!(Milestone::GallonChugger.achieved(&streaks, 3801.0));

        let legend = StreakStats {
            current_streak: 0,
            best_streak: 7,
        };
        assert!(Milestone::WaterLegend.achieved(&legend, 0.0));
        assert!(!Milestone::StreakStarter.achieved(&legend, 0.0));
    }
}
