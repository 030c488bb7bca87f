//! Intake logging and the derived dashboard.
//!
//! - Owns the in-memory log collection, loaded once from `IntakeLogStore`
//! - Every add/delete persists the whole collection before it is applied in memory
//! - Derived figures are recomputed from the full collection on every call

use crate::domain::streaks::{self, DailyTotals, today_in};
use crate::domain::{
    Beverage, DailySummary, DomainError, HistoryInsights, IntakeLog, Milestone, StreakStats,
    WATER, day_key, progress_percent,
};
use crate::ports::IntakeLogStore;
use chrono::{Local, NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Everything the "today" and "trends" views show.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Day key of today.
    pub today: String,
    /// Today's logs, newest first.
    pub today_logs: Vec<IntakeLog>,
    pub today_total: f64,
    pub goal: u32,
    pub progress_percent: f64,
    pub goal_met: bool,
    pub streaks: StreakStats,
    /// Seven days ending today, oldest first.
    pub history: Vec<DailySummary>,
    pub insights: HistoryInsights,
    pub milestones: Vec<(Milestone, bool)>,
}

pub struct TrackerService {
    store: Arc<dyn IntakeLogStore>,
    logs: RwLock<Vec<IntakeLog>>,
}

impl TrackerService {
    /// Load the stored collection and take ownership of it.
    pub async fn load(store: Arc<dyn IntakeLogStore>) -> Result<Self, DomainError> {
        let logs = store.load_logs().await?;
        info!(count = logs.len(), "intake logs loaded");
        Ok(Self {
            store,
            logs: RwLock::new(logs),
        })
    }

    /// Snapshot of the collection, newest first.
    pub async fn logs(&self) -> Vec<IntakeLog> {
        self.logs.read().await.clone()
    }

    /// Log `amount` mL of `kind` now.
    pub async fn add_log(&self, amount: f64, kind: &str) -> Result<IntakeLog, DomainError> {
        self.add_log_at(amount, kind, Utc::now().timestamp_millis())
            .await
    }

    pub async fn add_water(&self, amount: f64) -> Result<IntakeLog, DomainError> {
        self.add_log(amount, WATER).await
    }

    /// Log one serving of `beverage` at its hydration-equivalent volume.
    pub async fn add_beverage(&self, beverage: Beverage) -> Result<IntakeLog, DomainError> {
        self.add_log(beverage.hydration_equivalent(), beverage.label())
            .await
    }

    pub async fn add_log_at(
        &self,
        amount: f64,
        kind: &str,
        timestamp: i64,
    ) -> Result<IntakeLog, DomainError> {
        let log = IntakeLog::new(amount, kind, timestamp);
        let mut logs = self.logs.write().await;
        let mut next = Vec::with_capacity(logs.len() + 1);
        next.push(log.clone());
        next.extend(logs.iter().cloned());
        self.store.save_logs(&next).await?;
        *logs = next;
        info!(id = %log.id, amount = log.amount, kind = %log.kind, "intake logged");
        Ok(log)
    }

    /// Remove the log with `id`. Returns false (and writes nothing) if there is none.
    pub async fn delete_log(&self, id: &str) -> Result<bool, DomainError> {
        let mut logs = self.logs.write().await;
        if !logs.iter().any(|log| log.id == id) {
            debug!(id, "delete of unknown log ignored");
            return Ok(false);
        }
        let next: Vec<IntakeLog> = logs.iter().filter(|log| log.id != id).cloned().collect();
        self.store.save_logs(&next).await?;
        *logs = next;
        info!(id, "intake log deleted");
        Ok(true)
    }

    /// Dashboard for the local today.
    pub async fn dashboard(&self, goal: u32) -> Dashboard {
        self.dashboard_on(goal, &Local, today_in(&Local)).await
    }

    pub async fn dashboard_on<Tz: TimeZone>(
        &self,
        goal: u32,
        tz: &Tz,
        today: NaiveDate,
    ) -> Dashboard {
        let logs = self.logs.read().await;
        let totals = DailyTotals::from_logs_in(&logs, tz);

        let mut today_logs: Vec<IntakeLog> = streaks::logs_on(&logs, today, tz)
            .into_iter()
            .cloned()
            .collect();
        today_logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let today_total = totals.total_on(today);
        let streak_stats = streaks::streaks_on(&totals, goal, today);
        let history = streaks::history_on(&totals, goal, today);
        let insights = HistoryInsights::from_history(&history);
        let milestones = Milestone::ALL
            .iter()
            .map(|m| (*m, m.achieved(&streak_stats, today_total)))
            .collect();

        Dashboard {
            today: day_key(today),
            today_logs,
            today_total,
            goal,
            progress_percent: progress_percent(today_total, goal),
            goal_met: totals.met_goal(today, goal),
            streaks: streak_stats,
            history,
            insights,
            milestones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;

    const GOAL: u32 = 2000;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ts(day: &str, hour: u32) -> i64 {
        date(day)
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    async fn service() -> (Arc<MemoryStore>, TrackerService) {
        let store = Arc::new(MemoryStore::new());
        let tracker = TrackerService::load(store.clone()).await.unwrap();
        (store, tracker)
    }

    #[tokio::test]
    async fn test_add_prepends_and_persists() {
        let (store, tracker) = service().await;
        let first = tracker.add_water(200.0).await.unwrap();
        let second = tracker.add_beverage(Beverage::Coffee).await.unwrap();

        assert_eq!(second.kind, "Coffee");
        assert_eq!(second.amount, 225.0);

        let logs = tracker.logs().await;
        assert_eq!(logs, vec![second.clone(), first.clone()]);
        assert_eq!(store.load_logs().await.unwrap(), logs);

        let reloaded = TrackerService::load(store).await.unwrap();
        assert_eq!(reloaded.logs().await, logs);
    }

    #[tokio::test]
    async fn test_delete_removes_amount_from_its_day() {
        let (store, tracker) = service().await;
        tracker
            .add_log_at(1500.0, WATER, ts("2024-03-10", 8))
            .await
            .unwrap();
        let tea = tracker
            .add_log_at(238.0, "Tea", ts("2024-03-10", 15))
            .await
            .unwrap();
        tracker
            .add_log_at(700.0, WATER, ts("2024-03-09", 9))
            .await
            .unwrap();

        let before = tracker.dashboard_on(GOAL, &Utc, date("2024-03-10")).await;
        assert_eq!(before.today_total, 1738.0);

        assert!(tracker.delete_log(&tea.id).await.unwrap());
        let after = tracker.dashboard_on(GOAL, &Utc, date("2024-03-10")).await;
        assert_eq!(after.today_total, 1500.0);
        assert_eq!(after.history[5].total, 700.0);
        assert!(store.load_logs().await.unwrap().iter().all(|l| l.id != tea.id));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (store, tracker) = service().await;
        tracker.add_water(350.0).await.unwrap();
        let before = tracker.logs().await;

        assert!(!tracker.delete_log("does-not-exist").await.unwrap());
        assert_eq!(tracker.logs().await, before);
        assert_eq!(store.load_logs().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_dashboard_figures() {
        let (_store, tracker) = service().await;
        for day in ["2024-03-07", "2024-03-08", "2024-03-09"] {
            tracker.add_log_at(2100.0, WATER, ts(day, 12)).await.unwrap();
        }
        tracker
            .add_log_at(1000.0, WATER, ts("2024-03-10", 7))
            .await
            .unwrap();
        tracker
            .add_log_at(500.0, "Juice", ts("2024-03-10", 10))
            .await
            .unwrap();

        let dash = tracker.dashboard_on(GOAL, &Utc, date("2024-03-10")).await;
        assert_eq!(dash.today, "2024-03-10");
        assert_eq!(dash.today_total, 1500.0);
        assert_eq!(dash.progress_percent, 75.0);
        assert!(!dash.goal_met);
        assert_eq!(
            dash.streaks,
            StreakStats {
                current_streak: 3,
                best_streak: 3
            }
        );

        let kinds: Vec<&str> = dash.today_logs.iter().map(|l| l.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Juice", "Water"]);

        assert_eq!(dash.history.len(), 7);
        assert_eq!(dash.insights.goals_met, 3);
        // (3 * 2100 + 1500) / 7 = 1114.29
        assert_eq!(dash.insights.average_daily, 1114.0);

        assert_eq!(
            dash.milestones,
            vec![
                (Milestone::StreakStarter, true),
                (Milestone::GallonChugger, false),
                (Milestone::WaterLegend, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_save_leaves_collection_unchanged() {
        struct ReadOnly;

        #[async_trait::async_trait]
        impl IntakeLogStore for ReadOnly {
            async fn load_logs(&self) -> Result<Vec<IntakeLog>, DomainError> {
                Ok(Vec::new())
            }

            async fn save_logs(&self, _logs: &[IntakeLog]) -> Result<(), DomainError> {
                Err(DomainError::Store("read-only".to_string()))
            }
        }

        let tracker = TrackerService::load(Arc::new(ReadOnly)).await.unwrap();
        assert!(tracker.add_water(500.0).await.is_err());
        assert!(tracker.logs().await.is_empty());
    }
}
