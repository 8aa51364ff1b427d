use flock::stats::{total_birds, upcoming_actions};
use flock::types::BatchStatus;

use crate::commands::{format_date, parse_date};
use crate::state::{AppState, DashboardData, UpcomingActionData};

/// Actions within this many days show up on the dashboard.
const UPCOMING_WINDOW_DAYS: i64 = 3;

pub fn get_dashboard(state: &AppState, today: String) -> Result<DashboardData, String> {
    let today = parse_date(&today)?;
    let store = state.store.lock().unwrap();
    let batches = store.batches();

    let active_batches = batches
        .iter()
        .filter(|b| b.status == BatchStatus::Active)
        .count() as u32;

    let upcoming_actions = upcoming_actions(batches, today, UPCOMING_WINDOW_DAYS)
        .into_iter()
        .map(|a| UpcomingActionData {
            date: format_date(a.date),
            action: a.action,
            batch_id: a.batch_id,
        })
        .collect();

    Ok(DashboardData {
        active_batches,
        total_birds: total_birds(batches),
        upcoming_actions,
    })
}
