//! Batch Statistics & Reporting
//!
//! Aggregations over recorded history: per-batch stats, dashboard
//! summaries, the activity feed, and tabular report rows.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::lifecycle::mortality_rate;
use crate::types::Batch;

// ============================================================================
// Per-Batch Stats
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchStats {
    pub total_mortality: u32,
    /// Percentage of the initial count lost (0-100).
    pub mortality_rate: f64,
    pub average_daily_feed_lbs: f64,
}

/// Aggregate a batch's recorded history. An empty history yields zeroes,
/// never NaN.
pub fn batch_stats(batch: &Batch) -> BatchStats {
    let total_mortality: u32 = batch.daily_records.iter().map(|r| r.mortality).sum();
    let total_feed: f64 = batch.daily_records.iter().map(|r| r.feed_consumed_lbs).sum();

    let average_daily_feed_lbs = if batch.daily_records.is_empty() {
        0.0
    } else {
        total_feed / batch.daily_records.len() as f64
    };

    BatchStats {
        total_mortality,
        mortality_rate: mortality_rate(batch.initial_bird_count, batch.current_bird_count),
        average_daily_feed_lbs,
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Birds currently in care across all batches.
pub fn total_birds(batches: &[Batch]) -> u32 {
    batches.iter().map(|b| b.current_bird_count).sum()
}

/// An upcoming scheduled action for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingAction {
    pub date: NaiveDate,
    pub action: String,
    pub batch_id: String,
}

/// Feed transitions and pasture moves falling within `window_days` of
/// `today` (inclusive on both ends), sorted by date.
pub fn upcoming_actions(batches: &[Batch], today: NaiveDate, window_days: i64) -> Vec<UpcomingAction> {
    let horizon = today + Duration::days(window_days);
    let mut actions = Vec::new();

    for batch in batches {
        for transition in &batch.feed_transitions {
            if transition.date >= today && transition.date <= horizon {
                actions.push(UpcomingAction {
                    date: transition.date,
                    action: format!("Feed transition to {}", transition.to_feed_type),
                    batch_id: batch.id.clone(),
                });
            }
        }

        for movement in &batch.pasture_movements {
            if movement.date >= today && movement.date <= horizon {
                actions.push(UpcomingAction {
                    date: movement.date,
                    action: format!("Pasture move to {}", movement.to_location),
                    batch_id: batch.id.clone(),
                });
            }
        }
    }

    actions.sort_by_key(|a| a.date);
    actions
}

// ============================================================================
// Activity Feed
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Mortality,
    Feed,
    WeightSample,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub date: NaiveDate,
    pub kind: ActivityKind,
    pub detail: String,
    pub notes: Option<String>,
}

/// Newest-first feed of what happened to a batch, derived from its daily
/// records. A record with several event types yields several entries.
pub fn activity_log(batch: &Batch) -> Vec<ActivityEntry> {
    let mut records: Vec<_> = batch.daily_records.iter().collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));

    let mut entries = Vec::new();
    for record in records {
        let notes = if record.notes.is_empty() {
            None
        } else {
            Some(record.notes.clone())
        };

        if record.mortality > 0 {
            entries.push(ActivityEntry {
                date: record.date,
                kind: ActivityKind::Mortality,
                detail: format!("Lost {} birds", record.mortality),
                notes: notes.clone(),
            });
        }

        if record.feed_consumed_lbs > 0.0 {
            entries.push(ActivityEntry {
                date: record.date,
                kind: ActivityKind::Feed,
                detail: format!("{} lbs of feed consumed", record.feed_consumed_lbs),
                notes: notes.clone(),
            });
        }

        if !record.weight_samples.is_empty() {
            let avg: f64 = record.weight_samples.iter().map(|s| s.weight_lbs).sum::<f64>()
                / record.weight_samples.len() as f64;
            entries.push(ActivityEntry {
                date: record.date,
                kind: ActivityKind::WeightSample,
                detail: format!("Average weight: {:.2} lbs", avg),
                notes,
            });
        }
    }

    entries
}

// ============================================================================
// Report Rows
// ============================================================================

/// One per-day row for report tables and charts. `None` fields render as
/// a dash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub avg_weight_lbs: Option<f64>,
    pub feed_lbs: Option<f64>,
    pub mortality: Option<u32>,
    pub notes: Option<String>,
}

/// Daily records flattened into report rows, oldest first.
pub fn report_rows(batch: &Batch) -> Vec<ReportRow> {
    let mut records: Vec<_> = batch.daily_records.iter().collect();
    records.sort_by_key(|r| r.date);

    records
        .into_iter()
        .map(|record| {
            let avg_weight_lbs = if record.weight_samples.is_empty() {
                None
            } else {
                Some(
                    record.weight_samples.iter().map(|s| s.weight_lbs).sum::<f64>()
                        / record.weight_samples.len() as f64,
                )
            };

            ReportRow {
                date: record.date,
                avg_weight_lbs,
                feed_lbs: (record.feed_consumed_lbs > 0.0).then_some(record.feed_consumed_lbs),
                mortality: (record.mortality > 0).then_some(record.mortality),
                notes: (!record.notes.is_empty()).then(|| record.notes.clone()),
            }
        })
        .collect()
}
