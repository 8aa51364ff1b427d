use flock::feed::{estimate_daily_feed, expected_weight};
use flock::lifecycle::feed_type_for_age;
use flock::stats::{activity_log, report_rows, ActivityKind};

use crate::commands::{format_date, parse_date};
use crate::state::{ActivityEntryData, AppState, FeedPlanData, ReportRowData};

pub fn get_activity_log(state: &AppState, batch_id: String) -> Result<Vec<ActivityEntryData>, String> {
    let store = state.store.lock().unwrap();
    let batch = store
        .batch(&batch_id)
        .ok_or_else(|| format!("batch not found: {}", batch_id))?;

    Ok(activity_log(batch)
        .into_iter()
        .map(|entry| ActivityEntryData {
            date: format_date(entry.date),
            kind: match entry.kind {
                ActivityKind::Mortality => "MORTALITY",
                ActivityKind::Feed => "FEED",
                ActivityKind::WeightSample => "WEIGHT_SAMPLE",
            }
            .to_string(),
            detail: entry.detail,
            notes: entry.notes,
        })
        .collect())
}

pub fn get_report_rows(state: &AppState, batch_id: String) -> Result<Vec<ReportRowData>, String> {
    let store = state.store.lock().unwrap();
    let batch = store
        .batch(&batch_id)
        .ok_or_else(|| format!("batch not found: {}", batch_id))?;

    Ok(report_rows(batch)
        .into_iter()
        .map(|row| ReportRowData {
            date: format_date(row.date),
            avg_weight_lbs: row.avg_weight_lbs,
            feed_lbs: row.feed_lbs,
            mortality: row.mortality,
            notes: row.notes,
        })
        .collect())
}

/// Planning numbers for today: the feed stage the batch should be on,
/// the expected per-bird weight, and the estimated whole-flock feed.
pub fn get_feed_plan(state: &AppState, batch_id: String, today: String) -> Result<FeedPlanData, String> {
    let today = parse_date(&today)?;
    let store = state.store.lock().unwrap();
    let batch = store
        .batch(&batch_id)
        .ok_or_else(|| format!("batch not found: {}", batch_id))?;

    let age = batch.age_in_days(today);
    let weight = expected_weight(age);

    Ok(FeedPlanData {
        batch_id: batch.id.clone(),
        age_in_days: age,
        feed_type: feed_type_for_age(age, &batch.breed).to_string(),
        expected_weight_lbs: weight,
        estimated_daily_feed_lbs: estimate_daily_feed(weight, age, batch.current_bird_count, &batch.breed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::batches::create_batch;
    use crate::commands::records::{record_feed, record_mortality, record_weight};

    fn state_with_history() -> (AppState, String) {
        let state = AppState::new();
        let id = create_batch(&state, "2025-04-01".into(), "Cornish Cross".into(), "100".into())
            .unwrap()
            .id;
        record_mortality(&state, id.clone(), "2025-02-10".into(), "2".into(), "cold snap".into())
            .unwrap();
        record_feed(&state, id.clone(), "2025-02-11".into(), "18.5".into(), "".into()).unwrap();
        record_weight(&state, id.clone(), "2025-02-11".into(), "1.2".into(), "10".into(), "".into())
            .unwrap();
        (state, id)
    }

    #[test]
    fn test_activity_log_newest_first() {
        let (state, id) = state_with_history();
        let log = get_activity_log(&state, id).unwrap();

        assert_eq!(log.len(), 3);
        assert_eq!(log[0].date, "2025-02-11");
        assert_eq!(log[2].date, "2025-02-10");
        assert_eq!(log[2].detail, "Lost 2 birds");
        assert_eq!(log[2].notes.as_deref(), Some("cold snap"));
    }

    #[test]
    fn test_report_rows_oldest_first() {
        let (state, id) = state_with_history();
        let rows = get_report_rows(&state, id).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2025-02-10");
        assert_eq!(rows[0].mortality, Some(2));
        assert_eq!(rows[0].feed_lbs, None);
        assert_eq!(rows[1].feed_lbs, Some(18.5));
        assert_eq!(rows[1].avg_weight_lbs, Some(1.2));
    }

    #[test]
    fn test_feed_plan_uses_age() {
        let (state, id) = state_with_history();
        // 10 days after the 2025-02-04 arrival
        let plan = get_feed_plan(&state, id, "2025-02-14".into()).unwrap();

        assert_eq!(plan.age_in_days, 10);
        assert_eq!(plan.feed_type, "STARTER");
        let expected_weight = 0.1 + 10.0 * 0.15;
        assert!((plan.expected_weight_lbs - expected_weight).abs() < 1e-9);
        // 98 birds at 15% of body weight
        let expected_feed = expected_weight * 0.15 * 98.0;
        assert!((plan.estimated_daily_feed_lbs - expected_feed).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_batch() {
        let state = AppState::new();
        assert!(get_activity_log(&state, "20990101-CC".into()).is_err());
        assert!(get_report_rows(&state, "20990101-CC".into()).is_err());
    }
}
