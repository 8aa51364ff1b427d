//! Flock Tracker Shell
//!
//! Headless driver for the batch store: creates a batch, records a few
//! days of events, and prints the dashboard and reports as JSON.

mod commands;
mod state;

use state::AppState;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Flock Tracker starting...");

    let state = AppState::new();

    commands::farm::save_farm_info(
        &state,
        "Jo".to_string(),
        "Harper".to_string(),
        "Hilltop Pastures".to_string(),
        "100 Farm Rd".to_string(),
        String::new(),
        "Springfield".to_string(),
        "VT".to_string(),
        "05156".to_string(),
    )
    .map_err(anyhow::Error::msg)?;

    info!("Known breeds: {:?}", commands::batches::get_breeds());

    let batch = commands::batches::create_batch(
        &state,
        "2025-04-01".to_string(),
        "Cornish Cross".to_string(),
        "100".to_string(),
    )
    .map_err(anyhow::Error::msg)?;
    info!("Created batch {} arriving {}", batch.id, batch.chick_arrival_date);

    commands::batches::update_batch_status(
        &state,
        batch.id.clone(),
        "ACTIVE".to_string(),
        "2025-02-04".to_string(),
    )
    .map_err(anyhow::Error::msg)?;

    // A few days of activity
    commands::records::record_feed(
        &state,
        batch.id.clone(),
        "2025-02-10".to_string(),
        "12.5".to_string(),
        String::new(),
    )
    .map_err(anyhow::Error::msg)?;
    commands::records::record_mortality(
        &state,
        batch.id.clone(),
        "2025-02-10".to_string(),
        "2".to_string(),
        "cold snap".to_string(),
    )
    .map_err(anyhow::Error::msg)?;
    commands::records::record_weather(
        &state,
        batch.id.clone(),
        "2025-02-10".to_string(),
        38.0,
        "cloudy".to_string(),
        None,
    )
    .map_err(anyhow::Error::msg)?;
    commands::records::record_weight(
        &state,
        batch.id.clone(),
        "2025-02-14".to_string(),
        "1.6".to_string(),
        "10".to_string(),
        String::new(),
    )
    .map_err(anyhow::Error::msg)?;

    // Pasture move on the scheduled date, weather permitting
    let check = commands::batches::check_pasture_move(
        &state,
        batch.id.clone(),
        "2025-02-25".to_string(),
        55.0,
        false,
    )
    .map_err(anyhow::Error::msg)?;
    if check.can_move {
        commands::records::record_pasture_move(
            &state,
            batch.id.clone(),
            "2025-02-25".to_string(),
            "Brooder".to_string(),
            "North pasture".to_string(),
        )
        .map_err(anyhow::Error::msg)?;
        info!("Moved batch {} to pasture", batch.id);
    } else {
        info!("Pasture move blocked: {:?}", check.reason);
    }

    let batches = commands::batches::get_batches(&state, "2025-02-16".to_string())
        .map_err(anyhow::Error::msg)?;
    info!("Tracking {} batch(es)", batches.len());

    let detail = commands::batches::get_batch(&state, batch.id.clone(), "2025-02-16".to_string())
        .map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&detail)?);

    let dashboard = commands::dashboard::get_dashboard(&state, "2025-02-16".to_string())
        .map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    let plan = commands::reports::get_feed_plan(&state, batch.id.clone(), "2025-02-16".to_string())
        .map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);

    let log = commands::reports::get_activity_log(&state, batch.id.clone())
        .map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&log)?);

    let rows = commands::reports::get_report_rows(&state, batch.id).map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&rows)?);

    if let Some(farm) = commands::farm::get_farm_info(&state) {
        println!("{}", serde_json::to_string_pretty(&farm)?);
    }

    info!("Done");
    Ok(())
}
