//! `concierge`: runs a short console session against the in-memory backend.
//!
//! Loads `.env`, reads [`ConsoleConfig`], walks through a visitor check-in
//! and an amenity review, and prints the final console snapshot as JSON.

use concierge_console::domains::amenities::{AmenityAction, AmenityOperation};
use concierge_console::domains::visitors::{VisitorAction, VisitorOperation};
use concierge_console::{ConsoleAction, ConsoleConfig, ConsoleEnvironment, ConsoleReducer, ConsoleState, ConsoleStore, DemoBackend};
use concierge_runtime::metrics::MetricsRecorder;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = ConsoleConfig::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        broadcast_capacity = config.broadcast_capacity,
        shutdown_timeout_secs = config.shutdown_timeout.as_secs(),
        metrics = config.metrics,
        "Configuration loaded"
    );

    let mut recorder = MetricsRecorder::new();
    if config.metrics {
        recorder.install()?;
    }

    let store = ConsoleStore::with_config(
        ConsoleState::default(),
        ConsoleReducer::new(),
        ConsoleEnvironment::connected(Arc::new(DemoBackend::seeded())),
        config.store_config(),
    );

    // Gate desk: list today's visitors, register a walk-in and let them in.
    dispatch(&store, VisitorAction::request(VisitorOperation::FetchVisitors).into()).await?;
    dispatch(
        &store,
        VisitorAction::request_with(
            VisitorOperation::CreateVisitor,
            json!({ "name": "Meera Pillai", "phone": "+91 98450 12345", "flatNumber": "C-301", "status": "pending" }),
        )
        .into(),
    )
    .await?;

    let visitor = store
        .state(|s| s.visitors.selections().visitor.clone())
        .await
        .ok_or("created visitor missing from selection")?;
    dispatch(
        &store,
        VisitorAction::request_with(
            VisitorOperation::ApproveVisitor,
            json!({ "_id": visitor.id, "name": visitor.name, "status": "approved" }),
        )
        .into(),
    )
    .await?;

    // Facilities desk: review the clubhouse slots, then try to approve a booking.
    dispatch(&store, AmenityAction::request(AmenityOperation::FetchAmenities).into()).await?;
    dispatch(
        &store,
        AmenityAction::request_with(AmenityOperation::FetchSlots, json!({ "amenityId": "a-1" })).into(),
    )
    .await?;
    dispatch(
        &store,
        AmenityAction::request_with(AmenityOperation::ApproveBooking, json!({ "_id": "bk-9" })).into(),
    )
    .await?;

    let snapshot = store.snapshot().await;
    if let Some(error) = snapshot.amenities.error() {
        warn!(%error, "Booking approval failed");
    }
    // Leaving the amenity detail screen
    dispatch(&store, AmenityAction::Reset.into()).await?;

    let snapshot = store.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);

    if let Some(text) = recorder.render() {
        println!("{text}");
    }

    store.shutdown_gracefully().await?;
    info!("Console session finished");

    Ok(())
}

/// Dispatch one action and wait for its request to settle
async fn dispatch(store: &ConsoleStore, action: ConsoleAction) -> Result<(), Box<dyn std::error::Error>> {
    let domain = action.domain();
    let mut handle = store.send(action).await?;
    handle.wait_with_timeout(SETTLE_TIMEOUT).await?;

    let status = store.state(|s| s.status(domain)).await;
    info!(%domain, %status, "Action settled");
    Ok(())
}
