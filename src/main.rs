//! Pick Allocator - Binary Entry Point
//!
//! Loads configuration, then replays a short scripted shift against the
//! in-memory engine and prints every allocation.
//!
//! ```text
//! pick-allocator [config.toml]
//! ```
//!
//! `RUST_LOG` controls log output (default `info`).

use std::error::Error;

use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pick_allocator::backend::{MetaBackend, QueueBackend};
use pick_allocator::ingress::{AllocationResponse, OrderRequest, PickerRequest};
use pick_allocator::{Allocation, AllocationEngine, Clock, ConfigLoader};

const STORE: &str = "store-1";

fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing("info");

    let mut loader = ConfigLoader::new();
    if let Some(path) = std::env::args().nth(1) {
        loader = loader.with_file(path);
    }
    let config = loader.load()?;
    info!(ttl_hours = config.score_meta_ttl_hours, "Configuration loaded");

    let engine = AllocationEngine::in_memory(&config);
    let now = Utc::now();

    println!("===========================================");
    println!("  Pick Allocator - scripted shift");
    println!("===========================================");
    println!();

    // Orders arrive before any picker is on the floor
    let orders = [
        ("O-100", 0, 5, 20),
        ("O-101", 45, 5, 20),
        ("O-102", 0, 1, 4),
        ("O-103", -30, 9, 80),
    ];
    for (order_id, minutes_late, priority_order, sku_count) in orders {
        let request = OrderRequest {
            order_id: order_id.to_string(),
            store_id: STORE.to_string(),
            oat_timestamp_ms: Some((now - Duration::minutes(minutes_late)).timestamp_millis()),
            priority_order,
            sku_count,
        };
        let order = request.validate_into(now)?;
        report(engine.submit_order(&order)?);
    }

    println!();
    print_status(&engine)?;
    println!();

    let pickers = [("P-1", 120, 15), ("P-2", 8_000, 700), ("P-3", 0, 0)];
    for (picker_id, sku_completed, order_completed) in pickers {
        let request = PickerRequest {
            picker_id: picker_id.to_string(),
            store_id: STORE.to_string(),
            sku_completed,
            order_completed,
        };
        let picker = request.validate_into()?;
        report(engine.submit_picker(&picker)?);
    }

    // One order left over and no picker
    report(engine.trigger(STORE)?);

    println!();
    print_status(&engine)?;
    Ok(())
}

fn report(allocation: Option<Allocation>) {
    let response = AllocationResponse::from((allocation, STORE));
    match (&response.order_id, &response.picker_id) {
        (Some(order_id), Some(picker_id)) => {
            println!("  {order_id} -> {picker_id}  ({})", response.message)
        }
        _ => println!("  no match    ({})", response.message),
    }
}

fn print_status<Q, M, C>(engine: &AllocationEngine<Q, M, C>) -> Result<(), Box<dyn Error>>
where
    Q: QueueBackend,
    M: MetaBackend,
    C: Clock,
{
    let status = engine.queue_status(STORE)?;
    println!("Queue status for {}:", status.store_id);
    println!("  Orders waiting:  {}", status.size.orders);
    println!("  Pickers waiting: {}", status.size.pickers);
    if let (Some(id), Some(meta)) = (&status.top_order_id, &status.top_order_meta) {
        println!(
            "  Top order: {id} (score {:.4}, {} min late, priority {})",
            meta.final_score, meta.oat_delta_minutes, meta.priority
        );
    }
    if let (Some(id), Some(meta)) = (&status.top_picker_id, &status.top_picker_meta) {
        println!("  Top picker: {id} (score {:.4})", meta.final_score);
    }
    Ok(())
}

fn setup_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
