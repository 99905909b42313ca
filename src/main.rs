//! Wiring & DI. Entry point: bootstrap adapters, inject into services,
//! report inventory state. No business logic here; the HTTP/API surface
//! that drives the inbound ports lives outside this repository.

use dotenv::dotenv;
use innkeeper::adapters::persistence::{MemoryStore, SqliteStore};
use innkeeper::ports::{BookingPort, BookingStore, RoomAdmin, RoomDirectory, RoomPort};
use innkeeper::usecases::{BookingLedger, BookingQueryService, RoomService, UuidCodes};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = innkeeper::shared::config::AppConfig::load().unwrap_or_default();

    // --- Store: SQLite when a database directory is configured, otherwise
    // an in-process store (useful for smoke runs; nothing survives exit) ---
    let (rooms, room_admin, bookings) = match cfg.database_dir.as_deref() {
        Some(dir) => {
            let store = Arc::new(
                SqliteStore::connect(dir)
                    .await
                    .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
            );
            info!(path = %store.db_path().display(), "using SQLite store");
            (
                Arc::clone(&store) as Arc<dyn RoomDirectory>,
                Arc::clone(&store) as Arc<dyn RoomAdmin>,
                store as Arc<dyn BookingStore>,
            )
        }
        None => {
            warn!("INNKEEPER_DATABASE_DIR not set, using in-memory store");
            let store = Arc::new(MemoryStore::new());
            (
                Arc::clone(&store) as Arc<dyn RoomDirectory>,
                Arc::clone(&store) as Arc<dyn RoomAdmin>,
                store as Arc<dyn BookingStore>,
            )
        }
    };

    // --- Services ---
    let ledger = BookingLedger::new(
        Arc::clone(&rooms),
        Arc::clone(&bookings),
        Arc::new(UuidCodes),
        cfg.code_attempt_limit_or_default(),
    );
    let room_service = RoomService::new(Arc::clone(&rooms), room_admin);
    let queries = BookingQueryService::new(Arc::clone(&rooms), Arc::clone(&bookings));

    // --- Inventory summary ---
    let room_views = queries
        .all_room_views()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let booked = room_views.iter().filter(|r| r.booked).count();
    let room_types = room_service
        .get_room_types()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let bookings_count = ledger
        .get_all_bookings()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .len();
    info!(
        rooms = room_views.len(),
        booked,
        room_types = room_types.len(),
        bookings = bookings_count,
        "inventory ready"
    );

    Ok(())
}
