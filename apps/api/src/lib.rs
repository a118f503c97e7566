//! # Tienda API
//!
//! REST server for the Tienda online store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           API Server                                    │
//! │                                                                         │
//! │  Browser ───► CorsLayer ───► TraceLayer ───► Router                    │
//! │                                                │                        │
//! │          ┌──────────┬──────────┬──────────┬────┴─────┐                 │
//! │          ▼          ▼          ▼          ▼          ▼                 │
//! │      products     users      cart      orders    reports               │
//! │          │          │          │          │          │                 │
//! │          └──────────┴──────────┴────┬─────┴──────────┘                 │
//! │                                     ▼                                   │
//! │                          Arc<MemoryStore>                               │
//! │                     (one per process, no persistence)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `TIENDA_HOST` - bind address (default: 0.0.0.0)
//! - `TIENDA_PORT` - HTTP port (default: 8080)
//! - `TIENDA_SEED_DEMO` - insert the demo catalog at startup (default: false)
//! - `TIENDA_REPORT_TOP_LIMIT` - default top-products length (default: 10)
//! - `TIENDA_LOW_STOCK_THRESHOLD` - default low-stock threshold (default: 5)
//! - `RUST_LOG` - log filter (default: `tienda_api=info,tienda_store=info,tower_http=info`)

pub mod config;
pub mod error;
pub mod routes;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;
pub use routes::router;
