//! Strana Server - HTTP REST API for the string analyzer
//!
//! Exposes the [`strana`] pipeline over HTTP:
//!
//! - **Analysis**: submit a string and get back its computed properties
//! - **Lookup**: fetch a record by its SHA-256 id
//! - **Filtering**: structured query-string filters and a natural-language
//!   query endpoint
//! - **Deletion**: remove a string by its value
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /health` - Liveness probe
//! - `POST /strings` - Analyze and store a string
//! - `GET /strings` - List strings, optionally filtered
//! - `GET /strings/filter-by-natural-language?query=...` - Natural-language filter
//! - `GET /strings/{id}` - Fetch by SHA-256 id
//! - `DELETE /strings/{value}` - Delete by raw value

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
