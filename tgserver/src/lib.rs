//! # tgserver - HTTP surface of the TuneGate media gateway
//!
//! Wires the catalog clients ([`tgcatalog`]) and the extraction pipeline
//! ([`tgextract`]) into one axum router:
//!
//! - discovery endpoints returning normalized JSON arrays
//!   (`/search`, `/trending`, `/radio`, `/artists`, `/genre-tracks`,
//!   `/playlist-tracks`);
//! - streaming endpoints relaying a per-request extraction process into
//!   the response body (`/stream`, `/download`, `/download-video`).
//!
//! One lightweight task per request; the only shared state is read-only
//! configuration inside [`AppState`].

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::{init_logging, serve};
pub use state::AppState;
