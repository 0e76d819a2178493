//! # tgextract - Extraction processes and the streaming relay
//!
//! Given an opaque media identifier and an output mode, [`Extractor`]
//! spawns one external extraction process (yt-dlp by default) with a fixed,
//! mode-specific argument profile. The resulting [`Extraction`] is an
//! exclusively-owned handle over the live process; [`RelayStream`] pipes
//! its stdout into an HTTP response body with flow-controlled backpressure,
//! kills the process when the client disconnects and reaps it on exit.
//!
//! At most one process is ever associated with one in-flight response; the
//! relay never multiplexes.
//!
//! # Example
//!
//! ```no_run
//! use tgextract::{ExtractionMode, ExtractionRequest, Extractor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new("yt-dlp");
//! let request = ExtractionRequest::new("dQw4w9WgXcQ", ExtractionMode::PassthroughAudio);
//! let stream = extractor.spawn(&request)?.into_stream();
//! // hand `stream` to axum::body::Body::from_stream(...)
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extractor;
pub mod mode;
pub mod relay;

pub use error::{Error, Result};
pub use extractor::{Extraction, ExtractionRequest, Extractor};
pub use mode::{watch_url, ExtractionMode};
pub use relay::{RelayStream, RELAY_CHUNK_SIZE};
