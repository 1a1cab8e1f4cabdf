//! Protocol modules (path parsing, update codec, value rendering).
//!
//! The wire format is path-only: every update is
//! `POST /update/<kind>/<name>/<value>` with `Content-Type: text/plain` and an
//! empty body, every read is `GET /value/<kind>/<name>`. Names are
//! percent-encoded inside their segment; handlers work on decoded segments.
//!
//! All parsers are panic-free: malformed input is reported as `MetricsError`
//! instead of indexing raw segment slices.

pub mod path;
pub mod read;
pub mod render;
pub mod update;

pub use path::{decode_path, split_path};
pub use update::{MetricKind, MetricValue, Update};
