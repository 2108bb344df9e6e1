//! Diagnostic logging.
//!
//! Progress lines go to stdout through the event sinks; everything here goes
//! to stderr through `tracing`.

mod logging;

pub use logging::{default_filter, init_logging};
