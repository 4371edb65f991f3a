//! Tracing setup. Events with `target: "security"` additionally land in a
//! dedicated append-only log file when one is configured, mirroring the
//! split between the request log and the security audit trail.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
