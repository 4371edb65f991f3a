//! In-memory implementations of the storage and notification ports, for
//! tests and local development. The mark-used transition goes through a
//! single sharded-lock entry guard, so it is atomic like its SQL
//! counterpart.

mod notifier_memory;
mod token_repo_memory;
mod user_repo_memory;

pub use notifier_memory::*;
pub use token_repo_memory::*;
pub use user_repo_memory::*;
