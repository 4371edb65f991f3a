mod notifier;
mod token_repo;
mod user_repo;

pub use notifier::*;
pub use token_repo::*;
pub use user_repo::*;
