mod token_repo_mysql;
mod user_repo_mysql;

pub use token_repo_mysql::*;
pub use user_repo_mysql::*;
