mod secret_generator;
mod token_codec;
mod token_service;

pub use secret_generator::*;
pub use token_codec::*;
pub use token_service::*;
