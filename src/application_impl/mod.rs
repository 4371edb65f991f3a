mod secret_generator_impl;
mod token_codec_impl;
mod token_service_fake;
mod token_service_impl;

pub use secret_generator_impl::*;
pub use token_codec_impl::*;
pub use token_service_fake::*;
pub use token_service_impl::*;
