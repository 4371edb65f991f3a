mod notifier_smtp;

pub use notifier_smtp::*;
