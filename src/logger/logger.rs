use anyhow::{Context, Result, anyhow};
use std::fs::{File, OpenOptions, create_dir_all};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{
    EnvFilter, filter::filter_fn, fmt, layer::Layer as _, layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const SECURITY_TARGET: &str = "security";

pub struct LogConfig {
    pub filter: String,
    pub security_log_path: Option<String>,
}

/// Install the global subscriber. Call once, after settings are parsed.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| anyhow!(e))?;
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    match &config.security_log_path {
        Some(path) => {
            let file = open_security_log(path)?;
            let security_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(filter_fn(|meta| meta.target() == SECURITY_TARGET));
            registry.with(security_layer).init();
        }
        None => registry.init(),
    }

    Ok(())
}

fn open_security_log(path: &str) -> Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("creating security log directory {:?}", parent))?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening security log {:?}", path))
}
