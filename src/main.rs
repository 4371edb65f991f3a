use std::sync::Arc;
use tokenmill::api;
use tokenmill::logger::{self, LogConfig, info};
use tokenmill::server::Server;
use tokenmill::settings::{Cli, Parser, parse_settings};
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    logger::init(&LogConfig {
        filter: project_settings.log.filter.clone(),
        security_log_path: project_settings.log.security_log_path.clone(),
    })?;
    info!(?project_settings);

    let address: std::net::SocketAddr = project_settings.http.address.parse()?;

    let server = Arc::new(Server::try_new(&project_settings).await?);

    let api_v1 = warp::path("api")
        .and(warp::path("v1"))
        .and(api::v1::routes(server.clone()))
        .recover(api::v1::recover_error);

    warp::serve(api_v1)
        .bind_with_graceful_shutdown(address, async {
            signal::ctrl_c().await.expect("Could not register SIGINT");
        })
        .1
        .await;

    server.shutdown().await;

    Ok(())
}
