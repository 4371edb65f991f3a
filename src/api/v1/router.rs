use super::handler;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let create_tokens = warp::post()
        .and(warp::path("auth"))
        .and(warp::path("token"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.token_service.clone()))
        .and_then(handler::create_tokens);

    let refresh_tokens = warp::post()
        .and(warp::path("auth"))
        .and(warp::path("refresh"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.token_service.clone()))
        .and_then(handler::refresh_tokens);

    create_tokens.or(refresh_tokens)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}
