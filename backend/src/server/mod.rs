//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use profile_backend::Trace;
use profile_backend::inbound::http::configure;
use profile_backend::inbound::http::state::HttpState;
use profile_backend::outbound::mongo::MongoStore;
use profile_backend::outbound::userinfo::UserInfoAuthenticator;

use state_builders::{build_http_state, system_clock};

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
}

/// Connect the store, prepare indexes and bind the HTTP listener.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Returns [`std::io::Error`] when the store cannot be configured, index
/// creation fails, the identity provider client cannot be built, or binding
/// the socket fails.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        auth_domain,
        mongo,
    } = config;

    let store = MongoStore::connect(&mongo)
        .await
        .map_err(std::io::Error::other)?;
    store.ensure_indexes().await.map_err(std::io::Error::other)?;

    let authenticator =
        UserInfoAuthenticator::new(&auth_domain).map_err(std::io::Error::other)?;
    let http_state = build_http_state(
        Arc::new(store.users()),
        Arc::new(store.vehicles()),
        Arc::new(authenticator),
        system_clock(),
    );

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "listening");
    Ok(server)
}
