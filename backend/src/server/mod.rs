//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};

use civicwatch_backend::Trace;
#[cfg(debug_assertions)]
use civicwatch_backend::doc::ApiDoc;
use civicwatch_backend::domain::IssueSubmissionService;
use civicwatch_backend::domain::ports::{AuthorityNotifier, FixtureAuthorityNotifier};
use civicwatch_backend::inbound::http::error::json_config;
use civicwatch_backend::inbound::http::health::{HealthState, live, ready};
use civicwatch_backend::inbound::http::issues::{list_issues, report_issue};
use civicwatch_backend::inbound::http::state::HttpState;
use civicwatch_backend::outbound::authority::AuthorityHttpNotifier;
use civicwatch_backend::outbound::persistence::{DieselIssueRepository, DieselUserRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP state from configuration.
///
/// Uses database-backed adapters when a pool is available, otherwise the
/// fixture ports answer so the server still starts for smoke testing. The
/// authority notifier falls back to a fixture when no portal URL is
/// configured.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let Some(pool) = &config.db_pool else {
        return Ok(HttpState::default());
    };

    let notifier: Arc<dyn AuthorityNotifier> = match &config.authority_url {
        Some(url) => Arc::new(
            AuthorityHttpNotifier::with_timeout(url.clone(), config.authority_timeout)
                .map_err(std::io::Error::other)?,
        ),
        None => Arc::new(FixtureAuthorityNotifier),
    };

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let service = Arc::new(IssueSubmissionService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselIssueRepository::new(pool.clone())),
        notifier,
        clock,
    ));

    Ok(HttpState::new(service.clone(), service))
}

fn build_app(
    health_state: web::Data<HealthState>,
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
    let api = web::scope("/api/v1")
        .service(report_issue)
        .service(list_issues);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when building adapters or binding the socket
/// fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
