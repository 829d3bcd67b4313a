use crate::configuration::Settings;
use crate::health::HealthChecker;
use crate::middleware::authentication::TokenVerifier;
use crate::middleware::{ApiKeyGuard, BearerAuth, RoleGuard};
use crate::routes;
use crate::stores::BackingStores;
use actix_web::{dev::Server, http::header, middleware, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub const ADMIN_ROLE: &str = "admin";

pub async fn run(
    listener: TcpListener,
    stores: BackingStores,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let server_header = format!("{} v{}", settings.app.name, settings.app.version);

    let health_checker = web::Data::new(HealthChecker::new(stores, settings.app.version.clone()));
    let verifier = Arc::new(
        TokenVerifier::new(&settings.app.jwt_secret).with_issuer(&settings.app.jwt_issuer),
    );
    let api_key = settings.app.api_key.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::DefaultHeaders::new().add((header::SERVER, server_header.clone())))
            .app_data(health_checker.clone())
            .service(
                web::scope("/api/v1")
                    .service(routes::health_check)
                    .service(
                        web::scope("/me")
                            .wrap(BearerAuth::new(verifier.clone()))
                            .service(routes::me_handler),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(RoleGuard::new(ADMIN_ROLE))
                            .wrap(BearerAuth::new(verifier.clone()))
                            .service(routes::admin_status_handler),
                    )
                    .service(
                        web::scope("/random")
                            .wrap(ApiKeyGuard::new(&api_key))
                            .service(routes::random_number_handler),
                    ),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
