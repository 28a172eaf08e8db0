use ntex::web;
use ntex_cors::Cors;
use std::sync::Arc;
use world_records::config::Config;
use world_records::db::Db;
use world_records::{handlers, telemetry};

#[ntex::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env();
    telemetry::setup_tracing(&config.log_filter);

    let db = Arc::new(Db::open(&config.database_path).map_err(std::io::Error::other)?);

    tracing::info!(address = %config.bind_address(), db = %config.database_path, "World records server starting");

    web::HttpServer::new(move || {
        web::App::new()
            .state(db.clone())
            .wrap(
                Cors::new()
                    .allowed_origin("*")
                    .allowed_methods(vec!["GET", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            .route("/api/health", web::get().to(health))
            .route(
                "/api/users/{user_id}/world-records",
                web::get().to(handlers::world_records::get_world_records),
            )
            .route(
                "/api/users/{user_id}/world-records/detailed",
                web::get().to(handlers::world_records::get_world_records_detailed),
            )
    })
    .bind(config.bind_address())?
    .run()
    .await
}

async fn health() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
