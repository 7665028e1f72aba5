use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use messaging_records::app;
use messaging_records::config::app_config::AppConfig;
use messaging_records::db::{run_migrations, setup_database};
use messaging_records::logger::init_logger;
use messaging_records::services::RecordServices;

fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().context("Configuración inválida")?;

    let db_pool = setup_database(&config).await?;
    run_migrations(&db_pool).await?;

    let services = RecordServices::new(db_pool);

    let bind_addr = (config.host.clone(), config.port);
    log::info!(
        "Levantando servidor en {}:{} (prefijo '{}')",
        bind_addr.0,
        bind_addr.1,
        config.api_prefix
    );

    let server_config = config.clone();
    let mut server = HttpServer::new(move || {
        let api_prefix = server_config.api_prefix.clone();
        let services = services.clone();
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&server_config.cors_allowed_origins))
            .wrap(Logger::default())
            .configure(move |cfg| app::init_app(cfg, &api_prefix, services))
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind(bind_addr)
        .context("No se pudo abrir el puerto")?
        .run()
        .await?;

    Ok(())
}
