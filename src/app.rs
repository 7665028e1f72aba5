//! app.rs
//! Tabla de rutas, construida una sola vez al arrancar.

use actix_web::{web, Scope};

use crate::handlers::record_handler;
use crate::handlers::root_handler::{self, ApiRoot};
use crate::models::{
    email_model::Email,
    phone_message_model::{Sms, WhatsApp},
    resource::Resource,
};
use crate::services::RecordServices;

/// Monta la API bajo `api_prefix` (por defecto `/api`, configurable con
/// `API_PREFIX`; vacío monta en la raíz):
///
/// ```text
/// GET                      {prefix}/
/// GET, POST                {prefix}/{emails|sms|whatsapp}/
/// GET, PUT, PATCH, DELETE  {prefix}/{emails|sms|whatsapp}/{id}/
/// ```
pub fn init_app(cfg: &mut web::ServiceConfig, api_prefix: &str, services: RecordServices) {
    cfg.app_data(record_handler::json_config())
        .app_data(record_handler::path_config())
        .app_data(web::Data::new(ApiRoot {
            prefix: api_prefix.to_string(),
        }))
        .app_data(web::Data::new(services.emails))
        .app_data(web::Data::new(services.sms))
        .app_data(web::Data::new(services.whatsapp));

    if api_prefix.is_empty() {
        cfg.service(web::resource("/").route(web::get().to(root_handler::api_root)))
            .service(resource_scope::<Email>())
            .service(resource_scope::<Sms>())
            .service(resource_scope::<WhatsApp>());
    } else {
        cfg.service(
            web::scope(api_prefix)
                .service(web::resource("").route(web::get().to(root_handler::api_root)))
                .service(resource_scope::<Email>())
                .service(resource_scope::<Sms>())
                .service(resource_scope::<WhatsApp>()),
        );
    }
}

/// Las seis rutas CRUD de un recurso. Las barras finales las quita
/// `NormalizePath` antes de llegar aquí.
fn resource_scope<R: Resource>() -> Scope {
    web::scope(R::PATH)
        .service(
            web::resource("")
                .route(web::get().to(record_handler::list_records::<R>))
                .route(web::post().to(record_handler::create_record::<R>)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(record_handler::get_record::<R>))
                .route(web::put().to(record_handler::replace_record::<R>))
                .route(web::patch().to(record_handler::update_record::<R>))
                .route(web::delete().to(record_handler::delete_record::<R>)),
        )
}
