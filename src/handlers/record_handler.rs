//! handlers/record_handler.rs
//! Endpoints CRUD, genéricos sobre el recurso (Email, SMS, WhatsApp).
//!
//! Cada request valida primero y solo después toca el store.

use actix_web::{error::InternalError, web, HttpResponse};
use serde_json::{json, Value};

use crate::models::{resource::Resource, validation::ValidationErrors};
use crate::services::{error::StoreError, record_service::RecordService};

const INVALID_DATA: &str = "Invalid data provided";
const INTERNAL_ERROR: &str = "Internal server error";

/// GET /{resource}
pub async fn list_records<R: Resource>(service: web::Data<RecordService<R>>) -> HttpResponse {
    match service.list().await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => store_failure::<R>("list", e),
    }
}

/// POST /{resource}
pub async fn create_record<R: Resource>(
    service: web::Data<RecordService<R>>,
    body: web::Json<Value>,
) -> HttpResponse {
    let fields = match R::validate(&body) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure::<R>("create", errors),
    };

    match service.insert(&fields).await {
        Ok(record) => {
            log::info!("{} record created: {}", R::LABEL, R::record_id(&record));
            HttpResponse::Created().json(json!({
                "message": format!("{} record created successfully", R::LABEL),
                "data": record
            }))
        }
        Err(e) => store_failure::<R>("create", e),
    }
}

/// GET /{resource}/{id}
pub async fn get_record<R: Resource>(
    service: web::Data<RecordService<R>>,
    path: web::Path<i64>,
) -> HttpResponse {
    match service.get(path.into_inner()).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => store_failure::<R>("retrieve", e),
    }
}

/// PUT /{resource}/{id}
pub async fn replace_record<R: Resource>(
    service: web::Data<RecordService<R>>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    let fields = match R::validate(&body) {
        Ok(fields) => fields,
        Err(errors) => return validation_failure::<R>("replace", errors),
    };

    match service.replace(path.into_inner(), &fields).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => store_failure::<R>("replace", e),
    }
}

/// PATCH /{resource}/{id}
pub async fn update_record<R: Resource>(
    service: web::Data<RecordService<R>>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    let patch = match R::validate_patch(&body) {
        Ok(patch) => patch,
        Err(errors) => return validation_failure::<R>("update", errors),
    };

    match service.update(path.into_inner(), &patch).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => store_failure::<R>("update", e),
    }
}

/// DELETE /{resource}/{id}
pub async fn delete_record<R: Resource>(
    service: web::Data<RecordService<R>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match service.delete(id).await {
        Ok(()) => {
            log::info!("{} record deleted: {}", R::LABEL, id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => store_failure::<R>("delete", e),
    }
}

fn validation_failure<R: Resource>(operation: &str, errors: ValidationErrors) -> HttpResponse {
    log::warn!(
        "Validation error in {} {}: {}",
        R::LABEL,
        operation,
        errors
    );
    HttpResponse::BadRequest().json(json!({
        "error": INVALID_DATA,
        "details": errors
    }))
}

fn store_failure<R: Resource>(operation: &str, err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound => {
            log::debug!("({}) {} record not found", operation, R::LABEL);
            HttpResponse::NotFound().json(json!({
                "error": format!("{} record not found", R::LABEL)
            }))
        }
        StoreError::Storage(e) => {
            // El detalle queda en el log, nunca en la respuesta
            log::error!(
                "({}) Error de almacenamiento en {} ('{}'): {:?}",
                operation,
                R::LABEL,
                R::TABLE,
                e
            );
            HttpResponse::InternalServerError().json(json!({ "error": INTERNAL_ERROR }))
        }
    }
}

/// JSON malformado o content-type incorrecto: 400 con el mismo sobre de validación.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Payload JSON inválido: {}", err);
        let details = ValidationErrors::non_field(err.to_string());
        let response = HttpResponse::BadRequest().json(json!({
            "error": INVALID_DATA,
            "details": details
        }));
        InternalError::from_response(err, response).into()
    })
}

/// Un id que no es entero no puede existir: 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(json!({ "error": "Not found" }));
        InternalError::from_response(err, response).into()
    })
}
