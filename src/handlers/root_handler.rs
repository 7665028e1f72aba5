//! handlers/root_handler.rs
//! Raíz de la API: enlaces absolutos a cada colección.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::{Map, Value};

use crate::models::{
    email_model::Email,
    phone_message_model::{Sms, WhatsApp},
    resource::Resource,
};

/// Prefijo con el que se montó la tabla de rutas ("" en la raíz).
#[derive(Debug, Clone)]
pub struct ApiRoot {
    pub prefix: String,
}

pub async fn api_root(req: HttpRequest, root: web::Data<ApiRoot>) -> impl Responder {
    let base = {
        let info = req.connection_info();
        format!("{}://{}{}", info.scheme(), info.host(), root.prefix)
    };

    let mut links = Map::new();
    add_link::<Email>(&mut links, &base);
    add_link::<Sms>(&mut links, &base);
    add_link::<WhatsApp>(&mut links, &base);

    HttpResponse::Ok().json(Value::Object(links))
}

// "/emails" -> "emails": "http://host/api/emails/"
fn add_link<R: Resource>(links: &mut Map<String, Value>, base: &str) {
    links.insert(
        R::PATH.trim_start_matches('/').to_string(),
        Value::String(format!("{}{}/", base, R::PATH)),
    );
}
