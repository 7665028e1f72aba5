//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod admin_service;
pub mod error;
pub mod record_service;

use sqlx::{Pool, Sqlite};

use crate::models::{
    email_model::Email,
    phone_message_model::{Sms, WhatsApp},
};
use record_service::RecordService;

/// Los tres stores, compartiendo el mismo pool.
#[derive(Clone)]
pub struct RecordServices {
    pub emails: RecordService<Email>,
    pub sms: RecordService<Sms>,
    pub whatsapp: RecordService<WhatsApp>,
}

impl RecordServices {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        RecordServices {
            emails: RecordService::new(db_pool.clone()),
            sms: RecordService::new(db_pool.clone()),
            whatsapp: RecordService::new(db_pool),
        }
    }
}
