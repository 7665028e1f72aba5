//! models/phone_message_model.rs
//! SMS y WhatsApp comparten forma: número de móvil + mensaje.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    resource::Resource,
    validation::{Payload, TextField, ValidationErrors},
};

const MOBILE_NUMBER: TextField = TextField::required("mobile_number").max_length(20);
const MESSAGE: TextField = TextField::required("message");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PhoneMessageRecord {
    pub id: i64,
    pub mobile_number: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

pub type SmsRecord = PhoneMessageRecord;
pub type WhatsAppRecord = PhoneMessageRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneMessageFields {
    pub mobile_number: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneMessagePatch {
    pub mobile_number: Option<String>,
    pub message: Option<String>,
}

fn validate_phone_fields(payload: &Value) -> Result<PhoneMessageFields, ValidationErrors> {
    let mut p = Payload::new(payload, false)?;
    let mobile_number = p.text(MOBILE_NUMBER);
    let message = p.text(MESSAGE);
    p.finish()?;

    Ok(PhoneMessageFields {
        mobile_number: mobile_number.unwrap_or_default(),
        message: message.unwrap_or_default(),
    })
}

fn validate_phone_patch(payload: &Value) -> Result<PhoneMessagePatch, ValidationErrors> {
    let mut p = Payload::new(payload, true)?;
    let patch = PhoneMessagePatch {
        mobile_number: p.text(MOBILE_NUMBER),
        message: p.text(MESSAGE),
    };
    p.finish()?;
    Ok(patch)
}

fn phone_column_values(fields: &PhoneMessageFields) -> Vec<String> {
    vec![fields.mobile_number.clone(), fields.message.clone()]
}

fn phone_patch_values(patch: &PhoneMessagePatch) -> Vec<(&'static str, String)> {
    let mut values = Vec::new();
    if let Some(v) = &patch.mobile_number {
        values.push((MOBILE_NUMBER.name, v.clone()));
    }
    if let Some(v) = &patch.message {
        values.push((MESSAGE.name, v.clone()));
    }
    values
}

/// Registros de SMS (`/sms`).
#[derive(Debug, Clone, Copy)]
pub struct Sms;

/// Registros de WhatsApp (`/whatsapp`).
#[derive(Debug, Clone, Copy)]
pub struct WhatsApp;

impl Resource for Sms {
    const LABEL: &'static str = "SMS";
    const TABLE: &'static str = "sms";
    const PATH: &'static str = "/sms";
    const COLUMNS: &'static [&'static str] = &["mobile_number", "message"];

    type Record = SmsRecord;
    type Fields = PhoneMessageFields;
    type Patch = PhoneMessagePatch;

    fn record_id(record: &PhoneMessageRecord) -> i64 {
        record.id
    }

    fn validate(payload: &Value) -> Result<PhoneMessageFields, ValidationErrors> {
        validate_phone_fields(payload)
    }

    fn validate_patch(payload: &Value) -> Result<PhoneMessagePatch, ValidationErrors> {
        validate_phone_patch(payload)
    }

    fn column_values(fields: &PhoneMessageFields) -> Vec<String> {
        phone_column_values(fields)
    }

    fn patch_values(patch: &PhoneMessagePatch) -> Vec<(&'static str, String)> {
        phone_patch_values(patch)
    }
}

impl Resource for WhatsApp {
    const LABEL: &'static str = "WhatsApp";
    const TABLE: &'static str = "whatsapp";
    const PATH: &'static str = "/whatsapp";
    const COLUMNS: &'static [&'static str] = &["mobile_number", "message"];

    type Record = WhatsAppRecord;
    type Fields = PhoneMessageFields;
    type Patch = PhoneMessagePatch;

    fn record_id(record: &PhoneMessageRecord) -> i64 {
        record.id
    }

    fn validate(payload: &Value) -> Result<PhoneMessageFields, ValidationErrors> {
        validate_phone_fields(payload)
    }

    fn validate_patch(payload: &Value) -> Result<PhoneMessagePatch, ValidationErrors> {
        validate_phone_patch(payload)
    }

    fn column_values(fields: &PhoneMessageFields) -> Vec<String> {
        phone_column_values(fields)
    }

    fn patch_values(patch: &PhoneMessagePatch) -> Vec<(&'static str, String)> {
        phone_patch_values(patch)
    }
}
