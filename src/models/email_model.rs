use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{
    resource::Resource,
    validation::{Payload, TextField, ValidationErrors},
};

const EMAIL_TO: TextField = TextField::required("email_to").max_length(255).email();
const SUBJECT: TextField = TextField::optional("subject").max_length(500);
const MESSAGE: TextField = TextField::optional("message");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmailRecord {
    pub id: i64,
    pub email_to: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailFields {
    pub email_to: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailPatch {
    pub email_to: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Registros de email (`/emails`).
#[derive(Debug, Clone, Copy)]
pub struct Email;

impl Resource for Email {
    const LABEL: &'static str = "Email";
    const TABLE: &'static str = "emails";
    const PATH: &'static str = "/emails";
    const COLUMNS: &'static [&'static str] = &["email_to", "subject", "message"];

    type Record = EmailRecord;
    type Fields = EmailFields;
    type Patch = EmailPatch;

    fn record_id(record: &EmailRecord) -> i64 {
        record.id
    }

    fn validate(payload: &Value) -> Result<EmailFields, ValidationErrors> {
        let mut p = Payload::new(payload, false)?;
        let email_to = p.text(EMAIL_TO);
        let subject = p.text(SUBJECT);
        let message = p.text(MESSAGE);
        p.finish()?;

        Ok(EmailFields {
            email_to: email_to.unwrap_or_default(),
            subject: subject.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }

    fn validate_patch(payload: &Value) -> Result<EmailPatch, ValidationErrors> {
        let mut p = Payload::new(payload, true)?;
        let patch = EmailPatch {
            email_to: p.text(EMAIL_TO),
            subject: p.text(SUBJECT),
            message: p.text(MESSAGE),
        };
        p.finish()?;
        Ok(patch)
    }

    fn column_values(fields: &EmailFields) -> Vec<String> {
        vec![
            fields.email_to.clone(),
            fields.subject.clone(),
            fields.message.clone(),
        ]
    }

    fn patch_values(patch: &EmailPatch) -> Vec<(&'static str, String)> {
        [
            (EMAIL_TO.name, &patch.email_to),
            (SUBJECT.name, &patch.subject),
            (MESSAGE.name, &patch.message),
        ]
        .into_iter()
        .filter_map(|(col, v)| v.clone().map(|v| (col, v)))
        .collect()
    }
}
