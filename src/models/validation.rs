//! models/validation.rs
//! Validación de payloads JSON contra el contrato de campos de cada recurso.
//!
//! Los mensajes de error siguen el formato que ya consumía el frontend:
//! `{"campo": ["mensaje", ...]}`.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("regex de email inválida")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Errores por campo. Se serializa como objeto plano.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msgs)| format!("{}: {}", field, msgs.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Reglas de un campo de texto.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub name: &'static str,
    pub required: bool,
    pub allow_blank: bool,
    pub max_length: Option<usize>,
    pub email: bool,
}

impl TextField {
    /// Obligatorio y no vacío.
    pub const fn required(name: &'static str) -> Self {
        TextField {
            name,
            required: true,
            allow_blank: false,
            max_length: None,
            email: false,
        }
    }

    /// Opcional; se acepta cadena vacía.
    pub const fn optional(name: &'static str) -> Self {
        TextField {
            name,
            required: false,
            allow_blank: true,
            max_length: None,
            email: false,
        }
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn email(mut self) -> Self {
        self.email = true;
        self
    }
}

/// Lector de un payload que acumula errores de todos los campos.
pub struct Payload<'a> {
    object: &'a Map<String, Value>,
    partial: bool,
    errors: ValidationErrors,
}

impl<'a> Payload<'a> {
    /// `partial = true` para PATCH: los campos ausentes no son obligatorios.
    pub fn new(value: &'a Value, partial: bool) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(object) => Ok(Payload {
                object,
                partial,
                errors: ValidationErrors::new(),
            }),
            other => Err(ValidationErrors::non_field(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_kind(other)
            ))),
        }
    }

    /// Devuelve el valor ya recortado, o `None` si falta o es inválido.
    pub fn text(&mut self, field: TextField) -> Option<String> {
        let object = self.object;
        let raw = match object.get(field.name) {
            None => {
                if field.required && !self.partial {
                    self.errors.add(field.name, "This field is required.");
                }
                return None;
            }
            Some(Value::Null) => {
                self.errors.add(field.name, "This field may not be null.");
                return None;
            }
            Some(Value::String(s)) => s,
            Some(_) => {
                self.errors.add(field.name, "Not a valid string.");
                return None;
            }
        };

        let value = raw.trim();
        if value.is_empty() {
            if field.allow_blank {
                return Some(String::new());
            }
            self.errors.add(field.name, "This field may not be blank.");
            return None;
        }

        let mut ok = true;
        if value.contains('\0') {
            self.errors.add(field.name, "Null characters are not allowed.");
            ok = false;
        }
        if let Some(max) = field.max_length {
            if value.chars().count() > max {
                self.errors.add(
                    field.name,
                    format!("Ensure this field has no more than {} characters.", max),
                );
                ok = false;
            }
        }
        if field.email && !is_valid_email(value) {
            self.errors.add(field.name, "Enter a valid email address.");
            ok = false;
        }

        ok.then(|| value.to_string())
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
