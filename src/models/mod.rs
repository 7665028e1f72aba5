//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod admin_model;
pub mod email_model;
pub mod phone_message_model;
pub mod resource;
pub mod validation;
