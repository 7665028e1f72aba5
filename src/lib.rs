//! Backend de registros de mensajes (Email, SMS, WhatsApp).

pub mod app;
pub mod config;
pub mod db;
pub mod handlers;
pub mod logger;
pub mod models;
pub mod services;

#[cfg(test)]
mod tests;
