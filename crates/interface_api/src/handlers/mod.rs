//! Request handlers

pub mod auth;
pub mod health;
pub mod invoice;
pub mod product;
pub mod settings;
