//! Data models: the invoice record and configuration.

pub mod config;
pub mod invoice;
