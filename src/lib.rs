//! Flat-file store API: products and orders served over HTTP, persisted as a
//! single JSON document on disk.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod security;
pub mod store;
