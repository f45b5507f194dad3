//! Library exports for the URL shortener application
//!
//! Short codes are derived from an MD5 digest of the long URL, so shortening is
//! idempotent. Mappings live in either an in-process table or a persistent redb
//! document table, chosen at startup.

pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod service;
pub mod shortcode;
pub mod store;
