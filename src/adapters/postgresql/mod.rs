//! PostgreSQL database integration
//!
//! This module provides the load step: a pooled client and an adapter that
//! appends masked login rows inside a single transaction.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use models::LoginTable;
