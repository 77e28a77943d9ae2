//! Schema, persistence and write paths for a training-institute CRM.
//!
//! Leads (customers) are tracked by consultants through follow-ups, enrolled
//! into classes, graded per session and billed through payments. Staff
//! access is expressed as roles granting navigation menus.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod registry;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
