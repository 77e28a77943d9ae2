//! Database models shared across the CRM repository.

pub mod class_list;
#[cfg(feature = "server")]
pub mod config;
pub mod course;
pub mod customer;
pub mod enrollment;
pub mod follow_up;
pub mod payment;
pub mod user_profile;
