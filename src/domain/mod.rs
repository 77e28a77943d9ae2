//! Domain entities of the institute CRM.

pub mod choices;
pub mod class_list;
pub mod course;
pub mod customer;
pub mod enrollment;
pub mod follow_up;
pub mod payment;
pub mod types;
pub mod user_profile;
