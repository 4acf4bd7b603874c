pub mod backup_exchange;
pub mod concentration;
pub mod core;
pub mod courses;
pub mod tracker;
