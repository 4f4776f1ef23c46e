pub mod analyze;
pub mod assessments;
pub mod config;
pub mod gates;
pub mod health;
pub mod status;
