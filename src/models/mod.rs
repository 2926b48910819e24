// Module exports for models

pub mod appointment;
pub mod dashboard;
pub mod schedule;
pub mod settings;
pub mod view;
