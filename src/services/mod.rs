// Service module exports

pub mod api;
pub mod calendar;
pub mod dashboard;
pub mod schedule;
