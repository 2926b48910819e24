//! Console front end: actions, localized labels, view models, notifications,
//! render targets and the screen controllers that tie them to the services.

pub mod actions;
pub mod labels;
pub mod notifications;
pub mod render;
pub mod screens;
pub mod views;

pub use actions::{Action, ActionRouter, Redirect};
pub use labels::Labels;
pub use notifications::{Notification, NotificationCenter, NotificationLevel};
pub use render::{CalendarRenderer, TextRenderer};
pub use screens::{CalendarScreen, DashboardScreen, ScheduleScreen};
