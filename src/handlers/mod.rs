pub mod templates;
pub mod uploads;
