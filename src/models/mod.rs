mod alert;

pub use alert::{AlertInput, AlertMessage, compose_alert};
