//! Service layer.
//!
//! `AlertService` drives a run; `notifications` holds the channel providers
//! it dispatches to.

mod alert_service;
pub mod notifications;

pub use alert_service::{AlertService, DispatchReport};
