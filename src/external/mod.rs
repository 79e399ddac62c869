//! Clients for third-party HTTP services.

pub mod client;
pub mod geolocation;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::build_http_client;
pub use geolocation::{CsdnGeoLocator, GeoLocator, contains_country_marker};
