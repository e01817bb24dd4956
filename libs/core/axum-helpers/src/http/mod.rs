//! HTTP middleware shared by the web apps.

pub mod security;

pub use security::security_headers;
