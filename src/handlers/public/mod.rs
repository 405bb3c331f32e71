// handlers/public/mod.rs - Public handlers (no authentication required)
//
// HTML pages, health, and credential acquisition. Dashboard pages live here
// too: they are gated by path in the access gate rather than by tier.

pub mod auth;
pub mod health;
pub mod pages;

pub use health::health_get;
