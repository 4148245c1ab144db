//! ICP Dashboard: backend for the dashboard, pricing page, and ICP
//! onboarding wizard.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod onboarding;
pub mod pricing;
pub mod server;
