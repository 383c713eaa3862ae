//! HTTP route modules.

pub mod calculator;
pub mod contact;
pub mod health;
