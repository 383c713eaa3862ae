//! Core library for the ANVL site.
//!
//! Contains the ROI/impact calculator, lead form validation, contact email
//! composition, the mailer trait, the contact relay, and the client-side form
//! session state machine. This crate performs no I/O of its own: mail
//! delivery and HTTP transport are supplied by `anvl-server` and
//! `anvl-client` through the [`mail::Mailer`] and
//! [`submission::LeadTransport`] traits.

pub mod calculator;
pub mod error;
pub mod lead;
pub mod mail;
pub mod relay;
pub mod submission;
