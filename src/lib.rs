//! Finsight - Subscription-gated personal finance backend
//!
//! Issues and validates bearer credentials, reconciles asynchronous
//! payment-provider signals into a monotonic per-user subscription state,
//! and gates the finance features behind it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
