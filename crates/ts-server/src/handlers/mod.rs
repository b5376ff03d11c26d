//! HTTP request handlers.

pub mod suggest;
