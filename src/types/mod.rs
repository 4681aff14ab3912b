//! Common types used across the KIS client library.

pub mod numeric;
