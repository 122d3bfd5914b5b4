//! Common types used across the JOJO client library.

pub mod common;

pub use common::*;
