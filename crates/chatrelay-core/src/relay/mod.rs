//! The relay: validation, upstream routing and response normalization.

pub mod normalize;
pub mod service;
