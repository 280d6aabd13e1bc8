// src/lib.rs

//! Listing Crawler Library
//!
//! Walks a paginated property index, fans listing ids out to a work queue and
//! keeps a cache-aside store of parsed property details.

pub mod config;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod queue;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_support;
