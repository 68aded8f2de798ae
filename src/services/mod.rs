//! External service interactions
//!
//! This module contains services for talking to the outside world:
//! - CSV normalization into the canonical schema
//! - Worksheet retrieval from the backend
//! - Worksheet dispatch to recipients
//! - Background task execution with stale-result invalidation

pub mod dispatch;
pub mod fetch;
pub mod normalize;
pub mod runner;

pub use dispatch::{send, DispatchAck, DispatchError};
pub use fetch::{backend_url, fetch_csv, FetchError};
pub use normalize::{normalize, ParseError};
pub use runner::TaskRunner;
