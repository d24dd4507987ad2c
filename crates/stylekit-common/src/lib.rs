//! # StyleKit Common
//!
//! Logging configuration shared by StyleKit crates, their tools and tests.

pub mod logging;

pub use logging::{init_logging, init_test_logging, LogConfig, LogFormat, LoggingError};
