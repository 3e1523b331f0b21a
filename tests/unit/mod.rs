//! Unit tests exercising the engine through the public API

mod common;
mod metrics_tests;
mod period_tests;
