//! Test utilities for the cfenv crates.
//!
//! Provides an in-memory platform environment builder, service descriptor
//! builders and a JSON fixture loader.
//! Import in tests only, never in production code.

pub mod descriptor;
pub mod env;
pub mod fixture;

pub use descriptor::ServiceDescriptor;
pub use env::TestEnv;
pub use fixture::Fixture;
