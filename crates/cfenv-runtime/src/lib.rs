//! Typed access to a Cloud Foundry style runtime environment.
//!
//! The platform publishes the application instance in `VCAP_APPLICATION`
//! and bound services in `VCAP_SERVICES`, both as JSON. This crate decodes
//! them on demand and resolves service descriptors into the typed service
//! infos of `cfenv-domain`, using a label registry to decide which
//! descriptors belong to which service kind.

pub mod env;
pub mod environment;
pub mod instance;
pub mod registry;
pub mod resolver;
pub mod store;

pub use env::{EnvironmentAccessor, ProcessEnvironment};
pub use environment::CloudEnvironment;
pub use instance::{ApplicationInstanceInfo, InstanceLimits};
pub use registry::LabelRegistry;
pub use resolver::ServiceResolver;
pub use store::ServiceDescriptorStore;
