//! Domain types for reading a Cloud Foundry style runtime environment.
//!
//! This crate contains only pure types with no environment or logging
//! dependencies: attribute bags, service kinds and the typed service infos
//! built from them.

pub mod bag;
pub mod datasource;
mod escape;
pub mod kind;
pub mod mongo;
pub mod rabbit;
pub mod redis;
pub mod service;

pub use bag::AttributeBag;
pub use kind::ServiceKind;
pub use service::{AnyServiceInfo, ServiceInfo, ServiceInfoError};
