//! Core types and trait definitions for seedcrm.
//!
//! This crate is deliberately free of HTTP dependencies. The generator, the
//! workflow engine and the HubSpot client all depend on it; the only seam to
//! the outside world is the [`crm::CrmClient`] trait.

pub mod association;
pub mod crm;
pub mod domain;
pub mod entity;
pub mod error;
pub mod event;
pub mod object;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::{CrmError, Result};
