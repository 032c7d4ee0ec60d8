//! # Postboard Core
//!
//! The domain layer of Postboard.
//! This crate contains the post entity, its input validation rules and the
//! repository port, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError, ValidationErrors};
