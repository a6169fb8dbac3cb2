//! Generic actor framework for the storefront's reference backend.
//!
//! This module provides the building blocks the catalog, pickup-slot and order
//! actors are made of: a uniform CRUD + List + Action message loop over any
//! [`ActorEntity`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that backend records implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns and mutates entities sequentially
//! - [`ResourceClient`] - Typed async handle used by the domain clients
//! - [`FrameworkError`] - Plumbing errors and boxed entity errors
//!
//! # Testing
//!
//! See [`mock`] for an expectation-driven client that needs no running actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
