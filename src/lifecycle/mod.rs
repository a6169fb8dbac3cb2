//! # System Lifecycle & Orchestration
//!
//! Starts the backend actors, wires them together, and shuts them down.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them at `run()`:
//!
//! ```rust,ignore
//! impl ActorEntity for CakeProduct  { type Context = (); }
//! impl ActorEntity for SlotCapacity { type Context = (); }
//! impl ActorEntity for CakeOrder    { type Context = OrderContext; } // catalog + slots + clock
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. Drop every client the system owns, closing the mailboxes
//! 2. The order actor exits first and drops its context, which holds the
//!    last catalog and slot clients
//! 3. The catalog and slot actors then see their mailboxes close and exit
//!
//! Clients cloned out of the system (a [`Wizard`](crate::wizard::Wizard)'s
//! placement, a test's handle) keep their actor alive until they are dropped
//! too.

pub mod storefront_system;
pub mod tracing;

pub use storefront_system::*;
pub use tracing::*;
