//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Nothing outside this module and the actors sends raw
//! [`ResourceRequest`](crate::framework::ResourceRequest)s. Each client turns
//! [`FrameworkError`](crate::framework::FrameworkError)s back into its actor's
//! own error type.

pub mod actor_client;
pub mod catalog_client;
pub mod order_client;
pub mod slot_client;

pub use actor_client::*;
pub use catalog_client::*;
pub use order_client::*;
pub use slot_client::*;
