//! # Açaí Storefront
//!
//! > **Pre-order wizard and backend for açaí cakes with scheduled pickup.**
//!
//! A customer orders a cake in six fixed steps (pickup date, pickup time,
//! crust, quantity, extras, contact details) and then submits. The wizard
//! keeps exactly one step editable, prices the draft from scratch on every
//! read, and refuses pickup slots that start less than the configured lead
//! time (24 hours by default) from now.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Customer Flow ([`wizard`], [`pricing`], [`availability`], [`submission`])
//! - [`Wizard`](wizard::Wizard): step gating, validation, reopen semantics.
//! - [`pricing::compute`]: `(base + crust delta) * quantity + extras`, in cents.
//! - [`AvailabilityGate`](availability::AvailabilityGate): lead time and
//!   sold-out slots, with an explicit "advance notice required" state.
//! - [`submit`](submission::submit): one in-flight submission at a time,
//!   three outcomes (placed, rejected, failed).
//!
//! ### 2. The Cart ([`store`])
//! An owned [`CartStore`](store::CartStore) with subscribe/notify, shared by
//! reference instead of global state.
//!
//! ### 3. The Engine ([`framework`])
//! The generic `ResourceActor<T>` that runs every backend collection. See
//! [`framework::mock`] for testing against scripted actors.
//!
//! ### 4. The Backend ([`catalog_actor`], [`slot_actor`], [`order_actor`], [`clients`])
//! Products, per-slot pickup capacity, and orders. The order actor re-checks
//! every submission against the catalog, the clock and slot capacity.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`StorefrontSystem`](lifecycle::StorefrontSystem) starts and wires the
//! actors from a [`StorefrontConfig`](config::StorefrontConfig).
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod availability;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod slot_actor;
pub mod store;
pub mod submission;
pub mod wizard;
