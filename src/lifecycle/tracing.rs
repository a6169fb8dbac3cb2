//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); actor log
//! lines carry an `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **Actors**: startup, shutdown, and every Create/Get/List/Update/Delete/Action
//! - **Wizard**: step completions and reopens at `debug`, submissions at `info`
//! - **Orders**: rejections with the number of field errors, slot reservations
//! - **Cart**: every committed change at `debug`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run                          # request payloads too
//! RUST_LOG=acai_storefront::wizard=debug cargo run  # one module
//! ```
//!
//! ## Workflow Trace Example
//!
//! Placing one order at `RUST_LOG=info`:
//!
//! ```text
//! INFO Submitting order slot=2026-10-21@Afternoon total=$47.50
//! INFO submit: Slot reserved order_id=order_1 slot=2026-10-21@Afternoon remaining=7
//! INFO submit: Created entity_type="CakeOrder" id=order_1 size=1
//! INFO submit: Order accepted order_id=order_1
//! INFO submit: Order placed order_id=order_1
//! ```
//!
//! The slot reservation is logged before the order is stored: it happens
//! inside the order's `on_create` hook.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
