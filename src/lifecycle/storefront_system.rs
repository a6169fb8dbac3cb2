use crate::availability::{Clock, LocalClock, SlotAvailability};
use crate::catalog_actor::CatalogError;
use crate::clients::{CatalogClient, OrderClient, SlotClient};
use crate::config::{ConfigError, StorefrontConfig};
use crate::model::ProductId;
use crate::order_actor::OrderContext;
use crate::slot_actor::SlotError;
use crate::wizard::Wizard;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};

/// Failures while preparing a wizard against the live backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorefrontError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// The running storefront backend: catalog, pickup slots and orders.
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(StorefrontConfig::from_env())?;
/// let product_id = system.catalog_client.create_product(cake).await?;
///
/// let mut wizard = system.wizard_for(product_id).await?;
/// // ... drive the wizard ...
/// submit(&mut wizard, &system.order_client).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    pub catalog_client: CatalogClient,
    pub slot_client: SlotClient,
    pub order_client: OrderClient,
    config: StorefrontConfig,
    clock: Arc<dyn Clock>,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts every actor on the wall clock. Must be called inside a tokio
    /// runtime.
    pub fn new(config: StorefrontConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(LocalClock))
    }

    /// Starts every actor with an injected clock, shared by the order actor
    /// and every wizard this system hands out.
    pub fn with_clock(config: StorefrontConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let (catalog_actor, catalog_client) = crate::catalog_actor::new(config.actor_buffer);
        let (slot_actor, slot_client) = crate::slot_actor::new(config.actor_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.actor_buffer);

        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let slot_handle = tokio::spawn(slot_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext::new(
            catalog_client.clone(),
            slot_client.clone(),
            clock.clone(),
            &config,
        )));

        info!(
            lead_time_hours = config.lead_time_hours,
            slot_capacity = config.slot_capacity,
            "Storefront started"
        );

        Ok(Self {
            catalog_client,
            slot_client,
            order_client,
            config,
            clock,
            handles: vec![catalog_handle, slot_handle, order_handle],
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// A fresh wizard for one product, priced from the live catalog and
    /// aware of every slot that is already fully booked.
    pub async fn wizard_for(&self, product_id: ProductId) -> Result<Wizard, StorefrontError> {
        let product = self.catalog_client.product(product_id).await?;
        let sold_out = self.slot_client.sold_out().await?;
        debug!(sold_out = sold_out.len(), "Seeding wizard availability");

        let mut wizard = Wizard::new(product, &self.config, self.clock.clone());
        for key in sold_out {
            wizard.mark_sold_out(key);
        }
        Ok(wizard)
    }

    /// Re-reads which slots on `date` are full and returns the time picker
    /// state. Call before showing the picker to a wizard that has been open
    /// for a while.
    pub async fn refresh_availability(
        &self,
        wizard: &mut Wizard,
        date: NaiveDate,
    ) -> Result<SlotAvailability, SlotError> {
        let sold_out = self.slot_client.sold_out_on(date).await?;
        wizard.sync_sold_out(date, sold_out);
        Ok(wizard.availability(date))
    }

    /// Drops the system's clients and waits for every actor to exit.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down storefront...");

        drop(self.order_client);
        drop(self.catalog_client);
        drop(self.slot_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
