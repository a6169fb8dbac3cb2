//! Demo: one customer walks through the wizard and places an order.

use acai_storefront::config::StorefrontConfig;
use acai_storefront::lifecycle::{setup_tracing, StorefrontSystem};
use acai_storefront::model::{AddOn, ContactInfo, CrustOption, Money, ProductCreate};
use acai_storefront::store::{CartLine, CartStore, MemoryCartStorage};
use acai_storefront::submission::{submit, SubmitOutcome};
use chrono::{Days, Local};
use std::sync::Arc;
use tracing::{debug, error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let system = StorefrontSystem::new(StorefrontConfig::from_env())?;

    let product_id = system
        .catalog_client
        .create_product(ProductCreate {
            name: "Açaí Celebration Cake".to_string(),
            base_price: Money::from_cents(3_800),
        })
        .await?;

    let cart = CartStore::new(Arc::new(MemoryCartStorage::new()));
    let mut badge = cart.subscribe();

    let mut wizard = system.wizard_for(product_id).await?;

    let date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(2))
        .ok_or("date out of range")?;
    let picker = system.refresh_availability(&mut wizard, date).await?;
    debug!(?picker, "Time picker");
    let availability = wizard.select_date(date)?;
    let slot = *availability.slots().first().ok_or("no pickup slots")?;
    wizard.select_time(slot)?;
    wizard.select_option(CrustOption::Granola)?;
    wizard.set_quantity(2)?;
    wizard.set_add_ons([AddOn::Candles])?;
    wizard.set_gift_message(Some("Feliz aniversário!".to_string()))?;
    wizard.confirm_active()?;
    wizard.set_contact(ContactInfo::new("Ana Souza", "ana@example.com", "(555) 123-4567"))?;

    let price = wizard.price()?;
    info!(unit = %price.unit_price, extras = %price.add_ons_total, total = %price.total, "Ready to submit");

    let span = tracing::info_span!("submit");
    let outcome = submit(&mut wizard, &system.order_client)
        .instrument(span)
        .await?;

    match outcome {
        SubmitOutcome::Placed(order_id) => {
            info!(%order_id, "Order confirmed");
            cart.add(CartLine::new(product_id, "Açaí Celebration Cake", price.unit_price, 2))?;
            if let Ok(event) = badge.try_recv() {
                info!(?event, cart_id = %cart.cart_id(), "Cart updated");
            }
        }
        SubmitOutcome::Rejected { errors, reopened } => {
            for e in &errors {
                warn!(field = %e.field, "{}", e.message);
            }
            warn!(step = %reopened, "Order rejected");
        }
        SubmitOutcome::Failed { message } => error!(%message, "Order failed; try again"),
    }

    drop(wizard);
    system.shutdown().await?;
    Ok(())
}
