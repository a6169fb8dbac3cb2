use thiserror::Error;

/// Storefront configuration.
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | STOREFRONT_LEAD_TIME_HOURS | 24 | Minimum notice before a pickup slot |
/// | STOREFRONT_SLOT_CAPACITY | 12 | Cakes that fit in one pickup slot |
/// | STOREFRONT_MAX_QUANTITY | 10 | Most cakes in a single order; at most the slot capacity |
/// | STOREFRONT_GIFT_MESSAGE_MAX | 150 | Gift message length, in characters |
/// | STOREFRONT_ACTOR_BUFFER | 32 | Mailbox capacity of each actor |
///
/// ```ignore
/// STOREFRONT_LEAD_TIME_HOURS=48 cargo run
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub lead_time_hours: u32,
    pub slot_capacity: u32,
    pub max_quantity: u32,
    pub gift_message_max: usize,
    pub actor_buffer: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("max_quantity {max_quantity} exceeds slot_capacity {slot_capacity}")]
    QuantityExceedsCapacity {
        max_quantity: u32,
        slot_capacity: u32,
    },
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl StorefrontConfig {
    /// Loads from the environment, falling back to the defaults for unset or
    /// unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lead_time_hours: env_or("STOREFRONT_LEAD_TIME_HOURS", defaults.lead_time_hours),
            slot_capacity: env_or("STOREFRONT_SLOT_CAPACITY", defaults.slot_capacity),
            max_quantity: env_or("STOREFRONT_MAX_QUANTITY", defaults.max_quantity),
            gift_message_max: env_or("STOREFRONT_GIFT_MESSAGE_MAX", defaults.gift_message_max),
            actor_buffer: env_or("STOREFRONT_ACTOR_BUFFER", defaults.actor_buffer),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lead_time_hours == 0 {
            return Err(ConfigError::Zero("lead_time_hours"));
        }
        if self.slot_capacity == 0 {
            return Err(ConfigError::Zero("slot_capacity"));
        }
        if self.max_quantity == 0 {
            return Err(ConfigError::Zero("max_quantity"));
        }
        if self.gift_message_max == 0 {
            return Err(ConfigError::Zero("gift_message_max"));
        }
        if self.actor_buffer == 0 {
            return Err(ConfigError::Zero("actor_buffer"));
        }
        if self.max_quantity > self.slot_capacity {
            return Err(ConfigError::QuantityExceedsCapacity {
                max_quantity: self.max_quantity,
                slot_capacity: self.slot_capacity,
            });
        }
        Ok(())
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            lead_time_hours: 24,
            slot_capacity: 12,
            max_quantity: 10,
            gift_message_max: 150,
            actor_buffer: 32,
        }
    }
}
