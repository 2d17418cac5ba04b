pub mod bulk;
pub mod notify;
pub mod skeleton;
pub mod update;
pub mod upcoming;
pub mod week;

use birthday_core::Birthdays;
use birthday_core::config::BirthdayConfig;
use birthday_core::store::ConfiguredStore;

/// Open the configured store with the configured schema keys.
pub fn open(config: &BirthdayConfig) -> Birthdays<ConfiguredStore> {
    Birthdays::new(
        ConfiguredStore::from_config(&config.store),
        config.schema.clone(),
    )
}
