use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use slotbook_core::{
    config::CoreConfig, reconcile, registry::SlotRegistry, sample::sample_persons,
    store::PersonStore,
};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = CoreConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Seed the store through the normal conflict checks
    let mut store = PersonStore::with_observer(SlotRegistry::default());
    for person in sample_persons(config.min_slot_duration)? {
        let person = person.migrate_legacy_tags(&config.recurring_tag);
        let name = person.name.clone();
        store
            .add(person)
            .wrap_err_with(|| format!("Failed to load sample contact {}", name))?;
    }
    info!(
        contacts = store.len(),
        booked_slots = store.observer().len(),
        "Loaded sample contacts"
    );

    let reference = config.reference_time_or_now();
    let report = reconcile::run(&mut store, reference);

    if report.is_empty() {
        info!("No past timeslots found to clear or update.");
        return Ok(());
    }
    if !report.deleted.is_empty() {
        info!("Deleted {} past contact(s): {}", report.deleted.len(), report.deleted.join(", "));
    }
    if !report.updated.is_empty() {
        info!("Updated {} recurring contact(s): {}", report.updated.len(), report.updated.join(", "));
    }
    for conflict in &report.conflicts {
        warn!("Could not update recurring contact: {}", conflict);
    }

    Ok(())
}
