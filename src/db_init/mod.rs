pub mod generator;

use crate::{devices, sims};
use generator::{SeedPlan, SimPool, generate_devices, generate_sims};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{ConnectionTrait, DbErr};
use tracing::info;

/// Database preparation steps requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DbAction {
    /// Delete every device and SIM
    ClearDb,
    /// Fill the database with a random population
    InitDb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub sims_inserted: u64,
    pub devices_inserted: u64,
    pub devices_with_sim: usize,
}

/// Runs the requested actions. Clearing always happens before seeding,
/// whatever the order on the command line.
pub async fn run(
    db: &impl ConnectionTrait,
    actions: &[DbAction],
    seed: Option<u64>,
    plan: &SeedPlan,
) -> Result<Option<SeedSummary>, DbErr> {
    if actions.contains(&DbAction::ClearDb) {
        clear_db(db).await?;
    }

    if !actions.contains(&DbAction::InitDb) {
        return Ok(None);
    }

    let seed = seed.unwrap_or_else(rand::random);
    info!("Seeding database with RNG seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    init_db(db, &mut rng, plan).await.map(Some)
}

pub async fn clear_db(db: &impl ConnectionTrait) -> Result<(), DbErr> {
    info!("Clearing device DB");
    let devices_deleted = devices::services::delete_all_devices(db).await?;
    info!("Clearing sim DB");
    let sims_deleted = sims::services::delete_all_sims(db).await?;
    info!("All databases cleared ({devices_deleted} devices, {sims_deleted} SIMs)");
    Ok(())
}

/// Generates and stores SIMs, then devices drawing SIMs from the shuffled
/// pool. Not atomic: a failure part way leaves whatever was already written.
pub async fn init_db<R: Rng + ?Sized>(
    db: &impl ConnectionTrait,
    rng: &mut R,
    plan: &SeedPlan,
) -> Result<SeedSummary, DbErr> {
    info!("Generating SIMs");
    let new_sims = generate_sims(rng, plan.sim_ids.clone());
    let mut pool = SimPool::new(&new_sims);

    info!("Storing {} SIMs", new_sims.len());
    let sims_inserted = sims::services::insert_sims(db, new_sims, plan.batch_size).await?;

    info!("Generating devices");
    let new_devices = generate_devices(rng, plan.device_count, &mut pool);
    let devices_with_sim = new_devices
        .iter()
        .filter(|device| device.sim_id.is_some())
        .count();

    info!("Storing {} devices", new_devices.len());
    let devices_inserted =
        devices::services::insert_devices(db, new_devices, plan.batch_size).await?;

    let summary = SeedSummary {
        sims_inserted,
        devices_inserted,
        devices_with_sim,
    };
    info!(
        "Database initialized: {} SIMs, {} devices ({} with a SIM, {} SIMs unassigned)",
        summary.sims_inserted,
        summary.devices_inserted,
        summary.devices_with_sim,
        pool.len()
    );

    Ok(summary)
}
