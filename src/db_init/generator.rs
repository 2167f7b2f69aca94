//! Random SIM and device populations for demo and test databases.
//!
//! Every function takes the random generator explicitly, so a population is
//! fully determined by the seed the generator was built from.

use crate::devices::models::{MAX_SALE_TEMPERATURE, MIN_SALE_TEMPERATURE, NewDevice, READY_STATUS};
use crate::sims::models::{Sim, SimStatus};
use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::Range;

pub const SIM_ID_START: i64 = 10_000_000;
pub const SIM_ID_END: i64 = 10_200_000;
pub const DEVICE_COUNT: usize = 200_000;
pub const INSERT_BATCH_SIZE: usize = 1_000;

/// Countries a generated SIM may belong to. The index doubles as the
/// operator code prefix.
pub const COUNTRIES: [&str; 4] = ["Spain", "Italy", "Germany", "UK"];
const OPERATORS_PER_COUNTRY: i32 = 4;

/// Sizes of a seeding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub sim_ids: Range<i64>,
    pub device_count: usize,
    pub batch_size: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            sim_ids: SIM_ID_START..SIM_ID_END,
            device_count: DEVICE_COUNT,
            batch_size: INSERT_BATCH_SIZE,
        }
    }
}

/// Maps a uniform draw in [0, 1) onto a SIM status:
/// Active ~60%, Waiting for activation ~30%, Deactivated ~9%, Blocked ~1%.
pub fn status_for_draw(draw: f32) -> SimStatus {
    if draw > 0.99 {
        SimStatus::Blocked
    } else if draw > 0.9 {
        SimStatus::Deactivated
    } else if draw > 0.6 {
        SimStatus::WaitingForActivation
    } else {
        SimStatus::Active
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // COUNTRIES has four entries
pub fn generate_sim<R: Rng + ?Sized>(rng: &mut R, id: i64) -> Sim {
    let country_index = rng.random_range(0..COUNTRIES.len());
    let operator_code = 10 * country_index as i32 + rng.random_range(0..OPERATORS_PER_COUNTRY);
    let status = status_for_draw(rng.random::<f32>());

    Sim {
        id,
        operator_code,
        country: COUNTRIES[country_index].to_string(),
        status,
    }
}

/// One SIM per id, returned in random order so that devices drawing from
/// the front of the list do not end up with ascending SIM ids.
pub fn generate_sims<R: Rng + ?Sized>(rng: &mut R, ids: Range<i64>) -> Vec<Sim> {
    let mut sims: Vec<Sim> = ids.map(|id| generate_sim(rng, id)).collect();
    sims.shuffle(rng);
    sims
}

/// SIM ids that have not been handed to a device yet. Each id comes out at
/// most once.
#[derive(Debug)]
pub struct SimPool {
    remaining: std::vec::IntoIter<i64>,
}

impl SimPool {
    pub fn new(sims: &[Sim]) -> Self {
        let ids: Vec<i64> = sims.iter().map(|sim| sim.id).collect();
        Self {
            remaining: ids.into_iter(),
        }
    }

    pub fn take(&mut self) -> Option<i64> {
        self.remaining.next()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Half of the devices come out READY, with a SIM while the pool lasts and a
/// temperature in the sale range. The rest carry no data at all.
pub fn generate_device<R: Rng + ?Sized>(rng: &mut R, pool: &mut SimPool) -> NewDevice {
    if rng.random::<f32>() > 0.5 {
        NewDevice {
            status: Some(READY_STATUS.to_string()),
            sim_id: pool.take(),
            temperature: Some(rng.random_range(MIN_SALE_TEMPERATURE..=MAX_SALE_TEMPERATURE)),
        }
    } else {
        NewDevice::default()
    }
}

pub fn generate_devices<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    pool: &mut SimPool,
) -> Vec<NewDevice> {
    (0..count).map(|_| generate_device(rng, pool)).collect()
}
