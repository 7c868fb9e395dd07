use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::waypoint::{self, Registry, GREAT_PLATEAU};

pub const SEED_LENGTH: usize = 8;

/// Randomizer options that shape the generated sequence
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RandoFlags {
    /// keep the Great Plateau shrines at the start of the run
    pub plateau_first: bool,
}

#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize,
    clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    #[strum(serialize = "All shrines")]
    AllShrines,
    #[strum(serialize = "Plateau first")]
    PlateauFirst,
}

impl Preset {
    pub fn flags(self) -> RandoFlags {
        match self {
            Preset::AllShrines => RandoFlags {
                plateau_first: false,
            },
            Preset::PlateauFirst => RandoFlags {
                plateau_first: true,
            },
        }
    }

    pub fn next(self) -> Self {
        match self {
            Preset::AllShrines => Preset::PlateauFirst,
            Preset::PlateauFirst => Preset::AllShrines,
        }
    }
}

// FNV-1a; stable across platforms and releases unlike the std hasher
fn seed_to_u64(seed: &str) -> u64 {
    seed.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Shuffles every non Blood Moon waypoint of `registry` using `seed`.
pub fn randomize_with(registry: &Registry, seed: &str, flags: &RandoFlags) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed_to_u64(seed));
    let pool = registry.shuffle_pool();

    if !flags.plateau_first {
        let mut ids = pool;
        ids.shuffle(&mut rng);
        return ids;
    }

    let (mut plateau, mut rest): (Vec<u32>, Vec<u32>) = pool.into_iter().partition(|&id| {
        registry
            .by_id(id)
            .is_some_and(|w| w.in_category(GREAT_PLATEAU))
    });
    plateau.shuffle(&mut rng);
    rest.shuffle(&mut rng);
    plateau.extend(rest);
    plateau
}

/// Deterministic waypoint sequence for a seed and preset.
pub fn randomized_waypoints(seed: &str, flags: &RandoFlags) -> Vec<u32> {
    randomize_with(waypoint::registry(), seed, flags)
}

/// A fresh seed for the seed picker
pub fn random_seed() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SEED_LENGTH)
        .map(char::from)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::registry;

    #[test]
    fn test_same_seed_same_sequence() {
        let flags = RandoFlags::default();
        assert_eq!(
            randomized_waypoints("xyz", &flags),
            randomized_waypoints("xyz", &flags)
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let flags = RandoFlags::default();
        assert_ne!(
            randomized_waypoints("xyz", &flags),
            randomized_waypoints("abc", &flags)
        );
    }

    #[test]
    fn test_sequence_is_permutation_of_pool() {
        let mut ids = randomized_waypoints("seed", &RandoFlags::default());
        let mut pool = registry().shuffle_pool();
        ids.sort_unstable();
        pool.sort_unstable();
        assert_eq!(ids, pool);
    }

    #[test]
    fn test_blood_moon_never_generated() {
        let bm = waypoint::blood_moon_id();
        for seed in ["a", "b", "c", "HELLO123"] {
            assert!(!randomized_waypoints(seed, &Preset::PlateauFirst.flags()).contains(&bm));
        }
    }

    #[test]
    fn test_plateau_first() {
        let ids = randomized_waypoints("xyz", &Preset::PlateauFirst.flags());
        let plateau = waypoint::by_category(GREAT_PLATEAU);
        for id in &ids[..plateau.len()] {
            assert!(waypoint::by_id(*id).unwrap().in_category(GREAT_PLATEAU));
        }
    }

    #[test]
    fn test_preset_cycle() {
        assert_eq!(Preset::AllShrines.next(), Preset::PlateauFirst);
        assert_eq!(Preset::PlateauFirst.next(), Preset::AllShrines);
        assert_eq!(Preset::default().flags(), RandoFlags::default());
    }

    #[test]
    fn test_random_seed_shape() {
        let seed = random_seed();
        assert_eq!(seed.len(), SEED_LENGTH);
        assert!(seed
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
