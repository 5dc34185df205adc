//! Tirage pondéré par la fréquence historique.
//!
//! Heuristique d'affichage uniquement : les tirages passés n'ont aucune
//! influence sur les suivants, une grille pondérée n'a pas plus de chances
//! qu'une grille uniforme.

use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use powerstat_data::error::StatsError;
use powerstat_data::models::Pool;

use super::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub main: Vec<u8>,
    pub powerball: u8,
}

/// Sans remise : à chaque étape, probabilité proportionnelle au compte parmi
/// les candidats restants. Résultat trié par ordre croissant.
pub fn weighted_sample<R: Rng + ?Sized>(
    table: &FrequencyTable,
    sample_size: usize,
    max_value: u8,
    rng: &mut R,
) -> Result<Vec<u8>, StatsError> {
    let mut available: Vec<(u8, u32)> = table
        .iter()
        .filter(|&(v, c)| v <= max_value && c > 0)
        .collect();

    if available.len() < sample_size {
        return Err(StatsError::InsufficientCandidates {
            requested: sample_size,
            available: available.len(),
            max_value,
        });
    }

    let mut selected = Vec::with_capacity(sample_size);
    for _ in 0..sample_size {
        let weights: Vec<u32> = available.iter().map(|(_, w)| *w).collect();
        let dist = WeightedIndex::new(&weights).map_err(|_| StatsError::InsufficientCandidates {
            requested: sample_size,
            available: selected.len(),
            max_value,
        })?;
        let idx = dist.sample(rng);
        let (number, _) = available.remove(idx);
        selected.push(number);
    }

    selected.sort_unstable();
    Ok(selected)
}

pub fn generate_picks(
    main: &FrequencyTable,
    powerball: &FrequencyTable,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<Pick>, StatsError> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let balls = weighted_sample(main, Pool::Main.pick_count(), Pool::Main.max(), &mut rng)?;
        let pb = weighted_sample(powerball, Pool::Powerball.pick_count(), Pool::Powerball.max(), &mut rng)?;
        picks.push(Pick {
            main: balls,
            powerball: pb[0],
        });
    }
    log::debug!("{} grille(s) générée(s), seed={:?}", picks.len(), seed);
    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::counts;
    use proptest::prelude::*;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_sample_sorted_distinct() {
        let table = counts(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 3, 3, 7]);
        let sample = weighted_sample(&table, 5, 69, &mut rng(42)).unwrap();
        assert_eq!(sample.len(), 5);
        assert!(sample.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sample_respects_max_value() {
        let table = counts(&[1, 2, 3, 30, 40, 50, 60, 60, 60]);
        for seed in 0..20 {
            let sample = weighted_sample(&table, 3, 26, &mut rng(seed)).unwrap();
            assert_eq!(sample, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_sample_insufficient_candidates() {
        let table = counts(&[1, 2, 3, 70, 80]);
        let err = weighted_sample(&table, 5, 69, &mut rng(1)).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientCandidates {
                requested: 5,
                available: 3,
                max_value: 69,
            }
        );
    }

    #[test]
    fn test_sample_empty_table() {
        let table = FrequencyTable::default();
        assert!(weighted_sample(&table, 1, 26, &mut rng(1)).is_err());
        assert_eq!(weighted_sample(&table, 0, 26, &mut rng(1)).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_sample_favours_frequent_values() {
        let mut pool = vec![1u8; 99];
        pool.push(2);
        let table = counts(&pool);
        let mut r = rng(7);
        let hits = (0..200)
            .filter(|_| weighted_sample(&table, 1, 26, &mut r).unwrap() == vec![1])
            .count();
        assert!(hits > 180, "1 tiré {} fois sur 200", hits);
    }

    #[test]
    fn test_generate_picks_reproducible() {
        let main = counts(&[1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 10, 20, 30]);
        let pb = counts(&[6, 7, 7]);
        let a = generate_picks(&main, &pb, 3, Some(2024)).unwrap();
        let b = generate_picks(&main, &pb, 3, Some(2024)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        for pick in &a {
            assert_eq!(pick.main.len(), 5);
            assert!(pick.powerball == 6 || pick.powerball == 7);
        }
    }

    #[test]
    fn test_generate_picks_propagates_shortage() {
        let main = counts(&[1, 2, 3]);
        let pb = counts(&[6]);
        assert!(matches!(
            generate_picks(&main, &pb, 1, Some(1)),
            Err(StatsError::InsufficientCandidates { requested: 5, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_sample_distinct_bounded_sorted(
            pool in proptest::collection::vec(1u8..=69, 1..300),
            size in 0usize..8,
            max_value in 1u8..=69,
            seed in any::<u64>(),
        ) {
            let table = counts(&pool);
            let candidates = table.iter().filter(|&(v, _)| v <= max_value).count();
            match weighted_sample(&table, size, max_value, &mut rng(seed)) {
                Ok(sample) => {
                    prop_assert!(size <= candidates);
                    prop_assert_eq!(sample.len(), size);
                    prop_assert!(sample.iter().all(|&v| v <= max_value));
                    prop_assert!(sample.windows(2).all(|w| w[0] < w[1]));
                }
                Err(e) => {
                    prop_assert!(size > candidates);
                    let is_shortage = matches!(e, StatsError::InsufficientCandidates { .. });
                    prop_assert!(is_shortage);
                }
            }
        }
    }
}
