pub mod heatmap;
pub mod sampler;

use std::collections::BTreeMap;

use serde::Serialize;

use powerstat_data::error::StatsError;

/// Nombre d'occurrences par valeur, trié par valeur croissante.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable(BTreeMap<u8, u32>);

impl FrequencyTable {
    pub fn get(&self, value: u8) -> u32 {
        self.0.get(&value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0.iter().map(|(&v, &c)| (v, c))
    }

    /// Comptes pour chaque valeur de 1 à `max`, zéros inclus.
    pub fn dense(&self, max: u8) -> Vec<(u8, u32)> {
        (1..=max).map(|v| (v, self.get(v))).collect()
    }
}

impl FromIterator<u8> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for v in iter {
            *counts.entry(v).or_insert(0) += 1;
        }
        Self(counts)
    }
}

pub fn counts(pool: &[u8]) -> FrequencyTable {
    pool.iter().copied().collect()
}

/// Valeur la plus fréquente ; à égalité, la plus petite.
pub fn mode(pool: &[u8]) -> Result<u8, StatsError> {
    counts(pool)
        .iter()
        .max_by_key(|&(v, c)| (c, std::cmp::Reverse(v)))
        .map(|(v, _)| v)
        .ok_or(StatsError::EmptyDataset)
}

pub fn mean(pool: &[u8]) -> Result<f64, StatsError> {
    if pool.is_empty() {
        return Err(StatsError::EmptyDataset);
    }
    let sum: f64 = pool.iter().map(|&v| v as f64).sum();
    Ok(sum / pool.len() as f64)
}

/// Écart-type de population (dénominateur N).
pub fn stddev(pool: &[u8]) -> Result<f64, StatsError> {
    let m = mean(pool)?;
    let variance = pool
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / pool.len() as f64;
    Ok(variance.sqrt())
}

/// Les `k` valeurs les plus fréquentes, à égalité par valeur croissante.
pub fn top_k(pool: &[u8], k: usize) -> Vec<(u8, u32)> {
    let mut ranked: Vec<(u8, u32)> = counts(pool).iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAIN: [u8; 10] = [1, 2, 3, 4, 5, 1, 2, 3, 4, 5];

    #[test]
    fn test_counts() {
        let table = counts(&[3, 1, 3, 7, 3]);
        assert_eq!(table.get(3), 3);
        assert_eq!(table.get(1), 1);
        assert_eq!(table.get(2), 0);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_dense_fills_zeros() {
        let table = counts(&[2, 2, 4]);
        assert_eq!(table.dense(5), vec![(1, 0), (2, 2), (3, 0), (4, 1), (5, 0)]);
    }

    #[test]
    fn test_mode_tie_goes_to_lowest() {
        assert_eq!(mode(&MAIN).unwrap(), 1);
        assert_eq!(mode(&[6, 7]).unwrap(), 6);
        assert_eq!(mode(&[9, 4, 9, 4]).unwrap(), 4);
        assert_eq!(mode(&[9, 4, 9]).unwrap(), 9);
    }

    #[test]
    fn test_mean_and_stddev() {
        assert!((mean(&MAIN).unwrap() - 3.0).abs() < 1e-12);
        // population : sqrt(2), pas sqrt(20/9)
        assert!((stddev(&MAIN).unwrap() - 2.0f64.sqrt()).abs() < 1e-12);
        assert!((mean(&[6, 7]).unwrap() - 6.5).abs() < 1e-12);
        assert!((stddev(&[6, 7]).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(stddev(&[42]).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_pool() {
        assert_eq!(mode(&[]), Err(StatsError::EmptyDataset));
        assert_eq!(mean(&[]), Err(StatsError::EmptyDataset));
        assert_eq!(stddev(&[]), Err(StatsError::EmptyDataset));
        assert!(top_k(&[], 5).is_empty());
    }

    #[test]
    fn test_top_k() {
        let pool = [5, 3, 5, 3, 9, 1, 5];
        assert_eq!(top_k(&pool, 2), vec![(5, 3), (3, 2)]);
        assert_eq!(top_k(&pool, 3), vec![(5, 3), (3, 2), (1, 1)]);
        assert_eq!(top_k(&pool, 10), vec![(5, 3), (3, 2), (1, 1), (9, 1)]);
        assert!(top_k(&pool, 0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_len(pool in proptest::collection::vec(1u8..=69, 0..200)) {
            prop_assert_eq!(counts(&pool).total() as usize, pool.len());
        }

        #[test]
        fn prop_top_k_ordered_and_idempotent(
            pool in proptest::collection::vec(1u8..=26, 0..200),
            k in 0usize..30,
        ) {
            let top = top_k(&pool, k);
            prop_assert_eq!(&top, &top_k(&pool, k));
            prop_assert!(top.len() <= k);
            for w in top.windows(2) {
                prop_assert!(w[0].1 > w[1].1 || (w[0].1 == w[1].1 && w[0].0 < w[1].0));
            }
        }
    }
}
