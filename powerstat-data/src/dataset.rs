use std::collections::BTreeSet;

use chrono::Datelike;
use serde::Serialize;

use crate::error::{ParseError, StatsError};
use crate::import::{parse_row, RawRow};
use crate::models::{DrawRecord, Pool, MAIN_COUNT};

/// Sélection par inclusion : un ensemble vide ne retient aucun tirage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DrawFilter {
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u32>,
}

impl DrawFilter {
    pub fn new(years: impl IntoIterator<Item = i32>, months: impl IntoIterator<Item = u32>) -> Self {
        Self {
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
        }
    }

    /// Toutes les années présentes dans le jeu de données, tous les mois.
    pub fn all(dataset: &DrawDataset) -> Self {
        Self::new(dataset.years(), 1..=12)
    }

    pub fn matches(&self, draw: &DrawRecord) -> bool {
        self.years.contains(&draw.date.year()) && self.months.contains(&draw.date.month())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawDataset {
    records: Vec<DrawRecord>,
    filter: Option<DrawFilter>,
}

impl DrawDataset {
    pub fn new(records: Vec<DrawRecord>) -> Self {
        Self {
            records,
            filter: None,
        }
    }

    /// Échoue sur la première ligne invalide.
    pub fn load(rows: &[RawRow]) -> Result<Self, ParseError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| parse_row(row).map_err(|kind| ParseError { row: i + 1, kind }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(records))
    }

    pub fn filter(&self, filter: &DrawFilter) -> Self {
        let records: Vec<DrawRecord> = self
            .records
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        log::debug!(
            "Filtre {:?}/{:?} : {} tirages sur {}",
            filter.years,
            filter.months,
            records.len(),
            self.records.len()
        );
        Self {
            records,
            filter: Some(filter.clone()),
        }
    }

    pub fn active_filter(&self) -> Option<&DrawFilter> {
        self.filter.as_ref()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Années distinctes, triées.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|d| d.date.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Les `n` derniers tirages dans l'ordre du fichier.
    pub fn tail(&self, n: usize) -> &[DrawRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn pool(&self, pool: Pool) -> Vec<u8> {
        self.records
            .iter()
            .flat_map(|d| pool.numbers_from(d).iter().copied())
            .collect()
    }

    pub fn main_number_pool(&self) -> Vec<u8> {
        self.pool(Pool::Main)
    }

    /// `slot` va de 1 à 5.
    pub fn position_pool(&self, slot: usize) -> Result<Vec<u8>, StatsError> {
        if !(1..=MAIN_COUNT).contains(&slot) {
            return Err(StatsError::InvalidSlot(slot));
        }
        Ok(self.records.iter().map(|d| d.main[slot - 1]).collect())
    }

    pub fn powerball_pool(&self) -> Vec<u8> {
        self.pool(Pool::Powerball)
    }
}
