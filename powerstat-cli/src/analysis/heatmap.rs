use serde::Serialize;

use powerstat_data::dataset::DrawDataset;
use powerstat_data::models::{MAIN_COUNT, MAIN_MAX};

/// Fréquence de chaque boule (1-69) à chaque position de tirage (N1-N5).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionHeatmap {
    cells: Vec<[u32; MAIN_COUNT]>,
}

impl PositionHeatmap {
    /// `number` de 1 à 69, `slot` de 1 à 5 ; 0 hors bornes.
    pub fn get(&self, number: u8, slot: usize) -> u32 {
        if number == 0 || slot == 0 || slot > MAIN_COUNT {
            return 0;
        }
        self.cells
            .get(number as usize - 1)
            .map(|row| row[slot - 1])
            .unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = (u8, &[u32; MAIN_COUNT])> + '_ {
        self.cells.iter().enumerate().map(|(i, row)| (i as u8 + 1, row))
    }

    pub fn max_count(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

pub fn position_heatmap(dataset: &DrawDataset) -> PositionHeatmap {
    let mut cells = vec![[0u32; MAIN_COUNT]; MAIN_MAX as usize];
    for draw in dataset.records() {
        for (slot, &n) in draw.main.iter().enumerate() {
            if let Some(row) = (n as usize).checked_sub(1).and_then(|i| cells.get_mut(i)) {
                row[slot] += 1;
            }
        }
    }
    PositionHeatmap { cells }
}
