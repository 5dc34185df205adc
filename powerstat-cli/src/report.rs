use anyhow::{Context, Result};
use serde::Serialize;

use powerstat_data::dataset::{DrawDataset, DrawFilter};
use powerstat_data::error::StatsError;
use powerstat_data::models::{DrawRecord, Pool};

use crate::analysis::heatmap::{position_heatmap, PositionHeatmap};
use crate::analysis::{counts, mean, mode, stddev, top_k, FrequencyTable};
use crate::config::ReportConfig;

/// Histogramme à une classe par numéro, de 1 à `pool.max()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub bins: Vec<(u8, u32)>,
}

impl Histogram {
    fn new(pool: Pool, table: &FrequencyTable) -> Self {
        let (title, x_label) = match pool {
            Pool::Main => ("Fréquence des boules (1-69)", "Numéro"),
            Pool::Powerball => ("Fréquence des Powerball (1-26)", "Powerball"),
        };
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            bins: table.dense(pool.max()),
        }
    }

    pub fn max_count(&self) -> u32 {
        self.bins.iter().map(|&(_, c)| c).max().unwrap_or(0)
    }
}

/// Ligne unique exportée en CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    #[serde(rename = "MostCommonMain")]
    pub most_common_main: u8,
    #[serde(rename = "MostCommonPowerball")]
    pub most_common_powerball: u8,
    #[serde(rename = "AverageMain")]
    pub average_main: f64,
    #[serde(rename = "AveragePowerball")]
    pub average_powerball: f64,
    #[serde(rename = "StdDevMain")]
    pub std_dev_main: f64,
    #[serde(rename = "StdDevPowerball")]
    pub std_dev_powerball: f64,
}

impl StatsSummary {
    pub fn compute(main_pool: &[u8], powerball_pool: &[u8]) -> Result<Self, StatsError> {
        Ok(Self {
            most_common_main: mode(main_pool)?,
            most_common_powerball: mode(powerball_pool)?,
            average_main: mean(main_pool)?,
            average_powerball: mean(powerball_pool)?,
            std_dev_main: stddev(main_pool)?,
            std_dev_powerball: stddev(powerball_pool)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub filter: DrawFilter,
    pub draw_count: usize,
    pub overview: Vec<DrawRecord>,
    pub main_histogram: Histogram,
    pub powerball_histogram: Histogram,
    pub heatmap: PositionHeatmap,
    pub summary: StatsSummary,
    pub top_main: Vec<(u8, u32)>,
    pub top_powerball: Vec<(u8, u32)>,
    #[serde(skip)]
    pub main_frequencies: FrequencyTable,
    #[serde(skip)]
    pub powerball_frequencies: FrequencyTable,
}

/// Recalcule tout le rapport à partir du jeu complet et du filtre courant.
pub fn build_report(
    dataset: &DrawDataset,
    filter: &DrawFilter,
    config: &ReportConfig,
) -> Result<Report, StatsError> {
    let filtered = dataset.filter(filter);
    if filtered.is_empty() {
        return Err(StatsError::EmptyDataset);
    }

    let main_pool = filtered.main_number_pool();
    let powerball_pool = filtered.powerball_pool();
    let main_frequencies = counts(&main_pool);
    let powerball_frequencies = counts(&powerball_pool);

    log::debug!(
        "Rapport : {} tirages, {} boules ({} distinctes), {} Powerball distincts",
        filtered.len(),
        main_frequencies.total(),
        main_frequencies.distinct(),
        powerball_frequencies.distinct()
    );

    Ok(Report {
        filter: filter.clone(),
        draw_count: filtered.len(),
        overview: filtered.tail(config.tail).to_vec(),
        main_histogram: Histogram::new(Pool::Main, &main_frequencies),
        powerball_histogram: Histogram::new(Pool::Powerball, &powerball_frequencies),
        heatmap: position_heatmap(&filtered),
        summary: StatsSummary::compute(&main_pool, &powerball_pool)?,
        top_main: top_k(&main_pool, config.top_main),
        top_powerball: top_k(&powerball_pool, config.top_powerball),
        main_frequencies,
        powerball_frequencies,
    })
}

pub fn summary_csv(summary: &StatsSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(summary).context("Échec de la sérialisation CSV")?;
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Échec de l'écriture CSV : {}", e))?;
    String::from_utf8(bytes).context("CSV non UTF-8")
}
