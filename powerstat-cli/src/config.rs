use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Nombre de tirages dans l'aperçu.
    pub tail: usize,
    pub top_main: usize,
    pub top_powerball: usize,
    /// Nombre de grilles pondérées suggérées.
    pub pick_count: usize,
    pub seed: Option<u64>,
    /// La première ligne du CSV est un en-tête.
    pub has_headers: bool,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tail: 10,
            top_main: 10,
            top_powerball: 5,
            pick_count: 1,
            seed: None,
            has_headers: true,
            chart_width: 140,
            chart_height: 40,
        }
    }
}

pub fn load_config(path: &Path) -> Result<ReportConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: ReportConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    log::debug!("Configuration chargée depuis {:?} : {:?}", path, config);
    Ok(config)
}
