mod analysis;
mod config;
mod display;
mod interactive;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use powerstat_data::dataset::{DrawDataset, DrawFilter};
use powerstat_data::error::StatsError;
use powerstat_data::import::import_csv;

use crate::analysis::sampler::generate_picks;
use crate::config::{load_config, ReportConfig};
use crate::display::{
    display_heatmap, display_no_data, display_overview, display_picks, display_report,
    display_summary, display_top,
};
use crate::report::{build_report, summary_csv, Report};

#[derive(Parser)]
#[command(name = "powerstat", about = "Analyse des tirages Powerball")]
struct Cli {
    /// Fichier CSV des tirages (date, numéros gagnants, multiplicateur)
    #[arg(short, long, default_value = "assets/powerball.csv")]
    file: PathBuf,

    /// Fichier de configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Années retenues, séparées par des virgules (défaut : toutes)
    #[arg(short, long, value_delimiter = ',')]
    years: Vec<i32>,

    /// Mois retenus (1-12), séparés par des virgules (défaut : tous)
    #[arg(short, long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=12))]
    months: Vec<u32>,

    /// Le CSV n'a pas de ligne d'en-tête
    #[arg(long)]
    no_header: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rapport complet : aperçu, histogrammes, heatmap, statistiques
    Report {
        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long)]
        last: Option<usize>,
    },

    /// Afficher le résumé statistique
    Stats,

    /// Numéros les plus fréquents
    Top {
        /// Nombre de boules
        #[arg(long)]
        main: Option<usize>,

        /// Nombre de Powerball
        #[arg(long)]
        powerball: Option<usize>,
    },

    /// Fréquence de chaque boule par position
    Heatmap,

    /// Grilles tirées au hasard, pondérées par la fréquence
    Pick {
        /// Nombre de grilles
        #[arg(short, long)]
        count: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Exporter le résumé statistique en CSV
    Export {
        /// Fichier de sortie (défaut : sortie standard)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mode interactif (changement de filtres)
    Interactive,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReportConfig::default(),
    };
    if cli.no_header {
        config.has_headers = false;
    }

    let dataset = import_csv(&cli.file, config.has_headers)
        .with_context(|| format!("Impossible d'importer {:?}", cli.file))?;
    if dataset.is_empty() {
        println!("Fichier vide : aucun tirage dans {:?}", cli.file);
        return Ok(());
    }
    let filter = resolve_filter(&dataset, &cli.years, &cli.months);

    match cli.command {
        Command::Report { json } => cmd_report(&dataset, &filter, &config, json),
        Command::List { last } => {
            if let Some(last) = last {
                config.tail = last;
            }
            cmd_list(&dataset, &filter, &config)
        }
        Command::Stats => cmd_stats(&dataset, &filter, &config),
        Command::Top { main, powerball } => {
            if let Some(k) = main {
                config.top_main = k;
            }
            if let Some(k) = powerball {
                config.top_powerball = k;
            }
            cmd_top(&dataset, &filter, &config)
        }
        Command::Heatmap => cmd_heatmap(&dataset, &filter, &config),
        Command::Pick { count, seed } => {
            if let Some(count) = count {
                config.pick_count = count;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_pick(&dataset, &filter, &config)
        }
        Command::Export { output } => cmd_export(&dataset, &filter, &config, output.as_deref()),
        Command::Interactive => interactive::run_interactive(&dataset, &config, filter),
    }
}

/// Sélection vide en ligne de commande = aucun filtre sur cet axe.
fn resolve_filter(dataset: &DrawDataset, years: &[i32], months: &[u32]) -> DrawFilter {
    let all = DrawFilter::all(dataset);
    DrawFilter {
        years: if years.is_empty() { all.years } else { years.iter().copied().collect() },
        months: if months.is_empty() { all.months } else { months.iter().copied().collect() },
    }
}

/// `None` quand le filtre ne retient aucun tirage (message déjà affiché).
fn filtered_report(
    dataset: &DrawDataset,
    filter: &DrawFilter,
    config: &ReportConfig,
) -> Result<Option<Report>> {
    match build_report(dataset, filter, config) {
        Ok(report) => Ok(Some(report)),
        Err(StatsError::EmptyDataset) => {
            display_no_data(filter);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_report(
    dataset: &DrawDataset,
    filter: &DrawFilter,
    config: &ReportConfig,
    json: bool,
) -> Result<()> {
    let Some(report) = filtered_report(dataset, filter, config)? else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_report(&report, config);
    let picks = generate_picks(
        &report.main_frequencies,
        &report.powerball_frequencies,
        config.pick_count,
        config.seed,
    )?;
    display_picks(&picks);
    Ok(())
}

pub(crate) fn cmd_list(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    let filtered = dataset.filter(filter);
    if filtered.is_empty() {
        display_no_data(filter);
        return Ok(());
    }
    display_overview(filtered.tail(config.tail), filtered.len());
    Ok(())
}

pub(crate) fn cmd_stats(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    if let Some(report) = filtered_report(dataset, filter, config)? {
        println!("Tirages analysés : {}", report.draw_count);
        display_summary(&report.summary);
    }
    Ok(())
}

pub(crate) fn cmd_top(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    if let Some(report) = filtered_report(dataset, filter, config)? {
        display_top(&report.top_main, &report.top_powerball);
    }
    Ok(())
}

pub(crate) fn cmd_heatmap(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    if let Some(report) = filtered_report(dataset, filter, config)? {
        display_heatmap(&report.heatmap);
    }
    Ok(())
}

pub(crate) fn cmd_pick(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    let Some(report) = filtered_report(dataset, filter, config)? else {
        return Ok(());
    };
    let picks = generate_picks(
        &report.main_frequencies,
        &report.powerball_frequencies,
        config.pick_count,
        config.seed,
    )?;
    display_picks(&picks);
    Ok(())
}

pub(crate) fn cmd_export(
    dataset: &DrawDataset,
    filter: &DrawFilter,
    config: &ReportConfig,
    output: Option<&Path>,
) -> Result<()> {
    let Some(report) = filtered_report(dataset, filter, config)? else {
        return Ok(());
    };
    let csv = summary_csv(&report.summary)?;
    match output {
        Some(path) => {
            std::fs::write(path, &csv).with_context(|| format!("Impossible d'écrire {:?}", path))?;
            log::info!("Résumé exporté dans {:?}", path);
            println!("Résumé statistique exporté dans {}", path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
