use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use powerstat_data::dataset::{DrawDataset, DrawFilter};

use crate::config::ReportConfig;
use crate::display::display_filter;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Report,
    Years,
    Months,
    Pick,
    Export,
    Filters,
    Reset,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "rapport" | "report" => Some(InteractiveCommand::Report),
        "2" | "annees" | "années" | "years" => Some(InteractiveCommand::Years),
        "3" | "mois" | "months" => Some(InteractiveCommand::Months),
        "4" | "grilles" | "pick" => Some(InteractiveCommand::Pick),
        "5" | "exporter" | "export" => Some(InteractiveCommand::Export),
        "6" | "filtres" | "filters" => Some(InteractiveCommand::Filters),
        "7" | "reinitialiser" | "réinitialiser" | "reset" => Some(InteractiveCommand::Reset),
        "8" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

/// Vide ou "tout" : toutes les valeurs ; "aucun" : ensemble vide.
fn parse_selection<T>(input: &str, all: impl IntoIterator<Item = T>) -> Result<BTreeSet<T>>
where
    T: FromStr + Ord,
{
    match input.trim().to_lowercase().as_str() {
        "" | "tout" | "tous" | "toutes" | "all" => return Ok(all.into_iter().collect()),
        "aucun" | "aucune" | "none" => return Ok(BTreeSet::new()),
        _ => {}
    }
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| anyhow::anyhow!("Valeur invalide : '{}'", s))
        })
        .collect()
}

fn parse_months(input: &str) -> Result<BTreeSet<u32>> {
    let months = parse_selection(input, 1..=12u32)?;
    if let Some(m) = months.iter().find(|m| !(1..=12).contains(*m)) {
        bail!("Mois {} hors limites (1-12)", m);
    }
    Ok(months)
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  1. rapport       Rapport complet");
    println!("  2. annees        Choisir les années");
    println!("  3. mois          Choisir les mois");
    println!("  4. grilles       Grilles pondérées");
    println!("  5. exporter      Exporter le résumé CSV");
    println!("  6. filtres       Afficher les filtres");
    println!("  7. reinitialiser Toutes années, tous mois");
    println!("  8. quitter       Quitter");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

fn cmd_years_interactive(dataset: &DrawDataset, filter: &mut DrawFilter) -> Result<()> {
    let available = dataset.years();
    println!(
        "Années disponibles : {}",
        available.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", ")
    );
    let input = prompt("Années (virgules, vide = toutes, aucun = aucune) : ")?;
    filter.years = parse_selection(&input, available)?;
    Ok(())
}

fn cmd_months_interactive(filter: &mut DrawFilter) -> Result<()> {
    let input = prompt("Mois 1-12 (virgules, vide = tous, aucun = aucun) : ")?;
    filter.months = parse_months(&input)?;
    Ok(())
}

fn cmd_pick_interactive(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    let n_str = prompt_with_default("Nombre de grilles", &config.pick_count.to_string())?;
    let n: usize = n_str.parse().context("Nombre invalide")?;

    let seed_str = prompt_with_default("Seed (vide = aléatoire)", "")?;
    let seed: Option<u64> = if seed_str.is_empty() {
        None
    } else {
        Some(seed_str.parse().context("Seed invalide")?)
    };

    let config = ReportConfig {
        pick_count: n,
        seed,
        ..config.clone()
    };
    super::cmd_pick(dataset, filter, &config)
}

fn cmd_export_interactive(dataset: &DrawDataset, filter: &DrawFilter, config: &ReportConfig) -> Result<()> {
    let output = prompt_with_default("Fichier de sortie", "powerball_stats.csv")?;
    let path = PathBuf::from(output);
    super::cmd_export(dataset, filter, config, Some(path.as_path()))
}

/// Le jeu complet est chargé une fois ; chaque commande recalcule le rapport
/// à partir du filtre courant.
pub fn run_interactive(dataset: &DrawDataset, config: &ReportConfig, mut filter: DrawFilter) -> Result<()> {
    println!("Bienvenue dans le mode interactif de powerstat ({} tirages chargés).", dataset.len());

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        let result = match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Report) => super::cmd_report(dataset, &filter, config, false),
            Some(InteractiveCommand::Years) => cmd_years_interactive(dataset, &mut filter)
                .map(|_| display_filter(&filter)),
            Some(InteractiveCommand::Months) => cmd_months_interactive(&mut filter)
                .map(|_| display_filter(&filter)),
            Some(InteractiveCommand::Pick) => cmd_pick_interactive(dataset, &filter, config),
            Some(InteractiveCommand::Export) => cmd_export_interactive(dataset, &filter, config),
            Some(InteractiveCommand::Filters) => {
                display_filter(&filter);
                println!("Tirages retenus : {}", dataset.filter(&filter).len());
                Ok(())
            }
            Some(InteractiveCommand::Reset) => {
                filter = DrawFilter::all(dataset);
                display_filter(&filter);
                Ok(())
            }
            None => {
                println!("Commande inconnue : '{}'. Tapez un numéro (1-8) ou un nom de commande.", input);
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Erreur: {e:#}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_by_number() {
        assert_eq!(parse_command("1"), Some(InteractiveCommand::Report));
        assert_eq!(parse_command("2"), Some(InteractiveCommand::Years));
        assert_eq!(parse_command("3"), Some(InteractiveCommand::Months));
        assert_eq!(parse_command("4"), Some(InteractiveCommand::Pick));
        assert_eq!(parse_command("5"), Some(InteractiveCommand::Export));
        assert_eq!(parse_command("6"), Some(InteractiveCommand::Filters));
        assert_eq!(parse_command("7"), Some(InteractiveCommand::Reset));
        assert_eq!(parse_command("8"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_by_name() {
        assert_eq!(parse_command("rapport"), Some(InteractiveCommand::Report));
        assert_eq!(parse_command("années"), Some(InteractiveCommand::Years));
        assert_eq!(parse_command("mois"), Some(InteractiveCommand::Months));
        assert_eq!(parse_command("grilles"), Some(InteractiveCommand::Pick));
        assert_eq!(parse_command("export"), Some(InteractiveCommand::Export));
        assert_eq!(parse_command("RESET"), Some(InteractiveCommand::Reset));
        assert_eq!(parse_command("q"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_unknown() {
        assert_eq!(parse_command("foo"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("9"), None);
    }

    #[test]
    fn test_parse_selection() {
        let all = [2022, 2023, 2024];
        assert_eq!(parse_selection("", all).unwrap(), BTreeSet::from(all));
        assert_eq!(parse_selection("Tout", all).unwrap(), BTreeSet::from(all));
        assert!(parse_selection("aucun", all).unwrap().is_empty());
        assert_eq!(parse_selection("2024, 2022", all).unwrap(), BTreeSet::from([2022, 2024]));
        assert_eq!(parse_selection("2023 2023", all).unwrap(), BTreeSet::from([2023]));
        assert!(parse_selection("2023,abc", all).is_err());
    }

    #[test]
    fn test_parse_months() {
        assert_eq!(parse_months("").unwrap().len(), 12);
        assert_eq!(parse_months("1,6,12").unwrap(), BTreeSet::from([1, 6, 12]));
        assert!(parse_months("0").is_err());
        assert!(parse_months("13").is_err());
    }
}
