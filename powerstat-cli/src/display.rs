use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use textplots::Plot;

use powerstat_data::dataset::DrawFilter;
use powerstat_data::models::DrawRecord;

use crate::analysis::heatmap::PositionHeatmap;
use crate::analysis::sampler::Pick;
use crate::config::ReportConfig;
use crate::report::{Histogram, Report, StatsSummary};

pub const PICK_DISCLAIMER: &str =
    "Les tirages sont indépendants : ces grilles reflètent la fréquence passée, pas une prédiction.";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn format_set<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> String {
    let parts: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    if parts.is_empty() {
        "aucun".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn display_filter(filter: &DrawFilter) {
    println!("Années : {}", format_set(&filter.years));
    println!("Mois   : {}", format_set(&filter.months));
}

pub fn display_no_data(filter: &DrawFilter) {
    println!("\nAucun tirage ne correspond aux filtres sélectionnés.");
    display_filter(filter);
}

pub fn display_overview(draws: &[DrawRecord], total: usize) {
    println!("\n📅 Derniers tirages ({} sur {})\n", draws.len(), total);
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Date", "Numéros gagnants", "Boules", "Powerball", "Multiplicateur"]);

    for draw in draws {
        let multiplier = draw
            .multiplier
            .map(|m| format!("x{}", m))
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            draw.date.format("%Y-%m-%d").to_string(),
            draw.winning_numbers(),
            format_numbers(&draw.main),
            format!("{:2}", draw.powerball),
            multiplier,
        ]);
    }
    println!("{table}");
}

pub fn display_histogram(histogram: &Histogram, width: u32, height: u32) {
    println!("\n📊 {}\n", histogram.title);

    let max_count = histogram.max_count();
    if max_count == 0 {
        println!("  (Pas de données à afficher)");
        return;
    }

    let points: Vec<(f32, f32)> = histogram
        .bins
        .iter()
        .map(|&(n, c)| (n as f32, c as f32))
        .collect();
    let x_max = histogram.bins.len() as f32 + 0.5;

    let shape = textplots::Shape::Bars(&points);
    let mut chart =
        textplots::Chart::new_with_y_range(width.max(32), height.max(3), 0.5, x_max, 0.0, max_count as f32 + 1.0);
    println!("{}", chart.lineplot(&shape));
    println!("  x : {}, y : fréquence", histogram.x_label);
}

/// Dégradé de bleus, du plus clair (0) au plus foncé (`max`).
pub fn heat_color(count: u32, max: u32) -> Color {
    if max == 0 {
        return Color::Rgb { r: 247, g: 251, b: 255 };
    }
    let t = count.min(max) as f32 / max as f32;
    let lerp = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t).round() as u8;
    Color::Rgb {
        r: lerp(247, 8),
        g: lerp(251, 48),
        b: lerp(255, 107),
    }
}

pub fn display_heatmap(heatmap: &PositionHeatmap) {
    println!("\n🌡️  Fréquence par position (1-69)\n");

    let max = heatmap.max_count();
    let mut table = new_table();
    table.set_header(vec!["Numéro", "N1", "N2", "N3", "N4", "N5"]);

    for (number, row) in heatmap.rows() {
        let mut cells = vec![Cell::new(format!("{:2}", number))];
        for &count in row {
            let fg = if max > 0 && count * 2 > max { Color::White } else { Color::Black };
            cells.push(Cell::new(count).bg(heat_color(count, max)).fg(fg));
        }
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn display_summary(summary: &StatsSummary) {
    println!("\n📈 Résumé statistique\n");

    let mut table = new_table();
    table.set_header(vec![
        "Boule la plus fréquente",
        "Powerball le plus fréquent",
        "Moyenne boules",
        "Moyenne Powerball",
        "Écart-type boules",
        "Écart-type Powerball",
    ]);
    table.add_row(vec![
        summary.most_common_main.to_string(),
        summary.most_common_powerball.to_string(),
        format!("{:.4}", summary.average_main),
        format!("{:.4}", summary.average_powerball),
        format!("{:.4}", summary.std_dev_main),
        format!("{:.4}", summary.std_dev_powerball),
    ]);
    println!("{table}");
}

fn display_ranking(label: &str, ranking: &[(u8, u32)]) {
    println!("── {} ──", label);
    let mut table = new_table();
    table.set_header(vec!["#", "Numéro", "Fréquence"]);
    for (i, (number, count)) in ranking.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            format!("{:2}", number),
            count.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_top(top_main: &[(u8, u32)], top_powerball: &[(u8, u32)]) {
    println!("\n🔮 Numéros les plus fréquents\n");
    display_ranking(&format!("Top {} boules", top_main.len()), top_main);
    println!();
    display_ranking(&format!("Top {} Powerball", top_powerball.len()), top_powerball);
}

pub fn display_picks(picks: &[Pick]) {
    println!("\n🎲 Grilles pondérées par la fréquence\n");

    let mut table = new_table();
    table.set_header(vec!["#", "Boules", "Powerball"]);
    for (i, pick) in picks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format_numbers(&pick.main)),
            Cell::new(format!("{:2}", pick.powerball)).fg(Color::Red),
        ]);
    }
    println!("{table}");
    println!("{}", PICK_DISCLAIMER);
}

pub fn display_report(report: &Report, config: &ReportConfig) {
    println!("\n== Analyse de {} tirages ==", report.draw_count);
    display_filter(&report.filter);
    display_overview(&report.overview, report.draw_count);
    display_histogram(&report.main_histogram, config.chart_width, config.chart_height);
    display_histogram(&report.powerball_histogram, config.chart_width, config.chart_height);
    display_heatmap(&report.heatmap);
    display_summary(&report.summary);
    display_top(&report.top_main, &report.top_powerball);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_numbers(&[1, 12, 69]), " 1 - 12 - 69");
        assert_eq!(format_numbers(&[]), "");
    }

    #[test]
    fn test_format_set() {
        assert_eq!(format_set([2023, 2024]), "2023, 2024");
        assert_eq!(format_set(Vec::<u32>::new()), "aucun");
    }

    #[test]
    fn test_heat_color_bounds() {
        assert_eq!(heat_color(0, 10), Color::Rgb { r: 247, g: 251, b: 255 });
        assert_eq!(heat_color(10, 10), Color::Rgb { r: 8, g: 48, b: 107 });
        assert_eq!(heat_color(25, 10), Color::Rgb { r: 8, g: 48, b: 107 });
        assert_eq!(heat_color(0, 0), Color::Rgb { r: 247, g: 251, b: 255 });
    }
}
