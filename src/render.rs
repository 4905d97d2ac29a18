//! Terminal rendering
//!
//! Plain-text presentation of the view models for the CLI and shell.

use std::fmt::Write;

use crate::catalog::{RankingEntry, Technology};
use crate::metrics::CarbonSummary;
use crate::state::SelectionState;
use crate::views::{Comparison, EnergySlice, EnergyUsage, FetchState, Side};

const BAR_WIDTH: usize = 40;
const LOADING: &str = "Loading...";

/// Technology grid; `*` marks comparison picks, `>` the expanded row
pub fn technology_grid(technologies: &[Technology], selection: &SelectionState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "   {:<3} {:<26} {:<16} {:<12} {:>12} {:>10}",
        "#", "Technology", "Cost efficiency", "Env. impact", "Upfront", "CO2 (t)"
    );
    let _ = writeln!(out, "{}", "-".repeat(86));

    for (i, tech) in technologies.iter().enumerate() {
        let marker = if selection.selection().contains(i) {
            '*'
        } else if selection.expanded() == Some(i) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            " {} {:<3} {:<26} {:<16} {:<12} {:>12.2} {:>10.1}",
            marker,
            i + 1,
            tech.name,
            tech.cost_efficiency,
            tech.environmental_impact,
            tech.upfront_cost(),
            tech.carbon_emissions
        );
    }
    out
}

/// Expanded detail panel for one technology
pub fn technology_detail(tech: &Technology) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tech.name);
    let _ = writeln!(out, "{}", "=".repeat(tech.name.chars().count()));
    let _ = writeln!(out, "  Energy output:        {}", tech.energy_output);
    let _ = writeln!(out, "  Cost efficiency:      {}", tech.cost_efficiency);
    let _ = writeln!(out, "  Environmental impact: {}", tech.environmental_impact);
    let _ = writeln!(out, "  Product cost:         {:.2}", tech.product_cost);
    let _ = writeln!(out, "  Installation cost:    {:.2}", tech.installation_cost);
    let _ = writeln!(out, "  Maintenance cost:     {:.2}", tech.maintenance_cost);
    let _ = writeln!(out, "  Carbon emissions:     {}", tech.carbon_emissions);
    let _ = writeln!(out, "  Electricity cost:     {}", tech.electricity_cost);
    let _ = writeln!(out, "  Image:                {}", tech.image);
    out
}

/// Side-by-side comparison; the better value is starred
pub fn comparison_table(cmp: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<22} {:<26} {:<26}", "", cmp.left, cmp.right);
    let _ = writeln!(out, "{}", "-".repeat(76));
    for row in &cmp.rows {
        let star = |side: Side| if row.better == Some(side) { " *" } else { "" };
        let _ = writeln!(
            out,
            "{:<22} {:<26} {:<26}",
            row.label,
            format!("{}{}", row.left, star(Side::Left)),
            format!("{}{}", row.right, star(Side::Right))
        );
    }
    let (l, r) = cmp.score();
    let _ = writeln!(out, "\nBetter on {} vs {} attributes", l, r);
    out
}

/// Building types available in the sidebar
pub fn building_types<'a>(types: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::from("Building types:\n");
    for name in types {
        let _ = writeln!(out, "  - {}", name);
    }
    out
}

/// Ordered recommendations for a building type
pub fn ranking_list(building_type: &str, entries: &[RankingEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Recommended for {}:", building_type);
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({})",
            i + 1,
            entry.technology_name,
            entry.technology_type
        );
    }
    out
}

/// Justification dialog for one ranking entry (`index` is zero-based)
pub fn justification_dialog(index: usize, entry: &RankingEntry) -> String {
    format!(
        "#{} {} ({})\n\n{}\n",
        index + 1,
        entry.technology_name,
        entry.technology_type,
        entry.justification
    )
}

/// Payback and emission cards
pub fn carbon_cards(state: &FetchState<CarbonSummary>) -> String {
    match state {
        FetchState::Loading => format!("{}\n", LOADING),
        FetchState::Failed(msg) => format!("{}\n", msg),
        FetchState::Loaded(summary) => {
            let average = summary
                .average_payback_years
                .map(|v| format!("{:.2} years", v))
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "Average carbon payback: {}\nTotal carbon emission:  {:.2} tons\nRecords:                {}\n",
                average, summary.total_emission_tons, summary.record_count
            )
        }
    }
}

/// Horizontal bar chart of usage per source
pub fn energy_chart(state: &FetchState<EnergyUsage>, selected: Option<&EnergySlice>) -> String {
    let usage = match state {
        FetchState::Loading => return format!("{}\n", LOADING),
        FetchState::Failed(msg) => return format!("{}\n", msg),
        FetchState::Loaded(usage) => usage,
    };

    if usage.sources.is_empty() {
        return "No energy usage recorded.\n".to_string();
    }

    let peak = usage.peak();
    let label_width = usage
        .sources
        .iter()
        .map(|s| s.source.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for slice in &usage.sources {
        let len = if peak > 0.0 {
            ((slice.total_used / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<width$} |{:<bar$}| {:>10.1} ({:>5.1}%)",
            slice.source,
            "#".repeat(len),
            slice.total_used,
            slice.share_percent,
            width = label_width,
            bar = BAR_WIDTH
        );
    }
    let _ = writeln!(out, "Total used: {:.1}", usage.total_used);

    if let Some(slice) = selected {
        let _ = writeln!(
            out,
            "\nSelected: {} uses {:.1} ({:.1}% of total)",
            slice.source, slice.total_used, slice.share_percent
        );
    }
    out
}
