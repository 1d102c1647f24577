use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{BatchFitResult, EntityFit, ProjectionPoint};

/// Format the fitted-parameter table as a string.
pub fn format_params_table(result: &BatchFitResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "S-Curve Fit Parameters".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Entity", "L", "k", "t0", "RMSE", "R²", "Samples"]);

    for fit in &result.fits {
        table.add_row(vec![
            Cell::new(&fit.entity),
            Cell::new(format!("{:.4}", fit.params.l)),
            Cell::new(format!("{:.4}", fit.params.k)),
            Cell::new(format!("{:.2}", fit.params.t0)),
            Cell::new(format!("{:.4}", fit.diagnostics.rmse)),
            Cell::new(format!("{:.4}", fit.diagnostics.r_squared)),
            Cell::new(format!("{}", fit.diagnostics.sample_size)),
        ]);
    }

    output.push_str(&format!("{table}"));

    if !result.skipped.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            format!("Skipped {} entities:", result.skipped.len()).yellow()
        ));
        for s in &result.skipped {
            output.push_str(&format!("  {} - {}\n", s.entity, s.reason));
        }
    }

    output
}

/// Print the fitted-parameter table.
pub fn print_params_table(result: &BatchFitResult) {
    print!("{}", format_params_table(result));
}

/// Format parameter confidence intervals for one entity as a string.
pub fn format_intervals_table(fit: &EntityFit) -> String {
    let mut output = String::new();
    let Some(intervals) = &fit.diagnostics.intervals else {
        return output;
    };

    output.push_str(&format!(
        "\n{}\n",
        format!(
            "Parameter Intervals: {} ({:.0}% confidence)",
            fit.entity,
            intervals.confidence_level * 100.0
        )
        .bold()
        .green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Parameter", "Estimate", "Std Error", "Lower", "Upper"]);

    let rows = [
        ("L", &intervals.l),
        ("k", &intervals.k),
        ("t0", &intervals.t0),
    ];
    for (name, est) in &rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.4}", est.estimate)),
            Cell::new(format!("{:.4}", est.std_error)),
            Cell::new(format!("{:.4}", est.lower)),
            Cell::new(format!("{:.4}", est.upper)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print parameter confidence intervals for one entity.
pub fn print_intervals_table(fit: &EntityFit) {
    print!("{}", format_intervals_table(fit));
}

/// Format a projection table as a string.
pub fn format_projection_table(entity: &str, points: &[ProjectionPoint]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Projected Adoption Share: {entity}").bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Share", "Share %"]);

    for p in points {
        table.add_row(vec![
            Cell::new(format!("{:.1}", p.year)),
            Cell::new(format!("{:.4}", p.share)),
            Cell::new(format!("{:.1}%", p.share * 100.0)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print a projection table.
pub fn print_projection_table(entity: &str, points: &[ProjectionPoint]) {
    print!("{}", format_projection_table(entity, points));
}
