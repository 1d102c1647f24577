use colored::{Color, Colorize};

use crate::analysis::ProjectionPoint;
use crate::config::AnalysisConfig;
use crate::models::{PolicyTimeline, Sample};

const BAR_WIDTH: usize = 50;
const AXIS_WIDTH: usize = 60;

/// Format a text chart of the fitted S-curve as a string.
///
/// One row per projected year: a bar for the predicted share, with an `o`
/// marker overlaid where that year was actually observed.
pub fn format_scurve_chart(
    entity: &str,
    samples: &[Sample],
    projection: &[ProjectionPoint],
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("S-Curve Fit: {entity}").bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    if projection.is_empty() {
        output.push_str("  No projection available.\n");
        return output;
    }

    let max_share = projection
        .iter()
        .map(|p| p.share)
        .chain(samples.iter().map(|s| s.share))
        .fold(0.0f64, f64::max)
        .max(1e-9);

    output.push_str(&format!(
        "  {:>6}  {:>7}  0 {} {:.0}%\n",
        "Year",
        "Share",
        "-".repeat(BAR_WIDTH.saturating_sub(8)),
        max_share * 100.0
    ));

    for point in projection {
        let bar_len = ((point.share / max_share) * BAR_WIDTH as f64).round() as usize;
        let mut bar: Vec<char> = std::iter::repeat('\u{2588}')
            .take(bar_len)
            .chain(std::iter::repeat(' ').take(BAR_WIDTH - bar_len.min(BAR_WIDTH)))
            .collect();

        // Overlay the observation for this year, if any
        let observed = samples
            .iter()
            .find(|s| (s.year - point.year).abs() < 0.5)
            .map(|s| ((s.share / max_share) * BAR_WIDTH as f64).round() as usize);
        if let Some(pos) = observed {
            let pos = pos.min(BAR_WIDTH - 1);
            bar[pos] = 'o';
        }

        let bar: String = bar.into_iter().collect();
        output.push_str(&format!(
            "  {:>6.1}  {:>6.1}%  {}\n",
            point.year,
            point.share * 100.0,
            bar.green()
        ));
    }

    output.push_str(&format!(
        "\n  {} fitted curve   {} observed\n",
        "\u{2588}".green(),
        "o".yellow()
    ));
    output
}

/// Print a text chart of the fitted S-curve.
pub fn print_scurve_chart(entity: &str, samples: &[Sample], projection: &[ProjectionPoint]) {
    print!("{}", format_scurve_chart(entity, samples, projection));
}

fn axis_position(year: f64, lo: f64, hi: f64) -> usize {
    if hi <= lo {
        return 0;
    }
    let frac = ((year - lo) / (hi - lo)).clamp(0.0, 1.0);
    ((frac * (AXIS_WIDTH - 1) as f64).round() as usize).min(AXIS_WIDTH - 1)
}

fn region_color(config: &AnalysisConfig, region: &str) -> Color {
    config
        .color_for(region)
        .map(Color::from)
        .unwrap_or(Color::Cyan)
}

/// Format the policy timeline as a string.
///
/// Regions are grouped; each band renders as a block span on a shared year
/// axis and each event as a marker, with the label alongside. The original
/// staggered-label layout exists to dodge overlap in a raster image; rows
/// cannot overlap, so labels sit inline.
pub fn format_timeline(timeline: &PolicyTimeline, config: &AnalysisConfig) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "EV Policy Timeline".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(AXIS_WIDTH + 14)));

    let Some((lo, hi)) = timeline.year_range() else {
        output.push_str("  No policies to display.\n");
        return output;
    };
    let (lo, hi) = (lo.floor(), hi.ceil());

    output.push_str(&format!(
        "  {:<10}{}{}\n",
        format!("{lo:.0}"),
        " ".repeat(AXIS_WIDTH.saturating_sub(8)),
        format!("{hi:.0}")
    ));
    output.push_str(&format!("  {}\n", "-".repeat(AXIS_WIDTH + 10)));

    for region in timeline.regions() {
        let color = region_color(config, region);
        output.push_str(&format!("  {}\n", region.bold().color(color)));

        for band in timeline.bands.iter().filter(|b| b.region == region) {
            let start = axis_position(band.start, lo, hi);
            let end = axis_position(band.end, lo, hi).max(start);
            let mut row = vec![' '; AXIS_WIDTH];
            for cell in row.iter_mut().take(end + 1).skip(start) {
                *cell = '\u{2588}';
            }
            let row: String = row.into_iter().collect();
            output.push_str(&format!(
                "    {}  {} ({:.0}-{:.0})\n",
                row.color(color),
                band.label,
                band.start,
                band.end
            ));
        }

        for event in timeline.events.iter().filter(|e| e.region == region) {
            let pos = axis_position(event.date, lo, hi);
            let mut row = vec![' '; AXIS_WIDTH];
            row[pos] = '\u{25b2}';
            let row: String = row.into_iter().collect();
            output.push_str(&format!(
                "    {}  {} ({:.0})\n",
                row.color(color),
                event.label,
                event.date
            ));
        }
    }

    output
}

/// Print the policy timeline.
pub fn print_timeline(timeline: &PolicyTimeline, config: &AnalysisConfig) {
    print!("{}", format_timeline(timeline, config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PolicyBand, PolicyEvent};

    fn sample_projection() -> Vec<ProjectionPoint> {
        vec![
            ProjectionPoint { year: 2015.0, share: 0.01 },
            ProjectionPoint { year: 2020.0, share: 0.35 },
            ProjectionPoint { year: 2025.0, share: 0.82 },
        ]
    }

    fn sample_timeline() -> PolicyTimeline {
        PolicyTimeline {
            events: vec![PolicyEvent {
                region: "Norway".to_string(),
                label: "Bus lane access".to_string(),
                date: 2003.0,
            }],
            bands: vec![PolicyBand {
                region: "Norway".to_string(),
                label: "VAT exemption".to_string(),
                start: 2001.0,
                end: 2022.0,
            }],
        }
    }

    #[test]
    fn test_scurve_chart_contains_years_and_legend() {
        let samples = vec![Sample { year: 2020.0, share: 0.3 }];
        let output = format_scurve_chart("Norway", &samples, &sample_projection());
        assert!(output.contains("S-Curve Fit: Norway"));
        assert!(output.contains("2015.0"));
        assert!(output.contains("observed"));
    }

    #[test]
    fn test_scurve_chart_marks_observations() {
        let samples = vec![Sample { year: 2020.0, share: 0.35 }];
        let output = format_scurve_chart("Norway", &samples, &sample_projection());
        assert!(output.contains('o'));
    }

    #[test]
    fn test_scurve_chart_empty_projection() {
        let output = format_scurve_chart("Norway", &[], &[]);
        assert!(output.contains("No projection available."));
    }

    #[test]
    fn test_timeline_contains_regions_and_labels() {
        let output = format_timeline(&sample_timeline(), &AnalysisConfig::default());
        assert!(output.contains("EV Policy Timeline"));
        assert!(output.contains("Norway"));
        assert!(output.contains("VAT exemption (2001-2022)"));
        assert!(output.contains("Bus lane access (2003)"));
        assert!(output.contains('\u{25b2}'));
    }

    #[test]
    fn test_timeline_empty() {
        let output = format_timeline(&PolicyTimeline::default(), &AnalysisConfig::default());
        assert!(output.contains("No policies to display."));
    }

    #[test]
    fn test_axis_position_bounds() {
        assert_eq!(axis_position(1990.0, 1990.0, 2030.0), 0);
        assert_eq!(axis_position(2030.0, 1990.0, 2030.0), AXIS_WIDTH - 1);
        assert_eq!(axis_position(2050.0, 1990.0, 2030.0), AXIS_WIDTH - 1);
        assert_eq!(axis_position(2000.0, 2000.0, 2000.0), 0);
    }
}
