use crate::Result;
use crate::analyzer::{RiskLevel, Supplier};
use crate::engine::{FocusResult, Region, ScoreBand, Status, score_band};
use clap::ValueEnum;
use core::fmt::Write;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::{IsTerminal, stdout};

const SEPARATOR_WIDTH: usize = 40;

/// Control when to use colored output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Colorize when stdout is a terminal
    #[default]
    Auto,
    /// Always colorize
    Always,
    /// Never colorize
    Never,
}

impl ColorMode {
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stdout().is_terminal(),
        }
    }
}

/// Render the focus result: score band, report text, and the supplier grid.
pub fn render_focus<W: Write>(focus: &FocusResult, colors: bool, writer: &mut W) -> Result<()> {
    let band = score_band(focus.risk_score);
    writeln!(
        writer,
        "Global Risk Status: {} (score {})",
        paint(&band.to_string(), band_color(band), colors),
        focus.risk_score
    )?;

    writeln!(writer)?;
    for line in focus.report.lines() {
        writeln!(writer, "  {line}")?;
    }

    writeln!(writer)?;
    if focus.suppliers.is_empty() {
        writeln!(writer, "No specific suppliers flagged.")?;
    } else {
        writeln!(writer, "Impacted Suppliers ({} detected):", focus.suppliers.len())?;
        for supplier in &focus.suppliers {
            write_supplier(supplier, colors, writer)?;
        }
    }

    Ok(())
}

/// Render the monitored region table in its fixed display order.
pub fn render_regions<W: Write>(regions: &[Region], colors: bool, writer: &mut W) -> Result<()> {
    writeln!(writer, "Monitored Regions")?;
    writeln!(writer, "{}", "─".repeat(SEPARATOR_WIDTH))?;

    let name_width = regions.iter().map(|region| region.name().len()).max().unwrap_or(0);

    for region in regions {
        let marker = if region.is_scanning() {
            paint("◌", AnsiColors::Blue, colors)
        } else {
            paint("●", status_color(region.status()), colors)
        };

        write!(writer, "  {marker} {:<name_width$}  {:<8}", region.name(), region.status().to_string())?;

        if region.is_scanning() {
            write!(writer, "  scanning")?;
        } else if let Some(score) = region.risk_score() {
            write!(writer, "  score {score}")?;
        }

        writeln!(writer)?;
    }

    Ok(())
}

fn write_supplier<W: Write>(supplier: &Supplier, colors: bool, writer: &mut W) -> Result<()> {
    let badge = supplier.risk_level.map_or_else(
        || paint("Unknown", AnsiColors::Default, false),
        |level| paint(risk_label(level), risk_color(level), colors),
    );

    writeln!(writer, "  {} [{badge}]", supplier.name)?;
    writeln!(writer, "    {} · {}", supplier.country, supplier.category)?;

    if let Some(trend) = &supplier.trend {
        // Matches the dashboard's heuristic: any "worsen" wording renders red
        let color = if trend.to_lowercase().contains("worsen") {
            AnsiColors::Red
        } else {
            AnsiColors::Green
        };
        writeln!(writer, "    trend: {}", paint(trend, color, colors))?;
    }

    Ok(())
}

fn paint(text: &str, color: AnsiColors, enabled: bool) -> String {
    if enabled { text.color(color).to_string() } else { text.to_string() }
}

const fn band_color(band: ScoreBand) -> AnsiColors {
    match band {
        ScoreBand::Stable => AnsiColors::Green,
        ScoreBand::Moderate => AnsiColors::Yellow,
        ScoreBand::Critical => AnsiColors::Red,
    }
}

const fn status_color(status: Status) -> AnsiColors {
    match status {
        Status::Safe => AnsiColors::Green,
        Status::Warning => AnsiColors::Yellow,
        Status::Critical => AnsiColors::Red,
    }
}

const fn risk_label(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "High",
        RiskLevel::Medium => "Medium",
        RiskLevel::Low => "Low",
    }
}

const fn risk_color(level: RiskLevel) -> AnsiColors {
    match level {
        RiskLevel::High => AnsiColors::Red,
        RiskLevel::Medium => AnsiColors::Yellow,
        RiskLevel::Low => AnsiColors::Green,
    }
}
