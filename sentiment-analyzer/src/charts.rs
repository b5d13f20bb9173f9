use crate::period::weekday_rank;
use crate::types::{AnalyzerError, Result, SentimentReport, TimeSlot};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Explicit styling passed to every chart function; no global style state.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub positive_color: RGBColor,
    pub negative_color: RGBColor,
    pub neutral_color: RGBColor,
    pub series_color: RGBColor,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            positive_color: RGBColor(46, 204, 113),
            negative_color: RGBColor(231, 76, 60),
            neutral_color: RGBColor(189, 195, 199),
            series_color: RGBColor(52, 152, 219),
        }
    }
}

/// Bar chart of positive/negative/neutral message counts.
pub fn render_distribution(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> Result<()> {
    draw_distribution(report, config, path, title).map_err(chart_error)?;
    info!("Rendered distribution chart to {}", path.display());
    Ok(())
}

/// Line chart of average polarity across the time series.
pub fn render_polarity_series(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> Result<()> {
    draw_polarity_series(report, config, path, title).map_err(chart_error)?;
    info!("Rendered polarity chart to {}", path.display());
    Ok(())
}

/// Bar chart of message volume per bucket.
pub fn render_volume_series(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> Result<()> {
    draw_volume_series(report, config, path, title).map_err(chart_error)?;
    info!("Rendered volume chart to {}", path.display());
    Ok(())
}

/// 7x24 grid of average polarity for a weekday/hour report.
pub fn render_weekday_hour_heatmap(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> Result<()> {
    draw_weekday_hour_heatmap(report, config, path, title).map_err(chart_error)?;
    info!("Rendered weekday/hour heatmap to {}", path.display());
    Ok(())
}

fn chart_error(err: Box<dyn std::error::Error>) -> AnalyzerError {
    AnalyzerError::Chart(err.to_string())
}

fn draw_distribution(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> DrawResult {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let stats = &report.overall_stats;
    let bars = [
        ("Positive", stats.positive_count, config.positive_color),
        ("Negative", stats.negative_count, config.negative_color),
        ("Neutral", stats.neutral_count, config.neutral_color),
    ];
    let max_count = bars.iter().map(|(_, count, _)| *count).max().unwrap_or(0);
    let y_max = (max_count as f64 * 1.2).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0i32..3i32, 0f64..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&|x| {
            bars.get(*x as usize)
                .map(|(label, _, _)| (*label).to_string())
                .unwrap_or_default()
        })
        .y_desc("Messages")
        .draw()?;

    for (i, (_, count, color)) in bars.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as i32, 0.0), (i as i32 + 1, *count as f64)],
            color.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn draw_polarity_series(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> DrawResult {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = report.time_series.iter().map(|e| e.slot.label()).collect();
    let x_max = labels.len().max(1) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0i32..x_max, -1.05f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_labels(labels.len().clamp(1, 12))
        .x_label_formatter(&|x| labels.get(*x as usize).cloned().unwrap_or_default())
        .y_desc("Average polarity")
        .draw()?;

    chart.draw_series(LineSeries::new(
        report
            .time_series
            .iter()
            .enumerate()
            .map(|(i, entry)| (i as i32, entry.average_polarity)),
        &config.series_color,
    ))?;

    root.present()?;
    Ok(())
}

fn draw_volume_series(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> DrawResult {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = report.time_series.iter().map(|e| e.slot.label()).collect();
    let x_max = labels.len().max(1) as i32;
    let max_count = report
        .time_series
        .iter()
        .map(|e| e.message_count)
        .max()
        .unwrap_or(0);
    let y_max = (max_count as f64 * 1.2).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0i32..x_max, 0f64..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().clamp(1, 12))
        .x_label_formatter(&|x| labels.get(*x as usize).cloned().unwrap_or_default())
        .y_desc("Messages")
        .draw()?;

    chart.draw_series(report.time_series.iter().enumerate().map(|(i, entry)| {
        Rectangle::new(
            [(i as i32, 0.0), (i as i32 + 1, entry.message_count as f64)],
            config.series_color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_weekday_hour_heatmap(
    report: &SentimentReport,
    config: &ChartConfig,
    path: &Path,
    title: &str,
) -> DrawResult {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(100)
        .build_cartesian_2d(0i32..24i32, 0i32..7i32)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(24)
        .x_label_formatter(&|x| format!("{x:02}"))
        .y_labels(7)
        .y_label_formatter(&|y| {
            crate::period::WEEKDAYS
                .get(*y as usize)
                .map(|w| (*w).to_string())
                .unwrap_or_default()
        })
        .x_desc("Hour")
        .draw()?;

    for entry in &report.time_series {
        let TimeSlot::WeekdayHour { weekday, hour } = &entry.slot else {
            continue;
        };
        let x: i32 = hour.parse()?;
        let y = weekday_rank(weekday) as i32;
        if y >= 7 {
            continue;
        }
        let color = polarity_color(entry.average_polarity, config);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x, y), (x + 1, y + 1)],
            color.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// White at zero, shading toward the positive or negative color with the
/// magnitude of the polarity.
fn polarity_color(polarity: f64, config: &ChartConfig) -> RGBColor {
    let t = polarity.clamp(-1.0, 1.0);
    let base = if t >= 0.0 {
        config.positive_color
    } else {
        config.negative_color
    };
    let t = t.abs();
    RGBColor(
        blend_channel(base.0, t),
        blend_channel(base.1, t),
        blend_channel(base.2, t),
    )
}

fn blend_channel(target: u8, t: f64) -> u8 {
    (255.0 + (target as f64 - 255.0) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_color_is_white_at_zero_and_saturates_at_the_ends() {
        let config = ChartConfig::default();
        assert_eq!(polarity_color(0.0, &config), RGBColor(255, 255, 255));
        assert_eq!(polarity_color(1.0, &config), config.positive_color);
        assert_eq!(polarity_color(-1.0, &config), config.negative_color);
        // Out-of-range values clamp instead of wrapping.
        assert_eq!(polarity_color(5.0, &config), config.positive_color);
    }
}
