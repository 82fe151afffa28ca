//! FILENAME: app/src/chart.rs
// PURPOSE: Bar chart of the highest-consuming objects, rendered to SVG.
// CONTEXT: Bars use the raw totals of the chart series; only tables and the
//          export use locale-formatted strings.

use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use summary_engine::ChartSeries;

use crate::pipeline::PipelineError;

/// Steel blue.
const DEFAULT_BAR_COLOR: (u8, u8, u8) = (70, 130, 180);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Chart caption. When unset, the caption names the configured top-N.
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub bar_color: (u8, u8, u8),
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: None,
            x_label: "Obj. Nr.".to_string(),
            y_label: "kWh".to_string(),
            width: 1000,
            height: 600,
            bar_color: DEFAULT_BAR_COLOR,
        }
    }
}

impl ChartSettings {
    /// The caption names how many objects the chart is meant to rank, even
    /// when fewer objects exist.
    pub fn caption(&self, top_n: usize) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => format!("Top {} Objects by kWh Consumption", top_n),
        }
    }
}

fn chart_error<E: std::fmt::Display>(err: E) -> PipelineError {
    PipelineError::Chart(err.to_string())
}

/// Y axis bounds that contain zero and every finite value, padded on the
/// open side(s).
fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = || values.iter().copied().filter(|v| v.is_finite());
    let min = finite().fold(0.0_f64, f64::min);
    let max = finite().fold(0.0_f64, f64::max);

    if min == max {
        return (0.0, 1.0);
    }

    let span = max - min;
    let lower = if min < 0.0 { min - span * 0.05 } else { 0.0 };
    let upper = if max > 0.0 { max + span * 0.05 } else { 0.0 };
    (lower, upper)
}

/// Renders the series as a vertical bar chart and returns the SVG document.
/// `top_n` is the configured series length and only feeds the caption.
pub fn render_bar_chart_svg(
    series: &ChartSeries,
    settings: &ChartSettings,
    top_n: usize,
) -> Result<String, PipelineError> {
    if series.is_empty() {
        return Err(PipelineError::Chart("nothing to plot".to_string()));
    }
    if let Some(i) = series.values.iter().position(|v| !v.is_finite()) {
        return Err(PipelineError::Chart(format!(
            "value for '{}' is not a finite number",
            series.labels.get(i).map(String::as_str).unwrap_or_default()
        )));
    }

    let bars = series.len();
    let (y_min, y_max) = value_range(&series.values);
    let color = RGBColor(settings.bar_color.0, settings.bar_color.1, settings.bar_color.2);
    let labels = &series.labels;
    let caption = settings.caption(top_n);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (settings.width, settings.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        // Segmented integer ranges are inclusive, so the last slot stays empty.
        let mut chart = ChartBuilder::on(&root)
            .caption(&caption, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(140)
            .y_label_area_size(80)
            .build_cartesian_2d((0..bars).into_segmented(), y_min..y_max)
            .map_err(chart_error)?;

        let label_of = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => labels.get(*i).cloned().unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars + 1)
            .x_label_formatter(&label_of)
            .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
            .x_desc(settings.x_label.as_str())
            .y_desc(settings.y_label.as_str())
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(color.filled())
                    .margin(8)
                    .data(series.values.iter().enumerate().map(|(i, v)| (i, *v))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }

    Ok(svg)
}
