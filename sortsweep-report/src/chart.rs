//! Chart Rendering
//!
//! Renders one standalone SVG per input file: the mean real-time curve over
//! thread counts, with the baseline mean as a dashed reference line. Output
//! is a plain string; writing it next to the document is the caller's job.

use crate::report::FileSeries;
use std::fmt::Write;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 62.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 52.0;

const CURVE_COLOR: &str = "#1f77b4";
const BASELINE_COLOR: &str = "#d62728";
const GRID_COLOR: &str = "#dddddd";
const AXIS_COLOR: &str = "#444444";

/// Deterministic chart file name for an input label.
pub fn chart_file_name(label: &str) -> String {
    format!("{}_comparison.svg", label)
}

/// Render the comparative chart for one file.
///
/// Returns `None` when the series holds neither a curve point nor a baseline
/// reference, so callers skip the artifact instead of drawing an empty plot.
pub fn render_chart(series: &FileSeries) -> Option<String> {
    if !series.has_data() {
        return None;
    }

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x0 = MARGIN_LEFT;
    let y_bottom = MARGIN_TOP + plot_h;

    // Y spans 0 to a little above the largest mean, baseline included.
    let mut y_max = series
        .mean_real_s
        .iter()
        .chain(series.baseline_real_s.as_ref())
        .fold(0.0f64, |acc, v| acc.max(*v));
    y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let t_min = series.thread_counts.first().copied().unwrap_or(1);
    let t_max = series.thread_counts.last().copied().unwrap_or(t_min);

    let x_of = |threads: u32| -> f64 {
        if t_max == t_min {
            x0 + plot_w / 2.0
        } else {
            x0 + (threads - t_min) as f64 / (t_max - t_min) as f64 * plot_w
        }
    };
    let y_of = |value: f64| -> f64 { y_bottom - value / y_max * plot_h };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n"
    );
    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

    // Title
    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\">\
         Sorting time comparison - {}</text>\n",
        WIDTH / 2.0,
        escape_text(&series.label)
    );

    // Horizontal grid and y tick labels
    for tick in 0..=4 {
        let value = y_max * tick as f64 / 4.0;
        let y = y_of(value);
        let _ = write!(
            svg,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\"/>\n",
            x0,
            y,
            x0 + plot_w,
            y,
            GRID_COLOR
        );
        let _ = write!(
            svg,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{:.2}</text>\n",
            x0 - 8.0,
            y + 4.0,
            value
        );
    }

    // Axes
    let _ = write!(
        svg,
        "<line x1=\"{x0:.1}\" y1=\"{:.1}\" x2=\"{x0:.1}\" y2=\"{y_bottom:.1}\" stroke=\"{}\"/>\n",
        MARGIN_TOP, AXIS_COLOR
    );
    let _ = write!(
        svg,
        "<line x1=\"{x0:.1}\" y1=\"{y_bottom:.1}\" x2=\"{:.1}\" y2=\"{y_bottom:.1}\" stroke=\"{}\"/>\n",
        x0 + plot_w,
        AXIS_COLOR
    );

    // X ticks, one per measured thread count
    for &threads in &series.thread_counts {
        let x = x_of(threads);
        let _ = write!(
            svg,
            "<line x1=\"{x:.1}\" y1=\"{y_bottom:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"{}\"/>\n",
            y_bottom + 5.0,
            AXIS_COLOR
        );
        let _ = write!(
            svg,
            "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>\n",
            y_bottom + 19.0,
            threads
        );
    }

    // Axis labels
    let _ = write!(
        svg,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\">Threads</text>\n",
        x0 + plot_w / 2.0,
        HEIGHT - 14.0
    );
    let _ = write!(
        svg,
        "<text x=\"16\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" \
         transform=\"rotate(-90 16 {:.1})\">Mean real time (s)</text>\n",
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0
    );

    // Baseline reference line
    if let Some(baseline) = series.baseline_real_s {
        let y = y_of(baseline);
        let _ = write!(
            svg,
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{}\" \
             stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n",
            x0,
            x0 + plot_w,
            BASELINE_COLOR
        );
    }

    // Threaded curve
    if !series.thread_counts.is_empty() {
        let points: Vec<String> = series
            .thread_counts
            .iter()
            .zip(&series.mean_real_s)
            .map(|(&threads, &mean)| format!("{:.1},{:.1}", x_of(threads), y_of(mean)))
            .collect();
        let _ = write!(
            svg,
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            points.join(" "),
            CURVE_COLOR
        );
        for (&threads, &mean) in series.thread_counts.iter().zip(&series.mean_real_s) {
            let _ = write!(
                svg,
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{}\"/>\n",
                x_of(threads),
                y_of(mean),
                CURVE_COLOR
            );
        }
    }

    // Legend, top right of the plot area
    let legend_x = x0 + plot_w - 130.0;
    if !series.thread_counts.is_empty() {
        let _ = write!(
            svg,
            "<line x1=\"{legend_x:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">threaded</text>\n",
            MARGIN_TOP + 10.0,
            legend_x + 24.0,
            MARGIN_TOP + 10.0,
            CURVE_COLOR,
            legend_x + 30.0,
            MARGIN_TOP + 14.0
        );
    }
    if series.baseline_real_s.is_some() {
        let _ = write!(
            svg,
            "<line x1=\"{legend_x:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" \
             stroke-width=\"2\" stroke-dasharray=\"6 4\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">baseline</text>\n",
            MARGIN_TOP + 26.0,
            legend_x + 24.0,
            MARGIN_TOP + 26.0,
            BASELINE_COLOR,
            legend_x + 30.0,
            MARGIN_TOP + 30.0
        );
    }

    svg.push_str("</svg>\n");
    Some(svg)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
