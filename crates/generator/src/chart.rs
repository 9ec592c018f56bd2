//! Server-side SVG rendering for chart elements.

use crate::html::{fmt_num, html_escape};
use sitekit_core::color_or;
use sitekit_core::elements::{Chart, ChartDataset, ChartType};
use std::f64::consts::PI;
use std::fmt::Write as _;

const WIDTH: f64 = 600.0;
const MARGIN_LEFT: f64 = 44.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 32.0;
const GRID_LINES: usize = 4;

pub const PALETTE: &[&str] = &[
    "#4f46e5", "#06b6d4", "#f59e0b", "#10b981", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6",
];

fn palette(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// Smallest 1/2/5 x 10^n at or above `v`.
pub fn nice_max(v: f64) -> f64 {
    if !v.is_finite() || v <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(v.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= v)
        .unwrap_or(10.0 * magnitude)
}

pub fn render_chart(chart: &Chart) -> String {
    let datasets = chart.effective_datasets();
    let height = chart.height.clamp(120, 800) as f64;
    let title = html_escape(&chart.title);
    let caption = if chart.title.is_empty() {
        String::new()
    } else {
        format!("<figcaption>{}</figcaption>", title)
    };

    if datasets.iter().all(|d| d.values.is_empty()) {
        return format!(
            "<figure class=\"el-chart\">{}<p class=\"chart-empty\">No data</p></figure>",
            caption
        );
    }

    let (svg, legend) = match chart.chart_type {
        ChartType::Bar => (bar_chart(&chart.labels, &datasets, height), dataset_legend(&datasets)),
        ChartType::Line => (line_chart(&chart.labels, &datasets, height), dataset_legend(&datasets)),
        ChartType::Pie | ChartType::Doughnut => {
            // Slices come from the first dataset that has values.
            let values = datasets
                .iter()
                .map(|d| d.values.as_slice())
                .find(|v| !v.is_empty())
                .unwrap_or_default();
            let doughnut = chart.chart_type == ChartType::Doughnut;
            (
                pie_chart(values, height, doughnut),
                slice_legend(&chart.labels, values.len()),
            )
        }
    };
    let legend = if chart.show_legend { legend } else { String::new() };

    format!(
        "<figure class=\"el-chart\">\n<svg viewBox=\"0 0 {} {}\" role=\"img\" aria-label=\"{}\" preserveAspectRatio=\"xMidYMid meet\">\n{}</svg>\n{}{}</figure>",
        WIDTH,
        height,
        if title.is_empty() { "Chart".to_string() } else { title },
        svg,
        legend,
        caption
    )
}

fn dataset_color(dataset: &ChartDataset, i: usize) -> String {
    color_or(dataset.color.as_deref(), palette(i))
}

fn axis(max: f64, height: f64) -> String {
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let mut out = String::new();
    for k in 0..=GRID_LINES {
        let frac = k as f64 / GRID_LINES as f64;
        let y = MARGIN_TOP + plot_h - frac * plot_h;
        let _ = writeln!(
            out,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"#e5e7eb\"/><text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" text-anchor=\"end\" fill=\"#6b7280\">{}</text>",
            MARGIN_LEFT,
            y,
            WIDTH - MARGIN_RIGHT,
            y,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            fmt_num(max * frac)
        );
    }
    out
}

fn x_label(out: &mut String, x: f64, height: f64, label: &str) {
    let _ = writeln!(
        out,
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" text-anchor=\"middle\" fill=\"#374151\">{}</text>",
        x,
        height - 10.0,
        html_escape(label)
    );
}

fn bar_chart(labels: &[String], datasets: &[ChartDataset], height: f64) -> String {
    let groups = datasets
        .iter()
        .map(|d| d.values.len())
        .max()
        .unwrap_or(0)
        .max(labels.len())
        .max(1);
    let max = nice_max(
        datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max),
    );

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let group_w = plot_w / groups as f64;
    let bar_w = group_w * 0.8 / datasets.len() as f64;

    let mut out = axis(max, height);
    for (j, dataset) in datasets.iter().enumerate() {
        let color = dataset_color(dataset, j);
        for (i, value) in dataset.values.iter().enumerate() {
            let bar_h = value.max(0.0) / max * plot_h;
            let x = MARGIN_LEFT + i as f64 * group_w + group_w * 0.1 + j as f64 * bar_w;
            let y = MARGIN_TOP + plot_h - bar_h;
            let _ = writeln!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" rx=\"2\"><title>{}</title></rect>",
                x,
                y,
                bar_w,
                bar_h,
                color,
                fmt_num(*value)
            );
        }
    }
    for (i, label) in labels.iter().enumerate().take(groups) {
        x_label(&mut out, MARGIN_LEFT + (i as f64 + 0.5) * group_w, height, label);
    }
    out
}

fn line_chart(labels: &[String], datasets: &[ChartDataset], height: f64) -> String {
    let points = datasets
        .iter()
        .map(|d| d.values.len())
        .max()
        .unwrap_or(0)
        .max(labels.len())
        .max(1);
    let max = nice_max(
        datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .fold(0.0, f64::max),
    );

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let x_at = |i: usize| {
        if points == 1 {
            MARGIN_LEFT + plot_w / 2.0
        } else {
            MARGIN_LEFT + i as f64 * plot_w / (points - 1) as f64
        }
    };
    let y_at = |v: f64| MARGIN_TOP + plot_h - v.max(0.0) / max * plot_h;

    let mut out = axis(max, height);
    for (j, dataset) in datasets.iter().enumerate() {
        let color = dataset_color(dataset, j);
        let coords: Vec<String> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.2},{:.2}", x_at(i), y_at(*v)))
            .collect();
        let _ = writeln!(
            out,
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2.5\"/>",
            coords.join(" "),
            color
        );
        for (i, v) in dataset.values.iter().enumerate() {
            let _ = writeln!(
                out,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\"><title>{}</title></circle>",
                x_at(i),
                y_at(*v),
                color,
                fmt_num(*v)
            );
        }
    }
    for (i, label) in labels.iter().enumerate().take(points) {
        x_label(&mut out, x_at(i), height, label);
    }
    out
}

fn pie_chart(values: &[f64], height: f64, doughnut: bool) -> String {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    let cx = WIDTH / 2.0;
    let cy = height / 2.0;
    let r = (height / 2.0 - 10.0).max(10.0);

    let mut out = String::new();
    if total <= 0.0 {
        let _ = writeln!(
            out,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"#e5e7eb\"/>",
            cx, cy, r
        );
    } else {
        let mut angle = -PI / 2.0;
        for (i, value) in values.iter().enumerate() {
            let fraction = value.max(0.0) / total;
            if fraction <= 0.0 {
                continue;
            }
            let color = palette(i);
            if fraction >= 0.9999 {
                let _ = writeln!(
                    out,
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                    cx, cy, r, color
                );
                break;
            }
            let end = angle + fraction * 2.0 * PI;
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large = if fraction > 0.5 { 1 } else { 0 };
            let _ = writeln!(
                out,
                "<path d=\"M{:.2} {:.2} L{:.2} {:.2} A{:.2} {:.2} 0 {} 1 {:.2} {:.2} Z\" fill=\"{}\" stroke=\"#ffffff\" stroke-width=\"1\"><title>{}</title></path>",
                cx,
                cy,
                x1,
                y1,
                r,
                r,
                large,
                x2,
                y2,
                color,
                fmt_num(*value)
            );
            angle = end;
        }
    }
    if doughnut {
        let _ = writeln!(
            out,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"#ffffff\"/>",
            cx,
            cy,
            r * 0.55
        );
    }
    out
}

fn legend_item(color: &str, label: &str) -> String {
    format!(
        "<li><span class=\"legend-swatch\" style=\"background:{}\"></span>{}</li>",
        color,
        html_escape(label)
    )
}

fn dataset_legend(datasets: &[ChartDataset]) -> String {
    let items: String = datasets
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.label.is_empty())
        .map(|(i, d)| legend_item(&dataset_color(d, i), &d.label))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"chart-legend\">{}</ul>\n", items)
    }
}

fn slice_legend(labels: &[String], count: usize) -> String {
    let items: String = labels
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, label)| legend_item(palette(i), label))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"chart-legend\">{}</ul>\n", items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(chart_type: ChartType, values: &[f64]) -> Chart {
        Chart {
            chart_type,
            title: "Sales".to_string(),
            labels: vec!["Q1".into(), "Q2".into(), "Q3".into()],
            values: values.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_nice_max() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(7.0), 10.0);
        assert_eq!(nice_max(12.0), 20.0);
        assert_eq!(nice_max(45.0), 50.0);
        assert_eq!(nice_max(100.0), 100.0);
        assert_eq!(nice_max(f64::NAN), 1.0);
    }

    #[test]
    fn test_bar_chart_draws_one_rect_per_value() {
        let svg = render_chart(&chart(ChartType::Bar, &[10.0, 20.0, 5.0]));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("<figcaption>Sales</figcaption>"));
        assert!(svg.contains(">Q2</text>"));
        // tallest bar reaches the top of the plot (max rounds to 20)
        assert!(svg.contains(&format!("y=\"{:.2}\"", MARGIN_TOP)));
    }

    #[test]
    fn test_line_chart_polyline() {
        let svg = render_chart(&chart(ChartType::Line, &[1.0, 2.0, 3.0]));
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 3);
    }

    #[test]
    fn test_pie_and_doughnut() {
        let pie = render_chart(&chart(ChartType::Pie, &[1.0, 1.0, 2.0]));
        assert_eq!(pie.matches("<path").count(), 3);
        assert!(pie.contains("chart-legend"));

        let doughnut = render_chart(&chart(ChartType::Doughnut, &[1.0, 1.0, 2.0]));
        assert!(doughnut.contains("fill=\"#ffffff\"/>"));
    }

    #[test]
    fn test_pie_skips_empty_leading_dataset() {
        let mut c = chart(ChartType::Pie, &[]);
        c.datasets = vec![
            ChartDataset::default(),
            ChartDataset {
                label: "2024".into(),
                values: vec![1.0, 2.0, 3.0],
                color: None,
            },
        ];
        let svg = render_chart(&c);
        assert_eq!(svg.matches("<path").count(), 3);
        assert_eq!(svg.matches("<li").count(), 3);
    }

    #[test]
    fn test_pie_single_slice_is_a_circle() {
        let svg = render_chart(&chart(ChartType::Pie, &[5.0, 0.0]));
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_empty_chart() {
        let svg = render_chart(&chart(ChartType::Bar, &[]));
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<svg"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut c = chart(ChartType::Bar, &[1.0]);
        c.labels = vec!["<b>".into()];
        c.title = "A & B".into();
        let svg = render_chart(&c);
        assert!(svg.contains("&lt;b&gt;"));
        assert!(svg.contains("aria-label=\"A &amp; B\""));
    }
}
