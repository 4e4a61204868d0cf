//! Bar chart of summed sales per product, written as an SVG document.

use crate::domain::model::Table;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use crate::utils::format::format_axis_value;
use std::fmt::{self, Write};

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 130.0;
const BAR_FILL_RATIO: f64 = 0.5;
const TARGET_TICKS: usize = 5;
const MAX_TICKS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub bar_color: String,
}

impl ChartOptions {
    pub fn for_currency(symbol: &str) -> Self {
        Self {
            y_label: format!("Sales ({})", symbol),
            ..Self::default()
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Total Sales by Product".to_string(),
            x_label: "Product".to_string(),
            y_label: "Sales (£)".to_string(),
            width: 1000,
            height: 600,
            bar_color: "skyblue".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    options: ChartOptions,
}

impl ChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Bars are ordered by product label.
    pub fn render_svg(&self, table: &Table) -> Result<String> {
        if table.is_empty() {
            return Err(EtlError::EmptyDataset);
        }

        let mut totals = table.product_totals();
        totals.sort_by(|a, b| a.0.cmp(&b.0));

        let mut svg = String::new();
        self.write_svg(&mut svg, &totals)
            .map_err(|e| EtlError::IoError(std::io::Error::other(e)))?;
        Ok(svg)
    }

    fn write_svg(&self, svg: &mut String, totals: &[(String, f64)]) -> fmt::Result {
        let opts = &self.options;
        let width = f64::from(opts.width);
        let height = f64::from(opts.height);
        let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
        let baseline = MARGIN_TOP + plot_h;

        let max = totals.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let ticks = nice_ticks(max, TARGET_TICKS);
        let y_max = ticks.last().copied().unwrap_or(1.0);
        let scale = |v: f64| v / y_max * plot_h;

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = opts.width,
            h = opts.height
        )?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="18">{}</text>"#,
            width / 2.0,
            MARGIN_TOP / 2.0,
            escape_xml(&opts.title)
        )?;

        for tick in &ticks {
            let y = baseline - scale(*tick);
            writeln!(
                svg,
                r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#dddddd"/>"##,
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w,
                y = y
            )?;
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12">{}</text>"#,
                MARGIN_LEFT - 8.0,
                y + 4.0,
                format_axis_value(*tick)
            )?;
        }

        let slot = plot_w / totals.len() as f64;
        let bar_w = slot * BAR_FILL_RATIO;
        for (i, (product, total)) in totals.iter().enumerate() {
            let center = MARGIN_LEFT + slot * (i as f64 + 0.5);
            let bar_h = scale(*total);
            writeln!(
                svg,
                r#"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                center - bar_w / 2.0,
                baseline - bar_h,
                bar_w,
                bar_h,
                escape_xml(&opts.bar_color),
                escape_xml(product),
                format_axis_value(*total)
            )?;
            let label_y = baseline + 16.0;
            writeln!(
                svg,
                r#"<text x="{x:.1}" y="{y:.1}" text-anchor="end" font-size="12" transform="rotate(-45 {x:.1} {y:.1})">{label}</text>"#,
                x = center,
                y = label_y,
                label = escape_xml(product)
            )?;
        }

        writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{b:.1}" x2="{:.1}" y2="{b:.1}" stroke="black"/>"#,
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w,
            b = baseline
        )?;
        writeln!(
            svg,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="black"/>"#,
            MARGIN_TOP,
            baseline,
            x = MARGIN_LEFT
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            height - 12.0,
            escape_xml(&opts.x_label)
        )?;
        writeln!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 {x:.1} {y:.1})">{label}</text>"#,
            x = 20.0,
            y = MARGIN_TOP + plot_h / 2.0,
            label = escape_xml(&opts.y_label)
        )?;
        writeln!(svg, "</svg>")
    }

    pub fn render_chart<S: Storage>(&self, table: &Table, storage: &S, name: &str) -> Result<String> {
        let svg = self.render_svg(table)?;
        storage.write_file(name, svg.as_bytes())?;
        let location = storage.output_location(name);
        tracing::info!("Dashboard saved as '{}'", location);
        Ok(location)
    }
}

/// Evenly spaced axis values from zero up to at least `max`, stepping by
/// 1, 2 or 5 times a power of ten.
/// Falls back to `[0, 1]` when `max` is too small to step through, and to
/// `[0, max]` when a rounded-up top tick would overflow.
pub fn nice_ticks(max: f64, target: usize) -> Vec<f64> {
    if max <= 0.0 || !max.is_finite() {
        return vec![0.0, 1.0];
    }
    let raw_step = max / target.max(1) as f64;
    if raw_step < f64::MIN_POSITIVE {
        return vec![0.0, 1.0];
    }
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;
    if !step.is_finite() || step <= 0.0 {
        return vec![0.0, 1.0];
    }
    let count = ((max / step).ceil() as usize).clamp(1, MAX_TICKS);
    let ticks: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
    match ticks.last() {
        Some(top) if top.is_finite() => ticks,
        _ => vec![0.0, max],
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
