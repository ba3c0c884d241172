//! SVG price chart for the detail view.
//!
//! Close line with point markers, dashed high and low lines, and a dashed
//! reference line at the average close. The y-axis spans 2% below the lowest
//! low to 2% above the highest high.

use crate::domain::format::{format_price, format_short_date, format_thousands};
use crate::domain::price_bar::{highest_high, lowest_low, PriceBar};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const PAD_LEFT: f64 = 70.0;
const PAD_RIGHT: f64 = 30.0;
const PAD_TOP: f64 = 20.0;
const PAD_BOTTOM: f64 = 60.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 8;

const CLOSE_COLOR: &str = "#3498db";
const HIGH_COLOR: &str = "#e74c3c";
const LOW_COLOR: &str = "#27ae60";
const AVERAGE_COLOR: &str = "#95a5a6";
const AXIS_COLOR: &str = "#7f8c8d";
const GRID_COLOR: &str = "#f0f0f0";

struct Scale {
    min: f64,
    max: f64,
    count: usize,
}

impl Scale {
    fn plot_width() -> f64 {
        WIDTH - PAD_LEFT - PAD_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - PAD_TOP - PAD_BOTTOM
    }

    fn x(&self, i: usize) -> f64 {
        if self.count > 1 {
            PAD_LEFT + i as f64 * Self::plot_width() / (self.count - 1) as f64
        } else {
            PAD_LEFT + Self::plot_width() / 2.0
        }
    }

    fn y(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            PAD_TOP + (self.max - value) / range * Self::plot_height()
        } else {
            PAD_TOP + Self::plot_height() / 2.0
        }
    }
}

fn polyline(bars: &[PriceBar], scale: &Scale, value: impl Fn(&PriceBar) -> f64) -> String {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| format!("{:.1},{:.1}", scale.x(i), scale.y(value(bar))))
        .collect::<Vec<_>>()
        .join(" ")
}

fn tooltip(bar: &PriceBar) -> String {
    format!(
        "日付: {}\n始値: ${}\n高値: ${}\n安値: ${}\n終値: ${}\n出来高: {}",
        format_short_date(bar.date),
        format_price(bar.open),
        format_price(bar.high),
        format_price(bar.low),
        format_price(bar.close),
        format_thousands(bar.volume)
    )
}

pub fn generate_price_svg(bars: &[PriceBar]) -> String {
    let (Some(low), Some(high)) = (lowest_low(bars), highest_high(bars)) else {
        return "<p class=\"no-data\">価格データがありません</p>".to_string();
    };

    let scale = Scale {
        min: low * 0.98,
        max: high * 1.02,
        count: bars.len(),
    };
    let average = bars.iter().map(|b| b.close).sum::<f64>() / bars.len() as f64;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w:.0} {h:.0}" width="100%" height="{h:.0}" class="price-chart" role="img">"#,
        w = WIDTH,
        h = HEIGHT
    );

    for t in 0..=Y_TICKS {
        let value = scale.min + (scale.max - scale.min) * t as f64 / Y_TICKS as f64;
        let y = scale.y(value);
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{GRID_COLOR}" stroke-dasharray="3 3"/>"#,
            PAD_LEFT,
            WIDTH - PAD_RIGHT,
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" fill="{AXIS_COLOR}" font-size="12" text-anchor="end">${}</text>"#,
            PAD_LEFT - 8.0,
            y + 4.0,
            format_price(value)
        ));
    }

    let step = bars.len().div_ceil(MAX_X_LABELS).max(1);
    for (i, bar) in bars.iter().enumerate().step_by(step) {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" fill="{AXIS_COLOR}" font-size="12" text-anchor="middle">{}</text>"#,
            scale.x(i),
            HEIGHT - PAD_BOTTOM + 20.0,
            format_short_date(bar.date)
        ));
    }

    let avg_y = scale.y(average);
    svg.push_str(&format!(
        r#"<line x1="{:.1}" y1="{avg_y:.1}" x2="{:.1}" y2="{avg_y:.1}" stroke="{AVERAGE_COLOR}" stroke-dasharray="5 5" class="average-line"/>"#,
        PAD_LEFT,
        WIDTH - PAD_RIGHT,
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" fill="{AVERAGE_COLOR}" font-size="12" text-anchor="end">平均価格</text>"#,
        WIDTH - PAD_RIGHT,
        avg_y - 6.0
    ));

    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{HIGH_COLOR}" stroke-width="1" stroke-dasharray="3 3" class="high-line"/>"#,
        polyline(bars, &scale, |b| b.high)
    ));
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{LOW_COLOR}" stroke-width="1" stroke-dasharray="3 3" class="low-line"/>"#,
        polyline(bars, &scale, |b| b.low)
    ));
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{CLOSE_COLOR}" stroke-width="2" class="close-line"/>"#,
        polyline(bars, &scale, |b| b.close)
    ));

    for (i, bar) in bars.iter().enumerate() {
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{CLOSE_COLOR}"><title>{}</title></circle>"#,
            scale.x(i),
            scale.y(bar.close),
            tooltip(bar)
        ));
    }

    let legend_y = HEIGHT - 15.0;
    for (i, (label, color)) in [("終値", CLOSE_COLOR), ("高値", HIGH_COLOR), ("安値", LOW_COLOR)]
        .iter()
        .enumerate()
    {
        let x = WIDTH / 2.0 - 120.0 + i as f64 * 90.0;
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{color}" stroke-width="2"/><text x="{:.1}" y="{:.1}" font-size="12" fill="{color}">{label}</text>"#,
            x,
            legend_y,
            x + 20.0,
            legend_y,
            x + 26.0,
            legend_y + 4.0,
        ));
    }

    svg.push_str("</svg>");
    svg
}
