//! Plain-text rendering of the list and detail views for the CLI.

use crate::app::dashboard::StockDetail;
use crate::domain::analysis::AnalysisSummary;
use crate::domain::format::{
    format_change, format_change_percent, format_market_cap, format_moving_average, format_price,
    format_timestamp, format_volume,
};
use crate::domain::quote::StockQuote;

pub const LOADING: &str = "データを読み込んでいます...";
pub const FETCH_FAILED: &str = "株価データの取得に失敗しました";
pub const NOT_FOUND: &str = "株価データが見つかりませんでした";

pub fn render_list(quotes: &[StockQuote]) -> String {
    let mut out = String::from("株価一覧\n");
    out.push_str(&format!(
        "{:<8} {:<24} {:>10} {:>18} {:>9} {:>9}\n",
        "銘柄", "名称", "株価", "前日比", "出来高", "時価総額"
    ));
    for q in quotes {
        out.push_str(&format!(
            "{:<8} {:<24} {:>10} {:>18} {:>9} {:>9}\n",
            q.symbol,
            q.name,
            format!("${}", format_price(q.price)),
            format!(
                "{} ({})",
                format_change(q.change),
                format_change_percent(q.change_percent)
            ),
            format_volume(q.volume),
            format!("${}", format_market_cap(q.market_cap)),
        ));
    }
    out
}

pub fn render_analysis(analysis: &AnalysisSummary) -> String {
    let mut out = String::from("テクニカル分析\n");
    out.push_str(&format!(
        "  5日移動平均:   {}\n",
        format_moving_average(analysis.moving_average_5)
    ));
    out.push_str(&format!(
        "  20日移動平均:  {}\n",
        format_moving_average(analysis.moving_average_20)
    ));
    out.push_str(&format!(
        "  50日移動平均:  {}\n",
        format_moving_average(analysis.moving_average_50)
    ));
    out.push_str(&format!("  ボラティリティ: {:.2}\n", analysis.volatility));
    out.push_str(&format!(
        "  トレンド:      {} {}\n",
        analysis.trend.icon(),
        analysis.trend.label()
    ));
    out
}

pub fn render_detail(detail: &StockDetail) -> String {
    let q = &detail.quote;
    let mut out = format!("{} {}\n", q.symbol, q.name);
    out.push_str(&format!(
        "  ${}  {} ({})\n",
        format_price(q.price),
        format_change(q.change),
        format_change_percent(q.change_percent)
    ));
    out.push_str(&format!("  出来高:   {}\n", format_volume(q.volume)));
    out.push_str(&format!("  時価総額: ${}\n", format_market_cap(q.market_cap)));
    out.push_str(&format!("  最終更新: {}\n", format_timestamp(&q.timestamp)));

    if let (Some(first), Some(last)) = (detail.history.first(), detail.history.last()) {
        out.push_str(&format!(
            "\n価格履歴 ({} - {}, {}日分)\n",
            first.date,
            last.date,
            detail.history.len()
        ));
        for bar in detail.history.iter().rev().take(5) {
            out.push_str(&format!(
                "  {}  始値 {:>9}  高値 {:>9}  安値 {:>9}  終値 {:>9}  出来高 {}\n",
                bar.date,
                format_price(bar.open),
                format_price(bar.high),
                format_price(bar.low),
                format_price(bar.close),
                format_volume(bar.volume)
            ));
        }
    }

    if let Some(analysis) = &detail.analysis {
        out.push('\n');
        out.push_str(&render_analysis(analysis));
    }
    out
}
