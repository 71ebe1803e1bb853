use crate::utils::dss::dss_reader::TimeSeries;
use crate::utils::errors::chart_errors::ChartError;
use chrono::{Duration, NaiveDateTime};
use plotters::prelude::*;
use std::path::Path;

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 600;

const LINE_COLOR: RGBColor = RGBColor(0x2e, 0x86, 0xab);

/// Render a record to a PNG at `out_path`.
pub fn render_png(series: &TimeSeries, out_path: &Path) -> Result<(), ChartError> {
    if series.times.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let (first, last) = padded_time_range(&series.times);
    let (lo, hi) = padded_value_range(&series.values);

    let root = BitMapBackend::new(out_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("DSS数据可视化结果", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(RangedDateTime::from(first..last), lo..hi)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("时间")
        .y_desc("数值")
        .light_line_style(BLACK.mix(0.1))
        .x_label_formatter(&|t: &NaiveDateTime| t.format("%d%b%Y %H:%M").to_string())
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            series
                .times
                .iter()
                .copied()
                .zip(series.values.iter().copied()),
            LINE_COLOR.stroke_width(2),
        ))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// A zero-width x range breaks the coordinate mapping; pad a single-point
/// series by an hour on each side.
fn padded_time_range(times: &[NaiveDateTime]) -> (NaiveDateTime, NaiveDateTime) {
    let first = times[0];
    let last = *times.last().unwrap_or(&first);
    if first == last {
        (first - Duration::hours(1), last + Duration::hours(1))
    } else {
        (first, last)
    }
}

fn padded_value_range(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}
