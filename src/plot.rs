//! Trajectory scatter plots rendered with plotters.

use std::fs;
use std::io;
use std::path::Path;

use plotters::prelude::*;
use sat_orbits::Trajectory;
use thiserror::Error;

/// Image size and decoration switches for a trajectory plot.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    /// Draw caption, axes, and tick labels. Turning this off avoids font lookups.
    pub labels: bool,
    pub caption: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 900,
            labels: true,
            caption: "Satellite path".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("trajectory has no samples")]
    Empty,
    #[error("time array has {times} samples but the trajectory has {points}")]
    LengthMismatch { times: usize, points: usize },
    #[error("failed to prepare output: {0}")]
    Io(#[from] io::Error),
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Scatter the trajectory's `(x, y)` samples, coloured by time on a jet ramp, into a PNG.
pub fn render_trajectory(
    path: &Path,
    trajectory: &Trajectory,
    times_s: &[f64],
    opts: &PlotOptions,
) -> Result<(), PlotError> {
    if trajectory.is_empty() {
        return Err(PlotError::Empty);
    }
    if times_s.len() != trajectory.len() {
        return Err(PlotError::LengthMismatch {
            times: times_s.len(),
            points: trajectory.len(),
        });
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    draw(path, trajectory, times_s, opts).map_err(|err| PlotError::Draw(err.to_string()))
}

fn draw(
    path: &Path,
    trajectory: &Trajectory,
    times_s: &[f64],
    opts: &PlotOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (x_range, y_range) = padded_bounds(trajectory);
    let (t_min, t_max) = min_max(times_s.iter().copied());

    let root = BitMapBackend::new(path, (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if opts.labels {
        let family = select_font_family();
        builder
            .caption(opts.caption.as_str(), FontDesc::new(family, 24.0, FontStyle::Bold))
            .x_label_area_size(50)
            .y_label_area_size(80);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    if opts.labels {
        chart
            .configure_mesh()
            .x_desc("X location [km]")
            .y_desc("Y location [km]")
            .x_labels(6)
            .y_labels(6)
            .draw()?;
    }

    chart.draw_series(trajectory.points().zip(times_s).map(|((x, y), &t)| {
        let frac = if (t_max - t_min).abs() < f64::EPSILON {
            0.0
        } else {
            (t - t_min) / (t_max - t_min)
        };
        Circle::new((x, y), 4, jet_color(frac).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn padded_bounds(trajectory: &Trajectory) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let pad = |(lo, hi): (f64, f64)| {
        let span = (hi - lo).abs().max(1.0);
        (lo - 0.05 * span)..(hi + 0.05 * span)
    };
    (
        pad(min_max(trajectory.x.iter().copied())),
        pad(min_max(trajectory.y.iter().copied())),
    )
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn jet_color(t_in: f64) -> RGBColor {
    let t = t_in.clamp(0.0, 1.0);
    fn comp(v: f64) -> f64 {
        (1.0 - (v - 1.0).abs()).clamp(0.0, 1.0)
    }
    let r = comp(1.5 - 4.0 * (t - 0.75).abs());
    let g = comp(1.5 - 4.0 * (t - 0.5).abs());
    let b = comp(1.5 - 4.0 * (t - 0.25).abs());
    RGBColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
