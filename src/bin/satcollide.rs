//! Compute satellite positions, angles, and pairwise crossing collisions for a shared orbit,
//! then export the all-pairs collision table.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use satellite_collision::config::{ScenarioConfig, load_scenario};
use satellite_collision::export::collisions::write_csv;
use satellite_collision::export::summary::{self, Metadata};
use satellite_collision::export::workbook::write_xlsx;
use satellite_collision::export::{
    DEFAULT_OUTPUT_DIR, default_output_path, is_stdout, writer_for_path,
};
use satellite_collision::orbits::{Collision, StartPhases};
use satellite_collision::plot::{PlotOptions, render_trajectory};
use satellite_collision::primitives::constants::DEFAULT_TRAJECTORY_SAMPLES;
use satellite_collision::primitives::time::linspace;
use satellite_collision::primitives::units::minutes_to_seconds;
use satellite_collision::scenario::{EPOCH_FORMAT, Scenario};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Time (seconds) at which every satellite's angle is reported.
const ANGLE_REPORT_TIME_S: f64 = 3_600.0;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Use the shared-orbit satellite model to calculate collisions"
)]
struct Cli {
    /// Scenario file (YAML or TOML); flags below override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Minor axis of the elliptic orbit in km (x radius)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    minor_axis: Option<f64>,

    /// Major axis of the elliptic orbit in km (y radius)
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    major_axis: Option<f64>,

    /// Orbital period of each satellite in minutes
    #[arg(short = 't', long = "period", num_args = 1.., allow_negative_numbers = true)]
    periods: Vec<f64>,

    /// Starting point of each satellite in radians (defaults to π/2 for all)
    #[arg(short = 's', long = "start-point", num_args = 1.., allow_negative_numbers = true)]
    start_points: Option<Vec<f64>>,

    /// Number of years to search for a collision (defaults to 2)
    #[arg(short = 'm', long)]
    max_year: Option<u32>,

    /// Name of the collision table file (written as <name>.xlsx; '-' streams CSV to stdout)
    #[arg(short = 'o', long)]
    collision_output: Option<String>,

    /// Directory the collision table is written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// UTC epoch (YYYY-MM-DD HH:MM:SS) to stamp collision times with
    #[arg(long)]
    epoch: Option<String>,

    /// Also write the table as CSV next to the workbook
    #[arg(long, default_value_t = false)]
    csv: bool,

    /// Also write a JSON summary next to the workbook
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Render the first satellite's path to this PNG
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Skip caption and axis text on the plot
    #[arg(long, default_value_t = false)]
    plot_no_labels: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_config = match &cli.config {
        Some(path) => load_scenario(path)?,
        None => ScenarioConfig::default(),
    };
    let overrides = ScenarioConfig {
        name: None,
        minor_axis_km: cli.minor_axis,
        major_axis_km: cli.major_axis,
        periods_min: cli.periods.clone(),
        start_points_rad: cli.start_points.clone(),
        max_years: cli.max_year,
        output: cli.collision_output.clone(),
        epoch: cli.epoch.clone(),
    };
    let scenario = Scenario::try_from(file_config.merged_with(overrides))?;
    let model = &scenario.model;
    let table_path = default_output_path(&cli.output_dir, scenario.output.as_deref());
    anyhow::ensure!(
        !(cli.json && is_stdout(&table_path)),
        "--json needs a named output; it cannot be combined with '-o -'"
    );

    info!("minor_axis = {} km", model.minor_axis());
    info!("major_axis = {} km", model.major_axis());
    info!("periods = {:?} min", model.periods());
    info!("start_points = {:?} rad", scenario.start_points);
    info!("max_years = {}", scenario.max_years);
    info!("collision_output = {:?}", scenario.output);

    // Path of the first satellite over one full period.
    let index = 1;
    let period_s = minutes_to_seconds(model.period(index)?);
    let times = linspace(0.0, period_s, DEFAULT_TRAJECTORY_SAMPLES);
    let trajectory = model.trajectory(index, &times, scenario.start_phase(index)?)?;
    println!("\nFirst satellite path (plane offset {} deg):", trajectory.plane_offset_deg);
    for (t, (x, y)) in times.iter().zip(trajectory.points()) {
        println!("  t = {t:>8.1} s   x = {x:>11.3} km   y = {y:>11.3} km");
    }

    let angles = model.angle(
        ANGLE_REPORT_TIME_S,
        StartPhases::PerSatellite(&scenario.start_points),
    )?;
    println!("\nAngle of all satellites at time {ANGLE_REPORT_TIME_S} s:");
    for (i, angle) in angles.iter().enumerate() {
        println!("  satellite {:>3}: {angle:.4} deg", i + 1);
    }

    if model.satellite_count() > 1 {
        println!("\nCollision of satellite 1 and 2:");
        let pair = model.pairwise_collision(
            [1, 2],
            [scenario.start_points[0], scenario.start_points[1]],
            scenario.max_years,
        )?;
        match pair {
            Some(c) => print_collision(&c),
            None => println!("   no collision within {} years", scenario.max_years),
        }
    }

    let table = scenario.collision_table()?;
    println!(
        "\nAll pairwise collisions ({} of {} pairs collide):",
        table.collision_count(),
        table.len()
    );
    for row in &table {
        let (a, b) = row.pair;
        match row.collision {
            Some(c) => println!(
                "  ({a}, {b})  x = {:.3} km  y = {:.3} km  theta = {} deg  time = {} min",
                c.x, c.y, c.theta_deg, c.time_min
            ),
            None => println!("  ({a}, {b})  no collision"),
        }
    }

    let records = scenario.export_records(&table);
    let with_epoch = scenario.epoch.is_some();
    if is_stdout(&table_path) {
        let mut writer = writer_for_path(&table_path)?;
        write_csv(writer.as_mut(), &records, with_epoch)?;
        writer.flush()?;
    } else {
        write_xlsx(&table_path, &records, with_epoch)?;
        info!("collision table written to {}", table_path.display());
        if cli.csv {
            let csv_path = table_path.with_extension("csv");
            let mut writer = writer_for_path(&csv_path)?;
            write_csv(writer.as_mut(), &records, with_epoch)?;
            writer.flush()?;
            info!("collision table written to {}", csv_path.display());
        }
    }

    if cli.json {
        let epoch = scenario.epoch.map(|e| e.format(EPOCH_FORMAT).to_string());
        let meta = Metadata {
            name: scenario.name.as_deref(),
            minor_axis_km: model.minor_axis(),
            major_axis_km: model.major_axis(),
            periods_min: model.periods(),
            start_points_rad: &scenario.start_points,
            max_years: scenario.max_years,
            epoch_utc: epoch.as_deref(),
        };
        let json_path = summary::sidecar_path(&table_path);
        summary::write_sidecar(&json_path, &meta, &records)?;
        info!("collision summary written to {}", json_path.display());
    }

    if let Some(plot_path) = &cli.plot {
        let opts = PlotOptions {
            labels: !cli.plot_no_labels,
            caption: format!("Satellite {index} path"),
            ..PlotOptions::default()
        };
        render_trajectory(plot_path, &trajectory, &times, &opts)?;
        info!("trajectory plot written to {}", plot_path.display());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_collision(c: &Collision) {
    println!(
        "   x = {} km\n   y = {} km\n   theta = {} degree\n   time = {} minutes",
        c.x, c.y, c.theta_deg, c.time_min
    );
}
