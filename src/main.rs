use std::path::PathBuf;

use clap::Parser;
use flywheel_plant::config::FlywheelConfig;
use flywheel_plant::system::response::FirstOrderResponse;
use plotters::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Build a flywheel state-space model and plot its step response")]
struct Args {
    /// TOML plant description (defaults to a single NEO on a 0.002 kg·m² wheel)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output SVG path for the step response
    #[arg(long, default_value = "step_response.svg")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FlywheelConfig::from_file(path)?,
        None => FlywheelConfig::default(),
    };

    let model = config.build_model()?;
    tracing::info!("flywheel model\n{model}");

    let response = FirstOrderResponse::from_model(&model)?;
    let voltage = response.clamp_input(config.plot.voltage);
    tracing::info!(
        time_constant = response.time_constant(),
        steady_state = response.steady_state(voltage),
        voltage,
        "step response"
    );

    let dt = config.plot.duration / (config.plot.samples - 1) as f64;
    let series: Vec<(f64, f64)> = (0..config.plot.samples)
        .map(|i| {
            let t = i as f64 * dt;
            (t, response.output_at(t, voltage))
        })
        .collect();

    // Draw the step response
    {
        let root = SVGBackend::new(&args.output, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let max_y = series.iter().map(|&(_, y)| y).fold(f64::NEG_INFINITY, f64::max);
        let min_y = series.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
        let (min_y, max_y) = if (max_y - min_y).abs() > f64::EPSILON {
            (min_y, max_y)
        } else {
            (min_y - 1.0, max_y + 1.0)
        };

        let mut chart = ChartBuilder::on(&root)
            .caption("Flywheel angular velocity (rad/s)", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..config.plot.duration, min_y..max_y)?;

        chart.configure_mesh().x_desc("time (s)").draw()?;

        chart
            .draw_series(LineSeries::new(series, &Palette99::pick(1)))?
            .label(format!("{voltage} V step"))
            .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], &Palette99::pick(1)));

        chart
            .configure_series_labels()
            .background_style(&WHITE)
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
    }

    tracing::info!(path = %args.output.display(), "step response written");

    Ok(())
}
