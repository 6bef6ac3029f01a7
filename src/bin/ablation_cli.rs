use clap::{Parser, Subcommand, ValueEnum};
use meteor_ablation::constants::MAX_PROFILE_SAMPLES;
use meteor_ablation::{
    atmosphere_density, density_profile, evaluate, FragmentState, SimulationConstants,
};
use nalgebra::Vector2;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ablation-cli")]
#[command(version)]
#[command(about = "Meteoroid ablation kernel inspector", long_about = None)]
struct Cli {
    /// Simulation constants (JSON); defaults are used when omitted
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Atmosphere density at a single height
    Density {
        /// Height (meters)
        #[arg(long)]
        height: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Run one ablation/deceleration step for a fragment
    Step {
        /// Fragment mass (kg)
        #[arg(short = 'm', long)]
        mass: f64,

        /// Fragment speed (m/s)
        #[arg(short = 'v', long)]
        speed: f64,

        /// Height (meters)
        #[arg(long)]
        height: f64,

        /// Bulk density (kg/m³); defaults to the configured value
        #[arg(long)]
        rho: Option<f64>,

        /// Time step (seconds); defaults to the configured value
        #[arg(long)]
        dt: Option<f64>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Atmosphere density over a height range
    Profile {
        /// Start height (meters)
        #[arg(long, default_value = "60000.0")]
        from: f64,

        /// End height (meters)
        #[arg(long, default_value = "180000.0")]
        to: f64,

        /// Height step (meters)
        #[arg(long, default_value = "10000.0")]
        step: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display the active simulation constants
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct DensitySample {
    height: f64,
    density: f64,
}

#[derive(Debug, Serialize)]
struct StepReport {
    height: f64,
    dt: f64,
    mass: f64,
    speed: f64,
    k: f64,
    atmosphere_density: f64,
    mass_change: f64,
    new_mass: f64,
    deceleration: f64,
    new_speed: f64,
    luminous_efficiency: f64,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let constants = match &cli.config {
        Some(path) => SimulationConstants::from_json_file(path)?,
        None => SimulationConstants::default(),
    };

    match cli.command {
        Commands::Density { height, output } => {
            let sample = DensitySample {
                height,
                density: atmosphere_density(height, &constants.density_coefficients),
            };
            display_density(&[sample], output)?;
        }

        Commands::Step { mass, speed, height, rho, dt, output } => {
            let rho = rho.unwrap_or(constants.rho);
            let dt = dt.unwrap_or(constants.dt);
            if !(dt.is_finite() && dt > 0.0) {
                return Err(format!("time step must be positive, got {dt}").into());
            }
            if !(mass.is_finite() && mass > 0.0) {
                return Err(format!("mass must be positive, got {mass}").into());
            }
            if !height.is_finite() {
                return Err(format!("height must be finite, got {height}").into());
            }
            if !(speed.is_finite() && speed >= 0.0) {
                return Err(format!("speed must be non-negative, got {speed}").into());
            }

            // Straight-down entry; only the speed matters to the kernel
            let fragment = FragmentState::new(&constants, mass, rho, Vector2::new(0.0, -speed))?;
            let input = fragment.snapshot_at_height(height, &constants.density_coefficients);
            tracing::debug!(?input, dt, "running kernel step");

            let result = evaluate(dt, &input);
            let report = StepReport {
                height,
                dt,
                mass,
                speed,
                k: input.k,
                atmosphere_density: input.rho_atm,
                mass_change: result.mass_change,
                new_mass: mass + result.mass_change,
                deceleration: result.deceleration,
                new_speed: speed + result.deceleration * dt,
                luminous_efficiency: result.luminous_efficiency,
            };
            if report.new_mass < 0.0 {
                tracing::warn!(new_mass = report.new_mass, "step removed more than the remaining mass");
            }
            display_step(&report, output)?;
        }

        Commands::Profile { from, to, step, output } => {
            let samples: Vec<DensitySample> =
                density_profile(from, to, step, &constants.density_coefficients)
                    .into_iter()
                    .map(|(height, density)| DensitySample { height, density })
                    .collect();
            if samples.is_empty() {
                return Err(format!(
                    "profile step must be a non-zero finite number giving at most {MAX_PROFILE_SAMPLES} samples"
                )
                .into());
            }
            display_density(&samples, output)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      METEOR ABLATION KERNEL            ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Drag coefficient:  {:>12.4}        ║", constants.gamma);
            println!("║ Shape factor:      {:>12.4}        ║", constants.shape_factor);
            println!("║ Time step:         {:>12.4e} s      ║", constants.dt);
            println!("║ Ablation coeff:    {:>12.4e} s²/m²  ║", constants.sigma);
            println!("║ Bulk density:      {:>12.1} kg/m³  ║", constants.rho);
            println!("║ K (bulk density):  {:>12.4e}        ║", constants.shape_density_coefficient(constants.rho));
            println!("╠════════════════════════════════════════╣");
            println!("║ Density coefficients (log10, km)       ║");
            for (i, c) in constants.density_coefficients.iter().enumerate() {
                println!("║   c{}:             {:>14.6e}        ║", i, c);
            }
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_density(samples: &[DensitySample], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            if let [single] = samples {
                println!("{}", serde_json::to_string_pretty(single)?);
            } else {
                println!("{}", serde_json::to_string_pretty(samples)?);
            }
        }

        OutputFormat::Csv => {
            println!("height,density");
            for s in samples {
                println!("{:.1},{:.6e}", s.height, s.density);
            }
        }

        OutputFormat::Table => {
            println!("┌──────────────┬────────────────┐");
            println!("│ Height (km)  │ Density(kg/m³) │");
            println!("├──────────────┼────────────────┤");
            for s in samples {
                println!("│ {:>12.3} │ {:>14.6e} │", s.height / 1000.0, s.density);
            }
            println!("└──────────────┴────────────────┘");
        }
    }

    Ok(())
}

fn display_step(report: &StepReport, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }

        OutputFormat::Csv => {
            println!("height,dt,mass,speed,k,atmosphere_density,mass_change,new_mass,deceleration,new_speed,luminous_efficiency");
            println!(
                "{:.1},{},{:e},{:.3},{:e},{:e},{:e},{:e},{:.6},{:.6},{}",
                report.height, report.dt, report.mass, report.speed, report.k,
                report.atmosphere_density, report.mass_change, report.new_mass,
                report.deceleration, report.new_speed, report.luminous_efficiency
            );
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         KERNEL STEP RESULTS            ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Height:            {:>12.1} m      ║", report.height);
            println!("║ Time step:         {:>12.4e} s      ║", report.dt);
            println!("║ Atm density:       {:>12.4e} kg/m³  ║", report.atmosphere_density);
            println!("║ K:                 {:>12.4e}        ║", report.k);
            println!("╠════════════════════════════════════════╣");
            println!("║ Mass:              {:>12.4e} kg     ║", report.mass);
            println!("║ Mass change:       {:>12.4e} kg     ║", report.mass_change);
            println!("║ New mass:          {:>12.4e} kg     ║", report.new_mass);
            println!("╠════════════════════════════════════════╣");
            println!("║ Speed:             {:>12.2} m/s    ║", report.speed);
            println!("║ Deceleration:      {:>12.4} m/s²   ║", report.deceleration);
            println!("║ New speed:         {:>12.2} m/s    ║", report.new_speed);
            println!("║ Luminous eff.:     {:>12.4}        ║", report.luminous_efficiency);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}
