use anyhow::Context;
use bridge::server::default_bind_address;
use bridge::{FamilySchema, SessionBridge};
use clap::Parser;
use log::{info, warn};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use ulacore::prelude::{FamilyParameters, PatternFamily, PatternParameters};
use ulacore::render::{RenderedScene, StatusLevel};
use workflow::config::SessionConfig;
use workflow::runner::Runner;

mod bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Uniform linear array radiation pattern explorer")]
struct Args {
    /// Pattern family: uniform, steered, taper, grating_check or spatial_3d
    #[arg(long, default_value = "uniform")]
    family: PatternFamily,
    #[arg(long, default_value_t = 8)]
    elements: usize,
    /// Element spacing in wavelengths
    #[arg(long, default_value_t = 0.5)]
    spacing: f64,
    /// Progressive phase shift in radians
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    phase_shift: f64,
    /// Steering angle in degrees from the array axis
    #[arg(long, default_value_t = 30.0)]
    steering_angle: f64,
    /// Chebyshev sidelobe suppression in dB
    #[arg(long, default_value_t = 30.0)]
    sidelobe_db: f64,
    #[arg(long, default_value_t = 1.0)]
    wavelength: f64,
    /// Points in the 1D angle sweep
    #[arg(long, default_value_t = 1000)]
    samples: usize,
    /// Load a session (live pattern plus comparisons) from YAML
    #[arg(long)]
    session: Option<PathBuf>,
    /// Write the rendered scene as JSON here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the control schema of every family and exit
    #[arg(long, default_value_t = false)]
    controls: bool,
    /// Serve the HTTP session bridge until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value_t = default_bind_address())]
    bind: SocketAddr,
}

impl Args {
    fn live_parameters(&self) -> PatternParameters {
        let variant = match self.family {
            PatternFamily::Uniform => FamilyParameters::Uniform {
                phase_shift_rad: self.phase_shift,
            },
            PatternFamily::Steered => FamilyParameters::Steered {
                steering_angle_deg: self.steering_angle,
            },
            PatternFamily::Taper => FamilyParameters::Taper {
                sidelobe_level_db: self.sidelobe_db,
            },
            PatternFamily::GratingCheck => FamilyParameters::GratingCheck {
                wavelength: self.wavelength,
            },
            PatternFamily::Spatial3D => FamilyParameters::Spatial3D,
        };
        PatternParameters::new(self.elements, self.spacing, variant)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.controls {
        println!("{}", serde_json::to_string_pretty(&FamilySchema::all())?);
        return Ok(());
    }

    let config = if let Some(path) = &args.session {
        SessionConfig::load(path)?
    } else {
        SessionConfig::from_args(args.live_parameters(), args.samples)
    };

    if args.serve {
        let bridge = SessionBridge::new(config.resolution);
        let runtime = TokioBuilder::new_multi_thread()
            .enable_all()
            .build()
            .context("creating runtime for the session bridge")?;
        return runtime.block_on(async {
            bridge
                .serve(args.bind, async {
                    if signal::ctrl_c().await.is_err() {
                        warn!("Ctrl+C handler unavailable; stopping bridge");
                    }
                })
                .await
        });
    }

    let scene = Runner::new(config).execute()?;
    report_status(&scene);
    let json = serde_json::to_string_pretty(&scene).context("serializing rendered scene")?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} scene to {}", scene.family, path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn report_status(scene: &RenderedScene) {
    if let Some(status) = scene.chart().and_then(|chart| chart.status.as_ref()) {
        match status.level {
            StatusLevel::Warning => warn!("{}", status.text),
            StatusLevel::Success => info!("{}", status.text),
        }
    }
}
