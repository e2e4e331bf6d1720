//! `star`: apply the streak bloom to image files on the CPU.

mod cli;
mod error;
mod preset;

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use star_core::{parameter_specs, EffectParameters, PassMode, StreakCompositor};
use star_cpu::CpuBackend;

use crate::cli::Command;
use crate::error::CliError;

fn init_logging(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn render(
    input: &Path,
    output: &Path,
    preset: Option<&Path>,
    overrides: &[String],
    exposure: f32,
) -> Result<(), CliError> {
    let mut params = match preset {
        Some(path) => preset::load_preset(path)?,
        None => EffectParameters::default(),
    };
    for assignment in overrides {
        params.apply_override(assignment)?;
    }
    let params = params.clamped();
    log::debug!("Parameters: {params:?}");

    let mut source = star_cpu::load_linear(input)?;
    if exposure != 1.0 {
        source.scale_rgb(exposure);
    }
    log::info!("Loaded {} ({}x{})", input.display(), source.width(), source.height());

    let mut backend = CpuBackend::default();
    let started = Instant::now();
    let (frame, report) = StreakCompositor::new().composite_to_new(&mut backend, &source, &params)?;
    log::info!(
        "Composited {} streaks ({} stretch passes) in {:.1} ms",
        report.streaks,
        report.stretch_passes,
        started.elapsed().as_secs_f64() * 1000.0
    );

    star_cpu::save(output, &frame)?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

fn params_table() -> String {
    let mut out = format!("{:<16} {:>8} {:>8} {:>8}  description\n", "id", "min", "max", "default");
    for spec in parameter_specs() {
        out.push_str(&format!(
            "{:<16} {:>8} {:>8} {:>8}  {}\n",
            spec.id, spec.min, spec.max, spec.default_value, spec.description
        ));
    }
    let modes: Vec<String> = PassMode::ALL
        .iter()
        .map(|mode| format!("{} = {}", *mode as i32, mode.name()))
        .collect();
    out.push_str(&format!("\npassMode: {}\n", modes.join(", ")));
    out
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Render { input, output, preset, overrides, exposure } => {
            render(&input, &output, preset.as_deref(), &overrides, exposure)
        }
        Command::Preset { path } => {
            preset::save_preset(&path, &EffectParameters::default())?;
            log::info!("Wrote default preset to {}", path.display());
            Ok(())
        }
        Command::Params => {
            print!("{}", params_table());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
