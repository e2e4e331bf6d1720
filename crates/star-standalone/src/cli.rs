use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Star streak bloom for still images.
#[derive(Parser, Debug)]
#[command(name = "star", version, about)]
pub struct Args {
    /// Log level override (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the effect to an image.
    Render {
        /// Input image (PNG, JPEG, HDR, EXR, ...).
        input: PathBuf,

        /// Output image; `.hdr` and `.exr` keep the float range.
        output: PathBuf,

        /// Parameter preset (.toml or .json).
        #[arg(short, long)]
        preset: Option<PathBuf>,

        /// Override a parameter, e.g. `--set numStreaks=6`. Repeatable.
        #[arg(short = 's', long = "set", value_name = "ID=VALUE")]
        overrides: Vec<String>,

        /// Multiply input radiance before filtering.
        #[arg(long, default_value_t = 1.0)]
        exposure: f32,
    },

    /// Write the default preset to a file.
    Preset {
        /// Destination (.toml or .json).
        path: PathBuf,
    },

    /// List tunable parameters with their ranges.
    Params,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let args = Args::try_parse_from([
            "star", "render", "in.png", "out.exr", "--preset", "p.toml",
            "--set", "numStreaks=6", "-s", "intensity=2", "--exposure", "4",
        ])
        .unwrap();
        match args.command {
            Command::Render { input, output, preset, overrides, exposure } => {
                assert_eq!(input, PathBuf::from("in.png"));
                assert_eq!(output, PathBuf::from("out.exr"));
                assert_eq!(preset, Some(PathBuf::from("p.toml")));
                assert_eq!(overrides, vec!["numStreaks=6", "intensity=2"]);
                assert_eq!(exposure, 4.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_params() {
        let args = Args::try_parse_from(["star", "--log-level", "debug", "params"]).unwrap();
        assert!(matches!(args.command, Command::Params));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
