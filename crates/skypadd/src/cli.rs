use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// Fly a Tello drone with a gamepad.
    Drone {
        /// Log commands instead of sending them to the drone
        #[arg(long)]
        dry_run: bool,

        /// ONNX model classifying the camera stream
        #[arg(long, requires = "labels")]
        model: Option<PathBuf>,

        /// Class descriptions for the model, one per line
        #[arg(long, requires = "model")]
        labels: Option<PathBuf>,
    },
    /// Roll a Sphero in random colours and directions.
    Roll {
        /// Bluetooth address or name of the robot
        address: String,
    },
}

/// Gamepad control for small robots.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// The profile to use
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn model_needs_labels() {
        assert!(Cli::try_parse_from(["skypadd", "drone", "--model", "m.onnx"]).is_err());
        let cli = Cli::try_parse_from([
            "skypadd", "drone", "--model", "m.onnx", "--labels", "l.txt",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Drone { model: Some(_), labels: Some(_), .. }));
    }

    #[test]
    fn roll_takes_an_address() {
        let cli = Cli::try_parse_from(["skypadd", "-v", "roll", "2B-1247"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.command, Command::Roll { address: "2B-1247".into() });
    }
}
