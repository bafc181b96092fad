mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::{unbounded, Receiver};
use skypad_device::{ConsoleDrone, ConsoleSphero, Drone, TelloLink};
use skypad_gamepad::ControllerManager;
use skypad_workspace::{Profile, Workspace};
use skypadd::app::vision::{Labels, OnnxClassifier, INPUT_SIZE};
use skypadd::app::{Error, Pilot, Roller, StickMapper, VideoPipeline};
use skypadd::{logging, print_error, print_info, print_warning};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup(cli.verbose, cli.no_color);

    // The handler owns the only sender: dropping it closes the channel
    // for every thread.
    let (stop_tx, stop_rx) = unbounded::<()>();
    let mut stop_tx = Some(stop_tx);
    if let Err(e) = ctrlc::set_handler(move || {
        stop_tx.take();
    }) {
        print_error!("failed to set Ctrl+C handler: {e}");
        return ExitCode::FAILURE;
    }

    let result = load_profile(cli.profile).and_then(|profile| match cli.command {
        Command::Drone {
            dry_run,
            model,
            labels,
        } => run_drone(&profile, dry_run, model.zip(labels), &stop_rx),
        Command::Roll { address } => run_roll(&profile, address, &stop_rx),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_profile(path: Option<PathBuf>) -> Result<Profile, Error> {
    let workspace = Workspace::new(path.as_deref())?;
    match workspace.profile_path() {
        Some(path) => {
            print_info!("profile: {}", path.display());
        }
        None => {
            print_info!("no profile found, using defaults");
        }
    }
    Ok(workspace.load_profile()?)
}

fn run_drone(
    profile: &Profile,
    dry_run: bool,
    vision: Option<(PathBuf, PathBuf)>,
    stop: &Receiver<()>,
) -> Result<(), Error> {
    let drone: Arc<dyn Drone> = if dry_run {
        Arc::new(ConsoleDrone::new())
    } else {
        let link = TelloLink::connect(&profile.drone)?;
        print_info!("connected to drone at {}", link.target());
        Arc::new(link)
    };

    let pipeline = match vision {
        Some((model, labels_path)) => {
            let classifier = OnnxClassifier::load(&model, INPUT_SIZE)?;
            let labels = Labels::load(&labels_path)?;
            if labels.is_empty() {
                print_warning!(
                    "label file {} is empty, every class reads as unknown",
                    labels_path.display()
                );
            } else {
                print_info!("{} labels loaded", labels.len());
            }
            Some(VideoPipeline::start(&profile.video, Box::new(classifier), labels, stop)?)
        }
        None => None,
    };

    let manager = ControllerManager::new()?;
    let events = manager.subscribe();
    let mapper = Arc::new(StickMapper::new(
        &profile.mapper,
        profile.buttons.clone(),
        drone.clone(),
    ));
    let mut pilot = Pilot::new(mapper, drone, profile.mapper.tick);
    if pipeline.is_some() {
        pilot = pilot.with_video_restart(profile.video.restart);
    }
    let handles = pilot.spawn(events, stop)?;
    print_info!("skypadd started. Waiting for the controller.");

    for handle in handles {
        if let Err(e) = handle.join() {
            print_error!("pilot thread panicked: {e:?}");
        }
    }
    if let Some(pipeline) = pipeline {
        pipeline.shutdown();
    }
    drop(manager);
    print_info!("skypadd stopped");
    Ok(())
}

fn run_roll(profile: &Profile, address: String, stop: &Receiver<()>) -> Result<(), Error> {
    let sphero = Arc::new(ConsoleSphero::new(address));
    print_info!("rolling {} every {:?}", sphero.address(), profile.roll.interval);
    let handle = Roller::new(sphero, profile.roll).spawn(stop)?;
    if let Err(e) = handle.join() {
        print_error!("roll thread panicked: {e:?}");
    }
    Ok(())
}
