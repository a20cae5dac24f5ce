//! Drishti viewer - renders one frame of an autonomous tracelog replay.
//!
//! Loads the field settings and a log, positions the playback clock, and
//! writes the field diagram for that moment as SVG.
//!
//! # Usage
//!
//! ```bash
//! drishti-view --log auto.log --time 4.2 --extra --output frame.svg
//! drishti-view --log auto.log --line 120 --raw
//! drishti-view --log auto.log --feed zebra.json --event wasno --year 2020
//! ```

mod error;
mod render;
mod report;

use std::path::PathBuf;

use clap::Parser;
use drishti_log::{FieldConfig, MotionWorksFeed, ReplaySession, Scene};

use crate::error::Result;

#[derive(Parser)]
#[command(name = "drishti-view")]
#[command(about = "Render a frame of an autonomous tracelog replay")]
struct Args {
    /// Field settings file (TOML, or JSON with a .json extension)
    #[arg(short, long, default_value = "drishti.toml")]
    config: PathBuf,

    /// Tracelog to replay
    #[arg(short, long)]
    log: PathBuf,

    /// Playback time in seconds
    #[arg(short, long)]
    time: Option<f64>,

    /// Jump to sample index
    #[arg(long, conflicts_with = "time")]
    step: Option<usize>,

    /// Jump to the sample nearest a raw log line
    #[arg(long, conflicts_with_all = ["time", "step"])]
    line: Option<usize>,

    /// Jump to the end of the log
    #[arg(long, conflicts_with_all = ["time", "step", "line"])]
    end: bool,

    /// Saved Zebra MotionWorks payload (JSON)
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Event code for the TheBlueAlliance match page
    #[arg(long)]
    event: Option<String>,

    /// Season year for the TheBlueAlliance match page
    #[arg(long, default_value = "2020")]
    year: u32,

    /// Draw the robot to target overlay
    #[arg(short, long)]
    extra: bool,

    /// Print the raw log overview
    #[arg(long)]
    raw: bool,

    /// Output SVG file
    #[arg(short, long, default_value = "frame.svg")]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = FieldConfig::load(&args.config)?;

    let mut session = ReplaySession::new();
    session.load_file(&args.log, &config)?;

    if let Some(path) = &args.feed {
        session.attach_feed(MotionWorksFeed::load(path)?);
    }

    if let Some(step) = args.step {
        session.set_step(step);
    } else if let Some(line) = args.line {
        session.set_step_from_line(line);
    } else if args.end {
        session.clock_mut().jump_to_max();
        session.update_step();
    } else {
        session.clock_mut().seek(args.time.unwrap_or(0.0));
        session.update_step();
    }

    let Some(log) = session.log() else {
        return Ok(());
    };
    println!("Tracelog analysis: {}", session.title().unwrap_or_default());
    println!("{}\n", report::info_text(log));

    if let Some(event) = &args.event {
        let info = &log.match_info;
        let url = drishti_log::feed::match_url(args.year, event, &info.match_type, &info.match_number)?;
        println!("Zebra MotionWorks: {}\n", url);
    }

    if args.raw {
        println!("{}\n", report::raw_log_text(log, session.current_line()));
    }

    let scene = Scene::build(&mut session, &config, args.extra);
    if let Some(info) = &scene.info {
        println!("{}\n{}", scene.timer.text, info.text);
    }

    let doc = render::render_scene(&scene, &config.profile);
    render::save(&args.output, &doc)?;

    Ok(())
}
