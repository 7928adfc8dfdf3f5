//! jointmap: offline humanoid motion tooling
//!
//! Retargeted motion datasets are often recorded over a reduced joint set
//! (for example the 23-DOF G1 datasets, which have no wrist joints), while
//! downstream tooling expects a canonical layout (29 joints). `jointmap`
//! remaps joint columns by name, zero-fills joints the source lacks, and writes
//! a flat CSV table of `[root_pos(3), root_rot(4), joints(N)]` per frame.
//!
//! # Examples
//!
//! ```bash
//! # List the records in an archive
//! jointmap convert motions.json out.csv --list-keys
//!
//! # Convert the first record
//! jointmap convert motions.json out/walk.csv
//!
//! # Convert a named record with a custom layout
//! jointmap convert motions.json out/run.csv --motion-key run --config layout.toml
//!
//! # Inspect the index map
//! jointmap layout
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: layouts, motion archives, conversion and CSV output
//! - [`robot`]: robot constants (x02 actuators, keyframe, action scales)

pub mod core;
pub mod robot;

mod cli;

use crate::cli::{Cli, Command, ConvertCli, LayoutCli, RobotCli};
use crate::core::config::ConvertConfig;
use crate::core::output::{self, OutputFormat};
use crate::core::{convert, error};
use clap::Parser;

pub fn run() -> Result<(), error::JointmapError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Layout(args) => run_layout(args),
        Command::Robot(args) => run_robot(args),
    }
}

fn run_convert(args: ConvertCli) -> Result<(), error::JointmapError> {
    let format: OutputFormat = args.format.parse()?;
    let config = ConvertConfig::load_or_default(args.config.as_deref())?;

    if args.list_keys {
        let records = convert::list_records(&args.input, &config)?;
        match format {
            OutputFormat::Text => print!("{}", output::render_record_list(&records)),
            OutputFormat::Json => println!("{}", output::to_json(&records)?),
        }
        return Ok(());
    }

    let report = convert::convert(
        &args.input,
        &args.output,
        args.motion_key.as_deref(),
        &config,
    )?;
    match format {
        OutputFormat::Text => print!("{}", output::render_conversion(&report)),
        OutputFormat::Json => println!("{}", output::to_json(&report)?),
    }
    Ok(())
}

fn run_layout(args: LayoutCli) -> Result<(), error::JointmapError> {
    let format: OutputFormat = args.format.parse()?;
    let config = ConvertConfig::load_or_default(args.config.as_deref())?;
    match format {
        OutputFormat::Text => print!("{}", output::render_layout(&config.layout)),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "name": config.layout.name,
                "source": config.layout.source,
                "target": config.layout.target,
                "index_map": config.layout.index_map().entries(),
            });
            println!("{}", output::to_json(&doc)?);
        }
    }
    Ok(())
}

fn run_robot(args: RobotCli) -> Result<(), error::JointmapError> {
    let format: OutputFormat = args.format.parse()?;
    let cfg = robot::x02::robot_cfg();
    let scales = cfg.action_scale()?;
    let joints = cfg.resolve_joints(&args.joints)?;
    match format {
        OutputFormat::Text => print!("{}", output::render_robot(&cfg, &scales, &joints)),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "robot": cfg,
                "action_scale": scales,
                "joints": joints,
            });
            println!("{}", output::to_json(&doc)?);
        }
    }
    Ok(())
}
