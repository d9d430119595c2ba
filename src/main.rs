//! Warren command-line maze generator.
//!
//! Usage:
//!   warren [OPTIONS]
//!
//! Options:
//!   --width N       Grid width in cells (default: 10)
//!   --depth N       Grid depth in cells (default: 10)
//!   --rooms N       Rooms to place (default: 5)
//!   --spacing F     World units between cell centers (default: 4.0)
//!   --seed N        RNG seed (default: random)
//!   --paced MS      Animate carving with MS milliseconds per step
//!   --config FILE   Load settings from a JSON file first
//!   --json          Print the maze as JSON instead of a drawing

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::process;
use std::str::FromStr;
use warren::build_info::version_line;
use warren::render::{render_ascii, render_grid};
use warren::{MazeBuilder, MazeConfig, Pacing};

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Default)]
struct CliOptions {
    config_path: Option<String>,
    width: Option<i64>,
    depth: Option<i64>,
    rooms: Option<i64>,
    spacing: Option<f32>,
    seed: Option<u64>,
    paced_ms: Option<u64>,
    json: bool,
}

enum Command {
    Generate(CliOptions),
    Help,
    Version,
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: invalid value '{value}'"))
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--width" => options.width = Some(parse_value(arg, iter.next())?),
            "--depth" => options.depth = Some(parse_value(arg, iter.next())?),
            "--rooms" => options.rooms = Some(parse_value(arg, iter.next())?),
            "--spacing" => options.spacing = Some(parse_value(arg, iter.next())?),
            "--seed" => options.seed = Some(parse_value(arg, iter.next())?),
            "--paced" => options.paced_ms = Some(parse_value(arg, iter.next())?),
            "--config" => options.config_path = Some(parse_value(arg, iter.next())?),
            "--json" => options.json = true,
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(Command::Generate(options))
}

fn print_usage() {
    eprintln!(
        "Warren - perfect maze generator\n\
         \n\
         Usage: warren [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --width N       Grid width in cells (default: 10)\n\
         \x20 --depth N       Grid depth in cells (default: 10)\n\
         \x20 --rooms N       Rooms to place (default: 5)\n\
         \x20 --spacing F     World units between cell centers (default: 4.0)\n\
         \x20 --seed N        RNG seed (default: random)\n\
         \x20 --paced MS      Animate carving with MS milliseconds per step\n\
         \x20 --config FILE   Load settings from a JSON file first\n\
         \x20 --json          Print the maze as JSON instead of a drawing\n\
         \x20 --version, -v   Show version\n\
         \x20 --help, -h      Show this help"
    );
}

/// Config file (or defaults) with command-line overrides on top
fn resolve_config(options: &CliOptions) -> Result<MazeConfig, warren::ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => MazeConfig::load(path)?,
        None => MazeConfig::default(),
    };

    if let Some(width) = options.width {
        config.width = width;
    }
    if let Some(depth) = options.depth {
        config.depth = depth;
    }
    if let Some(rooms) = options.rooms {
        config.room_count = rooms;
    }
    if let Some(spacing) = options.spacing {
        config.cell_spacing = spacing;
    }
    if let Some(step_delay_ms) = options.paced_ms {
        config.pacing = Some(Pacing {
            step_delay_ms,
            ..config.pacing.unwrap_or_default()
        });
    }

    Ok(config)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let options = match parse_args(&args) {
        Ok(Command::Generate(options)) => options,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let builder = match resolve_config(&options).and_then(MazeBuilder::new) {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let seed = options.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = builder.config().start;

    let generation = if builder.config().pacing.is_some() {
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let generation = builder.build_observed(&mut rng, |grid, _step| {
            // A failed frame only costs the animation, not the maze
            let _ = stdout.execute(MoveTo(0, 0));
            let _ = write!(stdout, "{}", render_grid(grid, Some(start)));
            let _ = stdout.flush();
        });

        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(Show)?;
        generation
    } else {
        builder.build(&mut rng)
    };

    let maze = &generation.maze;
    if options.json {
        let json = serde_json::to_string_pretty(maze)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!("{json}");
    } else {
        print!("{}", render_ascii(maze));
        println!(
            "seed {} | {}x{} | {} passages | {} rooms",
            seed,
            maze.width(),
            maze.depth(),
            maze.passage_count(),
            maze.room_count()
        );
    }

    for warning in &generation.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
