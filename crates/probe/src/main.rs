// tilegrid-probe - command line front end for the spatial core
// Loads a region dump or area outline from disk and answers:
// - tile state (raw clipping, solid/free)
// - single-step walkability and cost
// - walkable neighbours of a tile
// - area containment, bounds, center and random sampling

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod input;
mod query;

use tilegrid::Tile;
use tilegrid_shared::PROBE_ENV_PREFIX;
use tilegrid_shared::config::get_config;
use tilegrid_shared::log::{initialize_logging, map_log_level};

use query::AreaQuery;

/// Default config file name
const DEFAULT_CONFIG: &str = "probe.conf";

#[derive(Parser, Debug)]
#[command(name = "tilegrid-probe")]
#[command(about = "Query region clipping and polygon areas")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: String,

    /// Console log level override (0=Minimum, 1=Error, 2=Detail, 3=Full/Debug, 4=Trace)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the clipping state of a tile
    Tile(TileArgs),
    /// Check a single step between neighbouring tiles
    Walk(WalkArgs),
    /// List the walkable neighbours of a tile
    Neighbours(TileArgs),
    /// Query a polygon area
    Area(AreaArgs),
}

#[derive(Args, Debug)]
struct RegionArgs {
    /// Region dump (.clip binary or JSON)
    #[arg(short = 'r', long = "region")]
    region: PathBuf,

    /// Plane to query (defaults to DefaultPlane from the config)
    #[arg(short = 'p', long = "plane")]
    plane: Option<i32>,
}

#[derive(Args, Debug)]
struct TileArgs {
    #[command(flatten)]
    region: RegionArgs,

    /// Tile to inspect (format: X,Y)
    #[arg(long = "at")]
    at: Tile,
}

#[derive(Args, Debug)]
struct WalkArgs {
    #[command(flatten)]
    region: RegionArgs,

    /// Source tile (format: X,Y)
    #[arg(long = "from")]
    from: Tile,

    /// Destination tile (format: X,Y)
    #[arg(long = "to")]
    to: Tile,
}

#[derive(Args, Debug)]
struct AreaArgs {
    /// Area outline (JSON)
    #[arg(short = 'a', long = "area")]
    area: PathBuf,

    #[command(subcommand)]
    query: AreaCommand,
}

#[derive(Subcommand, Debug)]
enum AreaCommand {
    /// Is the tile inside the area (format: X,Y,Z)
    Contains { tile: Tile },
    /// Bounding box of the outline
    Bounds,
    /// Center tile of the bounding box
    Center,
    /// Sample a random tile inside the area
    Random {
        /// Seed for a reproducible sample
        #[arg(long = "seed")]
        seed: Option<u64>,
    },
}

impl From<AreaCommand> for AreaQuery {
    fn from(command: AreaCommand) -> Self {
        match command {
            AreaCommand::Contains { tile } => AreaQuery::Contains(tile),
            AreaCommand::Bounds => AreaQuery::Bounds,
            AreaCommand::Center => AreaQuery::Center,
            AreaCommand::Random { seed } => AreaQuery::Random { seed },
        }
    }
}

fn resolve_plane(plane: Option<i32>) -> i32 {
    plane.unwrap_or_else(|| get_config().lock().get_int_default("DefaultPlane", 0))
}

fn run_tile(args: TileArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let region = input::load_region(&args.region.region)?;
    let plane = resolve_plane(args.region.plane);
    query::describe_tile(out, &region, plane, args.at)
}

fn run_walk(args: WalkArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let region = input::load_region(&args.region.region)?;
    let plane = resolve_plane(args.region.plane);
    query::describe_walk(out, &region, plane, args.from, args.to)
}

fn run_neighbours(args: TileArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let region = input::load_region(&args.region.region)?;
    let plane = resolve_plane(args.region.plane);
    query::describe_neighbours(out, &region, plane, args.at)
}

fn run_area(args: AreaArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let area = input::load_area(&args.area)?;
    query::describe_area(out, &area, &args.query.into())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing config file is fine; every key has a default
    let config_loaded = get_config().lock().set_source(&cli.config, PROBE_ENV_PREFIX);

    let (log_dir, log_file, console_level) = {
        let config = get_config().lock();
        let dir = config.get_string("LogsDir");
        let file = config.get_string("LogFile");
        let level = cli.log_level.unwrap_or_else(|| config.get_int_default("LogLevel", 2));
        (
            (!dir.is_empty()).then_some(dir),
            (!file.is_empty()).then_some(file),
            map_log_level(level),
        )
    };
    let _log_guard = initialize_logging(log_dir.as_deref(), console_level, log_file.as_deref());

    if config_loaded {
        tracing::info!("Using configuration file: {}", cli.config);
    } else {
        tracing::debug!("Configuration file {} not found, using defaults", cli.config);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Tile(args) => run_tile(args, &mut out),
        Command::Walk(args) => run_walk(args, &mut out),
        Command::Neighbours(args) => run_neighbours(args, &mut out),
        Command::Area(args) => run_area(args, &mut out),
    }
}
