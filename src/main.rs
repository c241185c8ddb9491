use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::QueueableCommand;
use image::Rgb;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mazes::bitmap::{self, PATH_THRESHOLD};
use mazes::solve::maze_endpoints;
use mazes::{render, solve, Algorithm, Config, Coord, DistanceField, Grid, RasterGraph};

/// Carve grid mazes and check maze images for solvability
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Carve a maze and print it
    Generate(GenerateArgs),
    /// Look for a path from (1, 1) to (height-2, width-2) in maze images
    Solve {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Pixels with luma above this are path
        #[arg(long, default_value_t = PATH_THRESHOLD)]
        threshold: u8,
    },
}

/// Unset options fall back to the MAZES_* environment variables.
#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// binary-tree, sidewinder, aldous-broder, wilsons or dfs
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Label cells with their distance from the north-west corner
    #[arg(long)]
    distances: bool,

    /// Only label the route from the north-west corner to the farthest cell
    #[arg(long)]
    path: bool,

    /// Shade labelled cells in the terminal
    #[arg(long)]
    color: bool,

    /// Also write the maze to this image file; the extension picks the format
    #[arg(long)]
    image: Option<PathBuf>,

    /// Pixels per cell in the image
    #[arg(long)]
    cell_size: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,mazes=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args, Config::from_env()),
        Command::Solve { files, threshold } => solve_files(&files, threshold),
    }
}

fn generate(args: GenerateArgs, config: Config) -> Result<()> {
    let rows = args.rows.unwrap_or(config.rows);
    let cols = args.cols.unwrap_or(config.cols);
    let algorithm = args.algorithm.unwrap_or(config.algorithm);
    let cell_size = args.cell_size.unwrap_or(config.cell_size);
    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut grid = Grid::new(rows, cols)?;
    algorithm.carve(&mut grid, &mut rng);
    info!(
        %algorithm,
        rows,
        cols,
        dead_ends = grid.dead_ends().len(),
        "maze carved"
    );

    let field = if args.distances || args.path || args.color {
        let field = DistanceField::compute(&grid, Coord::new(0, 0))?;
        if args.path {
            let (goal, length) = field.max();
            info!(%goal, length, "longest route from the north-west corner");
            field.path_to(&grid, goal)?
        } else {
            Some(field)
        }
    } else {
        None
    };

    let mut stdout = io::stdout();
    match &field {
        Some(field) if args.color => print_shaded(&mut stdout, &grid, field)?,
        Some(field) => write!(stdout, "{}", render::text_with_distances(&grid, field))?,
        None => write!(stdout, "{}", render::text(&grid))?,
    }
    stdout.flush()?;

    if let Some(path) = args.image {
        let img = match &field {
            Some(field) => render::raster_with_distances(&grid, cell_size, field)?,
            None => render::raster(&grid, cell_size)?,
        };
        img.save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), width = img.width(), height = img.height(), "image written");
    }
    Ok(())
}

/// Text maze with each labelled cell body on a distance-shaded background.
fn print_shaded(stdout: &mut Stdout, grid: &Grid, field: &DistanceField) -> io::Result<()> {
    let (_, max) = field.max();
    let text = render::text_with_distances(grid, field);

    for (n, line) in text.lines().enumerate() {
        // odd lines hold cell bodies: "|" then 4 columns per cell
        if n % 2 == 0 {
            stdout.queue(Print(line))?;
        } else {
            let row = n / 2;
            for (i, ch) in line.chars().enumerate() {
                let shade = (i > 0 && (i - 1) % 4 < 3)
                    .then(|| Coord::new(row, (i - 1) / 4))
                    .and_then(|coord| field.distance(coord).ok().flatten())
                    .map(|d| render::shade(d, max));
                match shade {
                    Some(Rgb([r, g, b])) => {
                        stdout.queue(SetBackgroundColor(Color::Rgb { r, g, b }))?;
                        stdout.queue(SetForegroundColor(Color::Black))?;
                        stdout.queue(Print(ch))?;
                        stdout.queue(ResetColor)?;
                    }
                    None => {
                        stdout.queue(Print(ch))?;
                    }
                }
            }
        }
        stdout.queue(Print('\n'))?;
    }
    Ok(())
}

fn solve_files(files: &[PathBuf], threshold: u8) -> Result<()> {
    let mut failed = 0;
    for file in files {
        match solve_file(file, threshold) {
            Ok(Some(steps)) => {
                println!("Path found in file: {} ({} steps)", file.display(), steps);
            }
            Ok(None) => println!("No path found in file: {}", file.display()),
            Err(e) => {
                warn!(file = %file.display(), error = %format!("{e:#}"), "skipping image");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} images could not be checked", failed, files.len());
    }
    Ok(())
}

fn solve_file(file: &Path, threshold: u8) -> Result<Option<usize>> {
    let img = image::open(file)
        .with_context(|| format!("failed to open {}", file.display()))?
        .to_rgb8();
    let graph = RasterGraph::build(&bitmap::binarize(&img, threshold))?;

    let path = maze_endpoints(graph.height(), graph.width())
        .and_then(|(start, end)| solve(&graph, start, end));
    info!(
        file = %file.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        solvable = path.is_some(),
        "image checked"
    );
    Ok(path.map(|p| p.len() - 1))
}
