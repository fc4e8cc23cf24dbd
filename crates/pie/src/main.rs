use clap::{Parser, Subcommand};
use pie::config;
use pie::render::{self, Theme};
use pie_layout::{CircleLayout, LayoutRequest};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pie", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the configured circle to a PNG file
    Render {
        /// Config file to use instead of the user config
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Where to write the image
        #[arg(short = 'o', long, default_value = "pie.png")]
        out: PathBuf,
    },
    /// Print the segment and item placements for COUNT slots
    Layout {
        #[arg(short = 'n', long)]
        count: usize,

        #[arg(short = 'r', long, default_value_t = 1.0)]
        radius: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the default config file if there is none yet
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { config, out } => render(config, out),
        Commands::Layout {
            count,
            radius,
            json,
        } => print_layout(count, radius, json),
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn render(config_path: Option<PathBuf>, out: PathBuf) -> anyhow::Result<()> {
    let config = config::load_or_default(config_path.as_deref())?;

    let mut file = fs_err::File::create(&out)?;
    let layout = render::render_png(&config, &Theme::default(), &mut file)?;

    log::info!("Wrote {}", out.display());
    println!("{} slots -> {}", layout.len(), out.display());
    Ok(())
}

fn print_layout(count: usize, radius: f64, json: bool) -> anyhow::Result<()> {
    let layout = CircleLayout::compute(&LayoutRequest::new(count, radius)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!(
        "{:>5}  {:>10}  {:>8}  {:>12}  {:>12}",
        "index", "start_deg", "fill", "x", "y"
    );
    for (segment, point) in layout.segments.iter().zip(&layout.points) {
        println!(
            "{:>5}  {:>10.3}  {:>8.4}  {:>12.4}  {:>12.4}",
            segment.index,
            segment.start_angle_degrees,
            segment.fill_fraction,
            point.position.x,
            point.position.y
        );
    }
    Ok(())
}
