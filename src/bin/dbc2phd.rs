//! dbc2phd - convert a J1939 DBC database into a PHD JSON configuration.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use dbc2phd::{NodeFrames, Session};

#[derive(Parser)]
#[command(name = "dbc2phd")]
#[command(author, version, about = "J1939 DBC to PHD configuration converter")]
struct Cli {
    /// DBC file to load
    dbc: String,

    /// Node(s) to inspect or export
    #[arg(short, long = "node", value_name = "NAME")]
    nodes: Vec<String>,

    /// Write the JSON configuration to this path (all nodes unless --node is given)
    #[arg(short, long, value_name = "OUT")]
    json: Option<String>,

    /// Write `<name>_<N>.dbc` with the vendor attribute definitions and use it as input
    #[arg(long)]
    make_compatible: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging: RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut session: Session = Session::new();

    let node_names: Vec<String> = if cli.make_compatible {
        let created = session.make_compatible(&cli.dbc)?;
        println!("Compatible file created: {}", created.display());
        session.database().map(|db| db.node_names()).unwrap_or_default()
    } else {
        session.load_database(&cli.dbc)?
    };

    let selected: Vec<&str> = resolve_selection(&cli.nodes, &node_names)?;

    match &cli.json {
        Some(out) => {
            let exported: Vec<&str> = if cli.nodes.is_empty() {
                node_names.iter().map(String::as_str).collect()
            } else {
                selected
            };
            session.export_json(out, &exported)?;
            println!("Exported {} node(s) to {}", exported.len(), out);
        }
        None => {
            println!("Nodes:");
            for name in &node_names {
                println!("  {}", name);
            }
            for name in selected {
                if let Some(frames) = session.select_node(name) {
                    print_frames(name, &frames);
                }
            }
        }
    }
    Ok(())
}

// Unknown nodes are reported and left out; none left is an error.
fn resolve_selection<'a>(
    requested: &'a [String],
    known: &[String],
) -> Result<Vec<&'a str>, Box<dyn Error>> {
    let mut selected: Vec<&str> = Vec::new();
    for name in requested {
        if known.contains(name) {
            selected.push(name);
        } else {
            warn!(node = %name, "node not found in database");
        }
    }

    if !requested.is_empty() && selected.is_empty() {
        return Err(format!("none of the requested nodes exist: {}", requested.join(", ")).into());
    }
    Ok(selected)
}

fn print_frames(name: &str, frames: &NodeFrames) {
    println!();
    println!("{}:", name);
    println!("  receive:");
    for frame in &frames.receive {
        println!("    {}", frame);
    }
    println!("  transmit:");
    for frame in &frames.transmit {
        println!("    {}", frame);
    }
}
