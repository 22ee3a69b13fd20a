//! Geomx Terminal - Geometry Explorer
//!
//! Shows one primitive at a time in the terminal.
//! Controls:
//!   - 1-8 / Up / Down: Select shape
//!   - W: Toggle wireframe
//!   - R / Space: Toggle auto-rotation
//!   - Q/ESC: Quit

use clap::Parser;
use geomx_core::{Catalog, KeyValueStore, MemoryStore, ViewAction, ViewerConfig};
use geomx_terminal::{FileStore, TerminalApp};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "geomx-terminal", version, about = "Explore primitive 3D shapes in the terminal")]
struct Cli {
    /// Shape to show first
    #[arg(long, short)]
    shape: Option<String>,

    /// File the wireframe and rotation toggles are kept in
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep toggles for this session only
    #[arg(long, conflicts_with = "store")]
    no_persist: bool,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Print the available shapes and exit
    #[arg(long)]
    list: bool,
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.list {
        for shape in Catalog::iter() {
            println!("{:<12} {:<9} {}", shape.id, shape.category, shape.description);
        }
        return Ok(());
    }

    let store: Box<dyn KeyValueStore> = match (cli.no_persist, cli.store.or_else(FileStore::default_path)) {
        (false, Some(path)) => {
            log::info!("persisting toggles to {}", path.display());
            Box::new(FileStore::open(path))
        }
        _ => Box::new(MemoryStore::new()),
    };

    let mut app = TerminalApp::new(ViewerConfig::default(), store, cli.fps);
    if let Some(shape) = cli.shape {
        if Catalog::get(&shape).is_none() {
            eprintln!("Unknown shape '{}'; try --list", shape);
            return Ok(());
        }
        app.dispatch(ViewAction::SelectShape(shape));
    }

    app.run()?;

    println!("Thank you for using the Geomx terminal explorer!");
    Ok(())
}
