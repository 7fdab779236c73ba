mod app;
mod corpus;
mod dump;
mod graph;
mod util;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::corpus::Visibility;
use crate::graph::{EntityKey, JoinStrategy};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the corpus CSV tables.
    #[arg(long, default_value = "resources/data")]
    data_dir: PathBuf,

    /// Start with the WHAT (actions) column hidden.
    #[arg(long)]
    hide_what: bool,

    /// How co-occurrence between columns is computed.
    #[arg(long, value_enum, default_value_t = JoinStrategy::Indexed)]
    join: JoinStrategy,

    /// Print render commands as JSON lines instead of opening a window.
    #[arg(long)]
    dump: bool,

    /// Entity to select before dumping, as CATEGORY:entity (e.g. where:Paris).
    #[arg(long, requires = "dump", value_parser = parse_selection)]
    select: Option<EntityKey>,
}

fn parse_selection(raw: &str) -> Result<EntityKey, String> {
    EntityKey::parse(raw).ok_or_else(|| {
        format!("expected CATEGORY:entity with CATEGORY one of who/where/when/what, got `{raw}`")
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let visibility = Visibility {
        show_what: !args.hide_what,
    };

    if args.dump {
        return dump::run(&args.data_dir, args.join, visibility, args.select);
    }

    let viewer = app::ViewerOptions {
        data_dir: args.data_dir,
        join: args.join,
        visibility,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1600.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "entity-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::EntityAtlasApp::new(cc, viewer)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
