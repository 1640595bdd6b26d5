use clap::{Parser, Subcommand};
use dotview::config;
use dotview::gui::app::{AppInit, AppModel};
use dotview::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "dotview", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of pages to show (overrides the config file)
    #[arg(short = 'p', long)]
    pages: Option<usize>,

    /// Page selected at startup
    #[arg(short = 's', long, default_value_t = 0)]
    selected: usize,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default config file and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let pages = cli.pages.unwrap_or(config.pages);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    // clap already consumed the arguments, keep GTK from parsing them again
    let app = RelmApp::new("org.pagedots.dotview").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        pages,
        selected: cli.selected,
        events: rx,
    });
    Ok(())
}
