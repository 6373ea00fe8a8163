use clap::Parser;
use fortuna::config;
use fortuna::gui::app::AppModel;
use fortuna::gui::wheel::Session;
use fortuna::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "fortuna", version, about = "Spin a wheel of fortune", long_about = None)]
struct Cli {
    /// Seed for the segment draw (overrides `spin.seed` from the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the default config file, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    if let Some(seed) = cli.seed {
        config.spin.seed = Some(seed);
    }
    let session = Session::new(config)?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap already consumed the arguments; keep GTK from parsing them again
    let app = RelmApp::new("org.fortuna.fortuna").with_args(Vec::new());

    app.run::<AppModel>((session, rx));
    Ok(())
}
