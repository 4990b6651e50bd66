use clap::Parser;
use relm4::prelude::*;
use tock::config;
use tock::gui::app::AppModel;
use tock::sys::runtime;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Write the default config file if it does not exist yet, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap already consumed the arguments
    let app = RelmApp::new("org.tock.tock").with_args(Vec::new());

    app.run::<AppModel>((config, rx));
    Ok(())
}
