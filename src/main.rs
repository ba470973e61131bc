mod analytics;
mod client;
mod config;
mod error;
mod kv;
mod ledger;
mod logging;
mod models;
mod run;
mod server;
mod ui;
mod wire;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;

    match args.len() {
        1 => {
            logging::init_file(&config.log_path)?;
            run::as_tui(&config)
        }
        _ => {
            logging::init_stderr();
            run::as_cli(&args, &config)
        }
    }
}
