use std::process;

use clap::Parser;
use log::{error, info};

use quatgeom::batch;
use quatgeom::config::{Args, Config};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let cfg = match Config::from_args(Args::parse()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };
    info!("{cfg}");

    match batch::transform_file(&cfg.input, &cfg.output, &cfg.rotation) {
        Ok(count) => {
            info!("rotated {count} points into {}", cfg.output.display());
        }
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    }
}
