mod args;
mod ingest;

use clap::Parser;
use log::debug;
use snafu::ErrorCompat;

use std::path::Path;

use crate::ingest::config_reader::{read_config_file, resolve_config};
use crate::ingest::IngestResult;

fn run(args: &args::Args) -> IngestResult<()> {
    let file = match args.config.as_deref() {
        Some(p) => Some(read_config_file(p)?),
        None => None,
    };
    let config = resolve_config(
        file,
        args.input_root.clone(),
        args.output_root.clone(),
        args.identity_key.clone(),
    )?;
    debug!("config: {:?}", config);
    ingest::run_session(&config, &args.session, args.reference.as_deref().map(Path::new))?;
    Ok(())
}

fn main() {
    let args = args::Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    debug!("args: {:?}", args);

    if let Err(e) = run(&args) {
        for (idx, cause) in ErrorCompat::iter_chain(&e).enumerate() {
            if idx == 0 {
                eprintln!("An error occured: {}", cause);
            } else {
                eprintln!("  caused by: {}", cause);
            }
        }
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
