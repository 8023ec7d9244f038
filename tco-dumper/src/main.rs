//! # tco-dumper
//!
//! Command line front-end for `tco-rs`. Run it from the game's `Cache` directory to turn
//! every `Textures/*.tco` file into `Textures_OUT/<name>.tco.tga`.
//!
//! ## Usage
//! ```sh
//! tco_dumper
//! tco_dumper --input Cache/Textures --output dumped --threads 4
//! RUST_LOG=debug tco_dumper --config dump.cfg
//! ```
use argh::FromArgs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tco_rs::dump_config::DumpConfig;
use tco_rs::error::TcoError;
use tco_rs::tco_dumper::TcoDumper;

const SEPARATOR: &str = "-------------------------------------------------";

#[derive(FromArgs, Debug)]
/// Dump TCO texture cache files to TGA images
struct Args {
    /// directory containing the .tco files [default: ./Textures]
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// directory receiving the .tga files [default: ./Textures_OUT]
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// number of worker threads [default: available parallelism]
    #[argh(option, short = 't')]
    threads: Option<NonZeroUsize>,

    /// optional `key = value` config file, overridden by the other options
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<DumpConfig, TcoError> {
        let mut config = DumpConfig::new();
        if let Some(path) = &self.config {
            config.load(path)?;
        }
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Args = argh::from_env();
    let start = Instant::now();

    let dumper = match args.into_config().and_then(TcoDumper::open) {
        Ok(dumper) => dumper,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    log::debug!("Dump settings: {:?}", dumper.config());
    let summary = dumper.run();
    let errors = summary.report.into_errors();

    if !errors.is_empty() {
        println!("\n{SEPARATOR}\n");
        println!("The following ERRORS were encountered:\n");
        for error in &errors {
            println!("{error}");
        }
    }

    println!("\n{SEPARATOR}\n");
    println!(
        "Dumped {} of {} TCO files in {:.2?}",
        summary.written,
        summary.discovered,
        start.elapsed()
    );
    println!("CacheDumper Finished.");

    ExitCode::SUCCESS
}
