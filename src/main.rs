use clap::Parser;
use miette::Result;
use statblock::cli::{Cli, Commands};
use statblock::output::Printer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => statblock::cli::convert::run(args, &printer)?,
        Commands::Extract(args) => statblock::cli::extract::run(args, &printer)?,
        Commands::Validate(args) => statblock::cli::validate::run(args, &printer)?,
        Commands::Formats(args) => statblock::cli::formats::run(args)?,
        Commands::Init(args) => statblock::cli::init::run(args, &printer)?,
        Commands::Completions(args) => statblock::cli::completions::run(args)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
