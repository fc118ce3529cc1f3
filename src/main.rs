use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;
use xls::cli::{Cli, Commands};
use xls::output::Printer;

fn main() -> Result<()> {
    // RUST_LOG=xls=debug shows lookups and discovery decisions
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Validate(args) => {
            let summary = xls::cli::validate::run(args, &printer)?;
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        Commands::List(args) => xls::cli::list::run(args, &printer)?,
        Commands::Show(args) => xls::cli::show::run(args)?,
        Commands::Completions(args) => xls::cli::completions::run(args)?,
    }

    Ok(())
}
