pub mod completions;
pub mod list;
pub mod show;
pub mod validate;

use clap::{Parser, Subcommand};

/// xls - XRPL Standards proposal validator
#[derive(Parser, Debug)]
#[command(name = "xls")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate XLS documents against the preamble schema and templates
    Validate(validate::ValidateArgs),

    /// List discovered XLS documents
    List(list::ListArgs),

    /// Print the parsed metadata of one document as JSON
    Show(show::ShowArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
