use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diffmap")]
#[command(about = "Competitor analysis for startup ideas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a startup idea and print the result
    Analyze {
        /// The startup idea to analyze
        idea: String,

        /// Write the full JSON bundle to this path (a directory gets a
        /// timestamped file name)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Override the generation model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start the web server with the embedded UI
    Serve {
        /// Server port
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
