use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::parse::TableFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "unicode-emoji")]
#[command(about = "Pick random emojis and search the Unicode emoji tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Table to read: a local file path or an http(s) URL.
    #[arg(long, global = true, value_name = "FILE|URL")]
    pub source: Option<String>,

    #[arg(long = "table", global = true, value_enum, default_value_t = TableFormat::EmojiTest)]
    pub table: TableFormat,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    Random {
        #[arg(short = 'n', long, value_name = "N", default_value_t = 1)]
        count: usize,

        #[arg(long, value_name = "MS", default_value_t = 0)]
        interval_ms: u64,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    Search {
        query: String,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    List {
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    Stats,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
