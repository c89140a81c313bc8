use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::time::{Duration, Instant};
use unicode_emoji::catalog::Catalog;
use unicode_emoji::cli::{Cli, Commands, OutputFormat};
use unicode_emoji::config::resolve_source;
use unicode_emoji::emoji::Emoji;
use unicode_emoji::logging::{StderrLogger, level_from_env, level_from_flags};
use unicode_emoji::parse::TableFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();
    StderrLogger::init(level_from_env().unwrap_or_else(|| level_from_flags(cli.verbose, cli.quiet)));

    let catalog = resolve_source(&cli).into_catalog(cli.table);

    match cli.command.clone() {
        Commands::Random {
            count,
            interval_ms,
            format,
        } => {
            let picked = pick_random(&catalog, count, Duration::from_millis(interval_ms))?;
            write_emojis(&picked, format)?;
        }
        Commands::Search { query, format } => {
            let matches = catalog.search(&query).with_context(|| load_failure(&catalog))?;
            let result = SearchResult {
                query,
                matches: matches.len(),
                emojis: matches.into_iter().map(EmojiView::from).collect(),
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => {
                    println!("Found {} matching emojis", result.matches);
                    for view in &result.emojis {
                        println!("{}", view.text_line());
                    }
                }
            }
        }
        Commands::List { format } => {
            let all = catalog.all().with_context(|| load_failure(&catalog))?;
            let views: Vec<EmojiView> = all.iter().map(EmojiView::from).collect();
            write_emojis(&views, format)?;
        }
        Commands::Stats => {
            let start = Instant::now();
            let table = catalog.table().with_context(|| load_failure(&catalog))?;
            let stats = StatsResult {
                source: catalog.source_description(),
                table: catalog.format(),
                entries: table.entries.len(),
                skipped_lines: table.skipped_lines,
                load_count: catalog.load_count(),
                content_hash: table.content_hash.clone(),
                duration_ms: start.elapsed().as_millis() as u64,
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

fn load_failure(catalog: &Catalog) -> String {
    format!(
        "failed to load emoji table from {}",
        catalog.source_description()
    )
}

fn pick_random(catalog: &Catalog, count: usize, interval: Duration) -> Result<Vec<EmojiView>> {
    if count == 0 {
        bail!("--count must be at least 1");
    }

    let mut picked = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 && !interval.is_zero() {
            std::thread::sleep(interval);
        }
        let emoji = catalog.random().with_context(|| load_failure(catalog))?;
        picked.push(EmojiView::from(emoji));
    }
    Ok(picked)
}

fn write_emojis(views: &[EmojiView], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(views)?),
        OutputFormat::Text => {
            for view in views {
                println!("{}", view.text_line());
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct EmojiView {
    emoji: String,
    code_points: Vec<String>,
    name: String,
}

impl EmojiView {
    fn text_line(&self) -> String {
        let code_points = self.code_points.join(" ");
        if self.name.is_empty() {
            format!("{} ({code_points})", self.emoji)
        } else {
            format!("{} ({code_points}) - {}", self.emoji, self.name)
        }
    }
}

impl From<&Emoji> for EmojiView {
    fn from(e: &Emoji) -> Self {
        Self {
            emoji: e.to_string(),
            code_points: e.hex_code_points(),
            name: e.name().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchResult {
    query: String,
    matches: usize,
    emojis: Vec<EmojiView>,
}

#[derive(Debug, Serialize)]
struct StatsResult {
    source: String,
    table: TableFormat,
    entries: usize,
    skipped_lines: usize,
    load_count: usize,
    content_hash: String,
    duration_ms: u64,
}
