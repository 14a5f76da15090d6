// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use fuzzdex::{BuildOptions, Index, IndexStore, QueryEngine, QueryOptions, StopWords};

mod cli;
use cli::display::{self, field, row, section_bot, section_mid, section_top, themed, Color};
use cli::repl::{parse_line, ReplCommand};
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Index {
            input,
            output,
            stop_words,
            extension,
            any_extension,
        } => {
            let extension = (!any_extension).then_some(extension);
            run_index(&input, &output, stop_words.as_deref(), extension)
        }
        Commands::Search {
            index,
            query,
            limit,
            max_distance,
            max_matches,
            json,
        } => run_search(
            &index,
            &query,
            limit,
            query_options(max_distance, max_matches),
            json,
        ),
        Commands::Repl {
            index,
            limit,
            max_distance,
        } => run_repl(&index, limit, query_options(max_distance, None)),
        Commands::Inspect { index } => run_inspect(&index),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Progress style for the indexing bar
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn run_index(
    input: &Path,
    output: &Path,
    stop_words: Option<&Path>,
    extension: Option<String>,
) -> Result<()> {
    let stop_words = match stop_words {
        Some(path) => StopWords::load(path)?,
        None => StopWords::new(),
    };
    info!("Using {} stop words", stop_words.len());

    let options = BuildOptions { extension };

    #[cfg(feature = "parallel")]
    let built = {
        let pb = ProgressBar::new(0);
        pb.set_style(create_progress_style());
        pb.set_prefix("Indexing");
        pb.set_message("transcripts...");
        let built = fuzzdex::build_index_with_progress(input, &stop_words, &options, &pb);
        pb.finish_and_clear();
        built
    };
    #[cfg(not(feature = "parallel"))]
    let built = fuzzdex::build_index_with_options(input, &stop_words, &options);

    let (index, diagnostics) =
        built.with_context(|| format!("failed to index {}", input.display()))?;
    display::print_build_summary(&diagnostics);

    IndexStore::save(&index, output)
        .with_context(|| format!("failed to save index to {}", output.display()))?;
    info!("Saved index to {}", output.display());
    Ok(())
}

/// An explicit `-k` applies to every term, short ones included.
fn query_options(max_distance: Option<usize>, max_matches: Option<usize>) -> QueryOptions {
    let mut options = QueryOptions {
        max_matches_per_term: max_matches,
        ..QueryOptions::default()
    };
    if let Some(k) = max_distance {
        options.max_edit_distance = k;
        options.exact_match_max_len = 0;
    }
    options
}

fn load_index(dir: &Path) -> Result<Index> {
    IndexStore::load(dir).with_context(|| format!("failed to load index from {}", dir.display()))
}

fn run_search(
    dir: &Path,
    query: &str,
    limit: usize,
    options: QueryOptions,
    json: bool,
) -> Result<()> {
    let index = load_index(dir)?;
    let hits = QueryEngine::with_options(&index, options).find_relevant_documents(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        display::print_hits(query, &hits);
    }
    Ok(())
}

fn run_repl(dir: &Path, limit: usize, options: QueryOptions) -> Result<()> {
    let index = load_index(dir)?;
    let engine = QueryEngine::with_options(&index, options);

    display::title("fuzzdex");
    println!(
        "{} documents, {} terms. Type a query, find-<n>:<query>, or exit().",
        index.doc_count(),
        index.term_count()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        // EOF ends the session like exit()
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read from stdin")?;

        match parse_line(&line, limit) {
            ReplCommand::Exit => break,
            ReplCommand::Skip => {}
            ReplCommand::Invalid(reason) => eprintln!("⚠️  {}", reason),
            ReplCommand::Query { query, top_k } => {
                let hits = engine.find_relevant_documents(query, top_k);
                display::print_hits(query, &hits);
            }
        }
    }
    Ok(())
}

fn run_inspect(dir: &Path) -> Result<()> {
    let manifest = IndexStore::manifest(dir)
        .with_context(|| format!("failed to read manifest in {}", dir.display()))?;
    let index = load_index(dir)?;
    let stats = index.stats();

    display::title("fuzzdex index");

    section_top("MANIFEST");
    field("path", &display::truncate_left(&dir.display().to_string(), 48));
    field("format version", &manifest.format_version.to_string());
    field("written by", &manifest.generator);

    section_mid("ARTIFACTS");
    let mut total = 0u64;
    for (name, entry) in &manifest.artifacts {
        total += entry.len;
        row(&format!(
            "  {} {}  {}",
            display::pad_right(name, 20),
            display::pad_left(&display::format_size(entry.len), 10),
            themed(Color::Muted, &[], &format!("crc32 {:08x}", entry.crc32))
        ));
    }
    field("total", &display::format_size(total));

    section_mid("INDEX");
    field("documents", &stats.doc_count.to_string());
    field("terms", &stats.term_count.to_string());
    field("postings", &stats.posting_count.to_string());
    field("tokens", &stats.token_count.to_string());
    field("stop words", &stats.stop_word_count.to_string());
    field("BK-tree depth", &stats.tree_depth.to_string());
    section_bot();
    Ok(())
}
