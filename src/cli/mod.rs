// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fuzzdex command-line interface.
//!
//! Four subcommands: `index` builds and saves an index from a transcript
//! directory, `search` runs one query, `repl` keeps the index loaded and reads
//! queries from stdin, and `inspect` reports what a saved index holds.

pub mod display;
pub mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fuzzdex",
    about = "Fuzzy full-text search over field-recording transcripts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a directory of transcripts
    Index {
        /// Directory of transcript files, one recording per file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the index artifacts
        #[arg(short, long)]
        output: PathBuf,

        /// Stop-word file: one word per line, or comma separated
        #[arg(short, long)]
        stop_words: Option<PathBuf>,

        /// Transcript file extension
        #[arg(long, default_value = "txt")]
        extension: String,

        /// Treat every regular file as a transcript, whatever its extension
        #[arg(long, conflicts_with = "extension")]
        any_extension: bool,
    },

    /// Search an index and display ranked documents
    Search {
        /// Index directory
        index: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Maximum edits between a query term and a matched term, for every
        /// term. Without it, terms of up to three characters match exactly and
        /// longer ones within 2 edits.
        #[arg(short = 'k', long)]
        max_distance: Option<usize>,

        /// Keep only the N closest matches per query term
        #[arg(long)]
        max_matches: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive search loop over a loaded index
    ///
    /// Each line is a query. `find-<n>:<query>` shows at most n results for
    /// that line only; `exit()` quits.
    Repl {
        /// Index directory
        index: PathBuf,

        /// Maximum number of results per query
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Edit bound for every query term, overriding exact matching of
        /// short terms
        #[arg(short = 'k', long)]
        max_distance: Option<usize>,
    },

    /// Inspect a saved index: artifacts, counts, and tree shape
    Inspect {
        /// Index directory
        index: PathBuf,
    },
}
