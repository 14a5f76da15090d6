// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line syntax of the interactive loop.
//!
//! ```text
//! exit()              quit
//! find-1:dot          search "dot", show only the best hit
//! field recording     search, show up to the default limit
//! ```

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Exit,
    /// Blank line, nothing to do
    Skip,
    Query { query: &'a str, top_k: usize },
    Invalid(String),
}

pub fn parse_line(line: &str, default_limit: usize) -> ReplCommand<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Skip;
    }
    if line == "exit()" {
        return ReplCommand::Exit;
    }

    let Some(rest) = line.strip_prefix("find-") else {
        return ReplCommand::Query {
            query: line,
            top_k: default_limit,
        };
    };

    match rest.split_once(':') {
        Some((k, query)) => match k.trim().parse::<usize>() {
            Ok(top_k) => ReplCommand::Query {
                query: query.trim(),
                top_k,
            },
            Err(_) => ReplCommand::Invalid(format!(
                "result count {:?} is not a non-negative integer",
                k
            )),
        },
        None => ReplCommand::Invalid("expected find-<k>:<query>".to_string()),
    }
}
