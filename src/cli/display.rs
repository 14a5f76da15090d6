// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the fuzzdex CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `FUZZDEX_THEME` first, then `COLORFGBG`, then defaults to dark. Respects
//! `NO_COLOR` and drops all styling when stdout is not a TTY, so piping
//! results into another tool gives plain text.
//!
//! # Theme detection order
//!
//! 1. `FUZZDEX_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use fuzzdex::{BuildDiagnostics, SearchHit};

/// Inner width of every box, between the two border characters.
pub const BOX_WIDTH: usize = 72;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Resolve the theme from an explicit setting and a `COLORFGBG` value.
    fn from_hints(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
        match explicit.map(str::to_ascii_lowercase).as_deref() {
            Some("light" | "l") => return Theme::Light,
            Some("dark" | "d") => return Theme::Dark,
            _ => {}
        }

        // "fg;bg" or "fg;default;bg": 7 and 9..=15 are light backgrounds
        let light_background = colorfgbg
            .and_then(|value| value.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok())
            .is_some_and(|bg| bg == 7 || bg >= 9);

        if light_background {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

/// Theme for this process, read from the environment once.
pub fn theme() -> Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    *THEME.get_or_init(|| {
        let explicit = std::env::var("FUZZDEX_THEME").ok();
        let colorfgbg = std::env::var("COLORFGBG").ok();
        Theme::from_hints(explicit.as_deref(), colorfgbg.as_deref())
    })
}

/// What a piece of output means; the theme decides how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Borders, labels, secondary text
    Muted,
    /// Section labels
    Accent,
    /// Title box border
    Frame,
    Title,
    /// Scores near the top result
    Best,
    Good,
    Warn,
    Error,
}

impl Color {
    /// OneDark and One Light, true color.
    fn rgb(self, theme: Theme) -> (u8, u8, u8) {
        match theme {
            Theme::Dark => match self {
                Color::Muted => (92, 99, 112),
                Color::Accent => (86, 182, 194),
                Color::Frame => (97, 175, 239),
                Color::Title => (102, 217, 239),
                Color::Best => (166, 226, 46),
                Color::Good => (152, 195, 121),
                Color::Warn => (229, 192, 123),
                Color::Error => (224, 108, 117),
            },
            Theme::Light => match self {
                Color::Muted => (160, 161, 167),
                Color::Accent => (1, 132, 188),
                Color::Frame => (64, 120, 242),
                Color::Title => (1, 112, 158),
                Color::Best => (68, 140, 39),
                Color::Good => (80, 161, 79),
                Color::Warn => (193, 132, 1),
                Color::Error => (228, 86, 73),
            },
        }
    }

    fn escape_for(self, theme: Theme) -> String {
        let (r, g, b) = self.rgb(theme);
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }

    pub fn escape(self) -> String {
        self.escape_for(theme())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STYLING
// ═══════════════════════════════════════════════════════════════════════════

/// Styling is on only for a TTY, and never with `NO_COLOR` set.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// `text` in `color` plus any modifiers, or plain `text` without styling.
pub fn themed(color: Color, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.concat(), color.escape(), text, RESET)
    } else {
        text.to_string()
    }
}

fn border(color: Color) -> (String, &'static str) {
    if use_colors() {
        (color.escape(), RESET)
    } else {
        (String::new(), "")
    }
}

/// Printed width of `s`: characters outside ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut chars = s.chars();
    let mut len = 0;
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip through the sequence terminator
            chars.by_ref().find(|&c| c == 'm');
        } else {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let (b, reset) = border(Color::Muted);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{b}│{reset}{}{}{b}│{reset}", content, " ".repeat(pad));
}

/// Print a `label  value` line inside a box
pub fn field(label: &str, value: &str) {
    row(&format!("  {} {}", pad_right(&themed(Color::Muted, &[], label), 20), value));
}

fn rule(left: &str, right: &str, label: &str) {
    let (b, reset) = border(Color::Muted);
    let label_part = format!("─ {} ", themed(Color::Accent, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}{left}{reset}{label_part}{b}{}{right}{reset}", "─".repeat(remaining));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    rule("┌", "┐", label);
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    rule("├", "┤", label);
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let (b, reset) = border(Color::Muted);
    println!("{b}└{}┘{reset}", "─".repeat(BOX_WIDTH));
}

/// Print a centered bold title in a double-line box
pub fn title(text: &str) {
    let (b, reset) = border(Color::Frame);
    let colored = themed(Color::Title, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    println!("{b}╔{}╗{reset}", "═".repeat(BOX_WIDTH));
    println!(
        "{b}║{reset}{}{}{}{b}║{reset}",
        " ".repeat(left_pad),
        colored,
        " ".repeat(total_pad - left_pad)
    );
    println!("{b}╚{}╝{reset}", "═".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

fn fill(width: usize, s: &str) -> String {
    " ".repeat(width.saturating_sub(visible_len(s)))
}

/// Right-align a styled string in `width` columns.
pub fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", fill(width, s), s)
}

/// Left-align a styled string in `width` columns.
pub fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, fill(width, s))
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Truncate to `max_len` characters, adding a ... prefix if needed
pub fn truncate_left(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let tail: String = s.chars().skip(len - keep).collect();
        format!("...{}", tail)
    }
}

/// Score colored relative to the best score of the result list
pub fn score_value(score: f64, best: f64) -> String {
    let text = format!("{:>9.4}", score);
    if !use_colors() || best <= 0.0 {
        return text;
    }
    let ratio = score / best;
    let color = match ratio {
        r if r >= 0.75 => Color::Best,
        r if r >= 0.4 => Color::Good,
        r if r >= 0.15 => Color::Warn,
        _ => Color::Muted,
    };
    format!("{}{}{}", color.escape(), text, RESET)
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Ranked results table
pub fn print_hits(query: &str, hits: &[SearchHit]) {
    section_top(&format!("RESULTS \"{}\"", truncate_left(query, 40)));
    if hits.is_empty() {
        row(&format!("  {}", themed(Color::Muted, &[DIM], "no matching documents")));
    }
    let best = hits.first().map_or(0.0, |h| h.score);
    for (rank, hit) in hits.iter().enumerate() {
        row(&format!(
            "  {}  {}  {}",
            pad_left(&themed(Color::Muted, &[], &format!("{}.", rank + 1)), 4),
            score_value(hit.score, best),
            truncate_left(&hit.doc_id, BOX_WIDTH - 20)
        ));
    }
    section_bot();
}

/// Summary of an indexing run
pub fn print_build_summary(diagnostics: &BuildDiagnostics) {
    section_top("INDEXED");
    field("files processed", &diagnostics.files_processed.to_string());
    field("documents", &diagnostics.documents_indexed.to_string());
    field("terms", &diagnostics.terms_indexed.to_string());
    let skipped = diagnostics.files_skipped.to_string();
    if diagnostics.files_skipped == 0 {
        field("files skipped", &skipped);
    } else {
        field("files skipped", &themed(Color::Warn, &[BOLD], &skipped));
        section_mid("SKIPPED");
        for file in &diagnostics.skipped {
            row(&format!(
                "  {}",
                truncate_left(&file.path.display().to_string(), BOX_WIDTH - 4)
            ));
            row(&format!(
                "    {}",
                themed(Color::Error, &[], &truncate_left(&file.reason, BOX_WIDTH - 6))
            ));
        }
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
