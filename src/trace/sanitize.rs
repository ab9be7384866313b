//! Terminal escape sequence removal.
//!
//! Launch traces are captured straight from the VM consoles and come
//! littered with color and cursor control sequences. This step copies the
//! trace line-by-line with every escape sequence removed, leaving the text
//! content and line structure untouched.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

/// A lone CSI character (U+009B), or ESC `[` followed by parameter bytes
/// (0x30-0x3F), intermediate bytes (0x20-0x2F), and one final byte
/// (0x40-0x7E).
const ESCAPE_PATTERN: &str = r"\x{9b}|\x1b\[[0-?]*[ -/]*[@-~]";

/// Removes terminal escape sequences from text.
pub struct AnsiStripper {
    pattern: Regex,
}

impl AnsiStripper {
    pub fn new() -> Self {
        Self {
            // Constant pattern, compilation cannot fail at runtime.
            pattern: Regex::new(ESCAPE_PATTERN).expect("escape pattern is valid"),
        }
    }

    /// Remove every escape sequence from `line`; all other content is kept
    /// verbatim.
    pub fn strip<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(line, "")
    }
}

impl Default for AnsiStripper {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `input` to `output` with all terminal escape sequences removed.
///
/// Line terminators are preserved, so a trace that contains no escape
/// sequences comes out byte-identical. Creates or overwrites `output`.
pub fn sanitize_file(input: &Path, output: &Path) -> Result<()> {
    info!("cleaning escape sequences from {}", input.display());

    let src =
        File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let mut reader = BufReader::new(src);
    let dst = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(dst);

    let stripper = AnsiStripper::new();
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .with_context(|| format!("failed to read {}", input.display()))?;
        if read == 0 {
            break;
        }
        writer
            .write_all(stripper.strip(&line).as_bytes())
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(())
}
