//! Field separator inference.
//!
//! Looks at a small window of leading lines and picks comma, tab or space.
//! Detection only tests for the presence of a separator, never counts them.

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::row::strip_line_ending;

/// Single-byte field separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
    Space,
}

impl Delimiter {
    /// Candidates in detection priority order
    pub const PRIORITY: [Delimiter; 3] = [Delimiter::Comma, Delimiter::Tab, Delimiter::Space];

    /// Used when nothing is detected or the sample is ambiguous
    pub const FALLBACK: Delimiter = Delimiter::Comma;

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Space => b' ',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Tab => "tab",
            Delimiter::Space => "space",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" | "," => Ok(Delimiter::Comma),
            "tab" | "\t" | "\\t" => Ok(Delimiter::Tab),
            "space" | " " => Ok(Delimiter::Space),
            other => Err(format!(
                "unknown delimiter '{}' (expected comma, tab or space)",
                other
            )),
        }
    }
}

/// Detect the separator of a single line by presence, in priority order
pub fn detect_line(line: &[u8]) -> Option<Delimiter> {
    let line = strip_line_ending(line);
    Delimiter::PRIORITY
        .into_iter()
        .find(|d| line.contains(&d.as_byte()))
}

/// Incremental detector fed one line at a time
#[derive(Debug, Clone, Default)]
pub struct DelimiterDetector {
    chosen: Option<Delimiter>,
    settled: bool,
    lines_seen: usize,
}

impl DelimiterDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sampled line
    ///
    /// Once two different separators have been seen the choice is fixed to
    /// [`Delimiter::FALLBACK`] and further lines are ignored.
    pub fn observe(&mut self, line: &[u8]) {
        if self.settled {
            return;
        }
        self.lines_seen += 1;

        let Some(detected) = detect_line(line) else {
            return;
        };

        match self.chosen {
            None => self.chosen = Some(detected),
            Some(current) if current != detected => {
                warn!(
                    "Sample mixes {} and {} separators, falling back to {}",
                    current,
                    detected,
                    Delimiter::FALLBACK
                );
                self.chosen = Some(Delimiter::FALLBACK);
                self.settled = true;
            }
            Some(_) => {}
        }
    }

    /// Whether sampling stopped early because of an ambiguous sample
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Number of lines observed before the choice was settled
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Final choice, falling back to comma when nothing was detected
    pub fn finish(&self) -> Delimiter {
        self.chosen.unwrap_or(Delimiter::FALLBACK)
    }
}

/// Run detection over up to `sample_lines` lines of `reader`
///
/// Consumes the sampled lines; callers that need the data again must
/// rewind the underlying source.
pub fn detect_delimiter<R: BufRead>(reader: &mut R, sample_lines: usize) -> io::Result<Delimiter> {
    let mut detector = DelimiterDetector::new();
    let mut line = Vec::new();

    for _ in 0..sample_lines {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        detector.observe(&line);
        if detector.is_settled() {
            break;
        }
    }

    let delimiter = detector.finish();
    debug!(
        "Detected {} delimiter after {} sampled lines",
        delimiter,
        detector.lines_seen()
    );
    Ok(delimiter)
}
