//! Line length limits.

use relay_proto::{LineLimits, HARD_LINE_LIMIT, SOFT_LINE_LIMIT};
use serde::Deserialize;

/// Per-line limits applied to every client connection.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitsConfig {
    /// Content bytes kept per line; the rest is discarded.
    #[serde(default = "default_soft_line")]
    pub soft_line: usize,
    /// Raw bytes an unterminated line may reach before the client is dropped.
    #[serde(default = "default_hard_line")]
    pub hard_line: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            soft_line: default_soft_line(),
            hard_line: default_hard_line(),
        }
    }
}

impl LimitsConfig {
    pub fn line_limits(&self) -> LineLimits {
        LineLimits {
            soft: self.soft_line,
            hard: self.hard_line.max(self.soft_line),
        }
    }
}

fn default_soft_line() -> usize {
    SOFT_LINE_LIMIT
}

fn default_hard_line() -> usize {
    HARD_LINE_LIMIT
}
