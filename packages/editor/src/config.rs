//! Editor configuration

use crate::undo_stack::DEFAULT_MAX_LEVELS;
use choicetext_evaluator::{VariationCounter, DEFAULT_VARIATION_CEILING};
use choicetext_parser::{ParseOptions, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo levels kept (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Variation counts above this are reported as overflow
    #[serde(default = "default_variation_ceiling")]
    pub variation_ceiling: u64,

    /// Deepest choice nesting the parser will build
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_LEVELS
}

fn default_variation_ceiling() -> u64 {
    DEFAULT_VARIATION_CEILING
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            variation_ceiling: default_variation_ceiling(),
            max_depth: default_max_depth(),
        }
    }
}

impl EditorConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }

    pub fn counter(&self) -> VariationCounter {
        VariationCounter::with_ceiling(self.variation_ceiling)
    }
}
