use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recoverable parse diagnostic.
///
/// The parser never fails: every malformed construct is repaired and
/// reported with one of these. Positions are byte offsets into the
/// normalized source (see [`crate::ParseOutput::normalized`]).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseError {
    #[error("Unterminated choice opened at {pos}")]
    UnterminatedChoice { pos: usize },

    #[error("Unmatched closing brace at {pos}")]
    UnmatchedClose { pos: usize },

    #[error("Stray opening brace at {pos} kept as text")]
    StrayOpen { pos: usize },

    #[error("Nesting deeper than {max_depth} at {pos} kept as text")]
    NestingTooDeep { pos: usize, max_depth: usize },
}

impl ParseError {
    pub fn unterminated_choice(pos: usize) -> Self {
        Self::UnterminatedChoice { pos }
    }

    pub fn unmatched_close(pos: usize) -> Self {
        Self::UnmatchedClose { pos }
    }

    pub fn stray_open(pos: usize) -> Self {
        Self::StrayOpen { pos }
    }

    pub fn nesting_too_deep(pos: usize, max_depth: usize) -> Self {
        Self::NestingTooDeep { pos, max_depth }
    }

    /// Byte offset of the offending character
    pub fn pos(&self) -> usize {
        match self {
            Self::UnterminatedChoice { pos }
            | Self::UnmatchedClose { pos }
            | Self::StrayOpen { pos }
            | Self::NestingTooDeep { pos, .. } => *pos,
        }
    }

    /// Short label shown under the highlighted range
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnterminatedChoice { .. } => "this brace is never closed",
            Self::UnmatchedClose { .. } => "no choice to close here",
            Self::StrayOpen { .. } => "nothing follows this brace",
            Self::NestingTooDeep { .. } => "nesting limit reached here",
        }
    }
}

#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::ParseError;
    use ariadne::{Color, Label, Report, ReportKind, Source};

    /// Render a diagnostic against the normalized source it refers to
    pub fn format_error(error: &ParseError, file_name: &str, source: &str) -> String {
        let start = char_offset(source, error.pos());
        let end = char_offset(source, error.pos() + 1).max(start + 1);

        let mut buffer = Vec::new();
        let written = Report::build(ReportKind::Warning, file_name, start)
            .with_message(error.to_string())
            .with_label(
                Label::new((file_name, start..end))
                    .with_message(error.label())
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((file_name, Source::from(source.to_string())), &mut buffer);

        match written {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(_) => error.to_string(),
        }
    }

    /// Render every diagnostic, separated by blank lines
    pub fn format_errors(errors: &[ParseError], file_name: &str, source: &str) -> String {
        errors
            .iter()
            .map(|e| format_error(e, file_name, source))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ariadne spans count chars, diagnostics count bytes
    fn char_offset(source: &str, byte_pos: usize) -> usize {
        let clamped = byte_pos.min(source.len());
        source
            .char_indices()
            .take_while(|(i, _)| *i < clamped)
            .count()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_error_mentions_message() {
            let out = format_error(&ParseError::unterminated_choice(0), "inline", "{a|b");
            assert!(out.contains("Unterminated choice"));
        }

        #[test]
        fn test_char_offset_multibyte() {
            let source = "héllo {";
            assert_eq!(char_offset(source, source.len() - 1), 6);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_and_display() {
        let err = ParseError::nesting_too_deep(7, 4);
        assert_eq!(err.pos(), 7);
        assert_eq!(err.to_string(), "Nesting deeper than 4 at 7 kept as text");
        assert_eq!(ParseError::stray_open(3).label(), "nothing follows this brace");
    }
}
