use itertools::Itertools;
use thiserror::Error;

use crate::{BaseTextRange, ReadonlyTextRange};

const CONTEXT_LINES: usize = 2;

/// A construct the target type system cannot express.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}\n{code_frame}")]
pub struct ExpectedTranslationError {
    pub message: String,
    pub range: BaseTextRange,
    pub code_frame: String,
}

/// Input the translator should never have been handed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}\n{code_frame}")]
pub struct UnexpectedTranslationError {
    pub message: String,
    pub range: BaseTextRange,
    pub code_frame: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error(transparent)]
    Expected(#[from] ExpectedTranslationError),
    #[error(transparent)]
    Unexpected(#[from] UnexpectedTranslationError),
}

impl TranslationError {
    pub fn message(&self) -> &str {
        match self {
            TranslationError::Expected(error) => &error.message,
            TranslationError::Unexpected(error) => &error.message,
        }
    }

    pub fn range(&self) -> BaseTextRange {
        match self {
            TranslationError::Expected(error) => error.range,
            TranslationError::Unexpected(error) => error.range,
        }
    }

    pub fn is_expected(&self) -> bool {
        matches!(self, TranslationError::Expected(_))
    }
}

impl ExpectedTranslationError {
    pub fn new(message: impl Into<String>, range: BaseTextRange, code: &str) -> Self {
        let message = message.into();
        Self {
            code_frame: build_code_frame(code, range, &message),
            message,
            range,
        }
    }
}

impl UnexpectedTranslationError {
    pub fn new(message: impl Into<String>, range: BaseTextRange, code: &str) -> Self {
        let message = message.into();
        Self {
            code_frame: build_code_frame(code, range, &message),
            message,
            range,
        }
    }
}

pub fn unsupported_feature_message(thing: &str) -> String {
    format!(
        "Unsupported feature: Translating \"{}\" is currently not supported.",
        thing
    )
}

/// Renders the source lines spanned by `range` with up to two lines of
/// context, a `>` gutter mark on the spanned lines and a `^` marker under the
/// span. The message follows the first marker. Synthesized ranges (and
/// ranges outside `code`) render as the bare message.
pub fn build_code_frame(code: &str, range: BaseTextRange, message: &str) -> String {
    if range.is_synthesized() || range.end() > code.len() || range.pos() > range.end() {
        return message.to_owned();
    }
    let lines = code.split('\n').collect_vec();
    let (start_line, start_column) = line_and_column(code, range.pos());
    let (end_line, end_column) = line_and_column(code, range.end());
    let first = start_line.saturating_sub(CONTEXT_LINES);
    let last = (end_line + CONTEXT_LINES).min(lines.len() - 1);
    let gutter_width = (last + 1).to_string().len();

    let mut frame = vec![];
    let mut message_written = false;
    for (line_index, line) in lines.iter().enumerate().take(last + 1).skip(first) {
        let highlighted = (start_line..=end_line).contains(&line_index);
        frame.push(format!(
            "{} {:>width$} | {}",
            if highlighted { ">" } else { " " },
            line_index + 1,
            line,
            width = gutter_width,
        ));
        if !highlighted {
            continue;
        }
        let marker_start = if line_index == start_line { start_column } else { 0 };
        let marker_end = if line_index == end_line {
            end_column
        } else {
            line.chars().count()
        };
        let mut marker_line = format!(
            "  {:>width$} | {}{}",
            "",
            " ".repeat(marker_start),
            "^".repeat(marker_end.saturating_sub(marker_start).max(1)),
            width = gutter_width,
        );
        if !message_written && !message.is_empty() {
            marker_line.push(' ');
            marker_line.push_str(message);
            message_written = true;
        }
        frame.push(marker_line);
    }
    frame.join("\n")
}

fn line_and_column(code: &str, offset: usize) -> (usize, usize) {
    let before = code.get(..offset).unwrap_or(code);
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    (line, before[line_start..].chars().count())
}

/// The value of the block comment attached to a placeholder node: the code
/// frame, one ` * `-prefixed line per frame line.
pub fn build_diagnostic_comment_value(code_frame: &str) -> String {
    format!("*\n * {}\n*", code_frame.split('\n').join("\n * "))
}
