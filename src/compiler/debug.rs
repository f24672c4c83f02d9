#![allow(non_upper_case_globals)]

use crate::SyntaxKind;

/// Loud failures for broken internal invariants. These never represent bad
/// input; translation failures go through `TranslationError` instead.
pub struct DebugType {}

impl DebugType {
    #[track_caller]
    pub fn fail(&self, message: Option<&str>) -> ! {
        let message = match message {
            Some(message) => format!("Debug failure. {}", message),
            None => "Debug failure.".to_string(),
        };
        panic!("{}", message);
    }

    #[track_caller]
    pub fn fail_bad_syntax_kind(&self, kind: SyntaxKind, message: Option<&str>) -> ! {
        self.fail(Some(&format!(
            "{}Unexpected node.\r\nNode {} was unexpected.",
            message.map_or("".to_owned(), |message| format!("{} ", message)),
            self.format_syntax_kind(Some(kind)),
        )))
    }

    #[track_caller]
    pub fn check_defined<TValue>(&self, value: Option<TValue>, message: Option<&str>) -> TValue {
        match value {
            Some(value) => value,
            None => self.fail(message),
        }
    }

    pub fn format_syntax_kind(&self, kind: Option<SyntaxKind>) -> String {
        kind.map_or_else(|| "undefined".to_owned(), |kind| kind.as_str().to_owned())
    }
}

pub static Debug_: DebugType = DebugType {};
