/// A lazily compiled, process-wide `Regex` for a literal pattern.
#[macro_export]
macro_rules! regex {
    ($pattern:literal $(,)?) => {{
        static PATTERN: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pattern).unwrap());
        &*PATTERN
    }};
}

/// Unwraps an `Option`, returning `Ok(None)` (or the given value) from the
/// enclosing function when it is `None`.
#[macro_export]
macro_rules! return_ok_none_if_none {
    ($expr:expr $(,)?) => {
        match $expr {
            Some(value) => value,
            None => return Ok(None),
        }
    };
    ($expr:expr, $otherwise:expr $(,)?) => {
        match $expr {
            Some(value) => value,
            None => return Ok($otherwise),
        }
    };
}
