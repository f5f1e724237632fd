use dhub_derive::dhub_error;
use std::borrow::Cow;

#[dhub_error]
pub enum StorageError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Read {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Parse failed{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse_score(raw: &str) -> Result<i64, StorageError> {
    raw.trim().parse::<i64>().context("Parsing score column")
}

fn main() {
    assert!(parse_score("42").is_ok());
    assert!(matches!(parse_score("nope"), Err(StorageError::Parse { .. })));
}
