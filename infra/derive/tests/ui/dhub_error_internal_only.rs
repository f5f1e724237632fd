use dhub_derive::dhub_error;
use std::borrow::Cow;

#[dhub_error]
pub enum DemoError {
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn demo() -> Result<(), DemoError> {
    Err("boom".into())
}

fn main() {
    assert!(demo().is_err());
}
