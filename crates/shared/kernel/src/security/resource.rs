use std::borrow::Cow;

#[dhub_derive::dhub_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Guards record IDs arriving from the outside world.
///
/// A `SurrealDB` record ID carries its table (`match:abc`). Accepting such an
/// ID verbatim would let a caller point a `match` endpoint at a row of any
/// other table, so every inbound ID goes through [`ResourceGuard::verify`]
/// before it reaches a query.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Checks that `id` belongs to `expected_table` and returns the
    /// fully-qualified form.
    ///
    /// Bare IDs (no `table:` prefix) are accepted and prefixed with the
    /// expected table.
    ///
    /// # Errors
    /// Returns [`ResourceGuardError::Validation`] when the ID names a
    /// different table.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let raw = id.as_ref();
        let expected = expected_table.as_ref();

        match raw.split_once(':') {
            None => Ok(format!("{expected}:{raw}")),
            Some((table, _)) if table == expected => Ok(raw.to_owned()),
            Some((table, _)) => Err(ResourceGuardError::Validation {
                message: format!("Expected '{expected}', got '{table}'").into(),
                context: Some("ID table mismatch".into()),
            }),
        }
    }

    /// Strips the table prefix from a `SurrealDB` ID, if present.
    #[must_use]
    pub fn key(id: &str) -> &str {
        id.split_once(':').map_or(id, |(_, key)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_matching_table() {
        assert_eq!(ResourceGuard::verify("match:abc", "match").unwrap(), "match:abc");
    }

    #[test]
    fn verify_prefixes_bare_ids() {
        assert_eq!(ResourceGuard::verify("abc", "match").unwrap(), "match:abc");
    }

    #[test]
    fn verify_rejects_foreign_tables() {
        assert!(ResourceGuard::verify("migration:0001", "match").is_err());
    }

    #[test]
    fn key_drops_the_prefix() {
        assert_eq!(ResourceGuard::key("match:abc"), "abc");
        assert_eq!(ResourceGuard::key("abc"), "abc");
    }
}
