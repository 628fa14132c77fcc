//! Resolver abstraction.
//!
//! Domain inspection only needs two questions answered: the MX records of a
//! name and the TXT records of a name. [`MailResolver`] captures exactly that,
//! so the worker pool can run against `hickory-resolver` in production and
//! against canned answers in tests.

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::LookupError;

/// Answers MX and TXT queries.
///
/// Implementations return raw answers: MX records as `(preference, exchange)`
/// pairs in any order, TXT records in the order the server returned them with
/// the character-strings of each record concatenated.
#[async_trait]
pub trait MailResolver: Send + Sync {
    /// Queries MX records for `name`.
    async fn lookup_mx(&self, name: &str) -> Result<Vec<(u16, String)>, LookupError>;

    /// Queries TXT records for `name`.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

/// [`MailResolver`] backed by a `hickory-resolver` async resolver.
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    /// Wraps a configured resolver.
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl MailResolver for HickoryResolver {
    async fn lookup_mx(&self, name: &str) -> Result<Vec<(u16, String)>, LookupError> {
        let lookup = self
            .resolver
            .mx_lookup(name)
            .await
            .map_err(|e| classify_resolve_error(name, &e))?;
        Ok(lookup
            .iter()
            .map(|mx| (mx.preference(), mx.exchange().to_utf8()))
            .collect())
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = self
            .resolver
            .txt_lookup(name)
            .await
            .map_err(|e| classify_resolve_error(name, &e))?;
        // A TXT record may carry several character-strings; they form one value
        Ok(lookup
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes))
                    .collect::<String>()
            })
            .collect())
    }
}

/// Maps a hickory error onto [`LookupError`].
///
/// NXDOMAIN and NODATA both surface as `NoRecordsFound`.
fn classify_resolve_error(name: &str, err: &ResolveError) -> LookupError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::NoRecords {
            name: name.to_string(),
        },
        ResolveErrorKind::Timeout => LookupError::Timeout {
            name: name.to_string(),
        },
        _ => LookupError::Failed {
            name: name.to_string(),
            message: err.to_string(),
        },
    }
}
