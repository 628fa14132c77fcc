//! Shared test helpers.
//!
//! [`StubResolver`] answers MX and TXT queries from fixed tables and records
//! every query it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::dns::MailResolver;
use crate::error_handling::LookupError;

type MxAnswer = Result<Vec<(u16, String)>, LookupError>;
type TxtAnswer = Result<Vec<String>, LookupError>;

/// Resolver with canned answers. Names without an entry answer `NoRecords`.
#[derive(Default)]
pub(crate) struct StubResolver {
    mx: HashMap<String, MxAnswer>,
    txt: HashMap<String, TxtAnswer>,
    queries: Mutex<Vec<String>>,
}

impl StubResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_mx(mut self, name: &str, exchanges: &[(u16, &str)]) -> Self {
        let records = exchanges
            .iter()
            .map(|(pref, host)| (*pref, host.to_string()))
            .collect();
        self.mx.insert(name.to_string(), Ok(records));
        self
    }

    pub(crate) fn with_mx_error(mut self, name: &str, err: LookupError) -> Self {
        self.mx.insert(name.to_string(), Err(err));
        self
    }

    pub(crate) fn with_txt(mut self, name: &str, records: &[&str]) -> Self {
        let records = records.iter().map(|r| r.to_string()).collect();
        self.txt.insert(name.to_string(), Ok(records));
        self
    }

    pub(crate) fn with_txt_error(mut self, name: &str, err: LookupError) -> Self {
        self.txt.insert(name.to_string(), Err(err));
        self
    }

    /// Queries seen so far, as `"MX <name>"` / `"TXT <name>"`.
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, name: &str) {
        self.queries.lock().unwrap().push(format!("{kind} {name}"));
    }
}

#[async_trait]
impl MailResolver for StubResolver {
    async fn lookup_mx(&self, name: &str) -> Result<Vec<(u16, String)>, LookupError> {
        self.record("MX", name);
        self.mx.get(name).cloned().unwrap_or_else(|| {
            Err(LookupError::NoRecords {
                name: name.to_string(),
            })
        })
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.record("TXT", name);
        self.txt.get(name).cloned().unwrap_or_else(|| {
            Err(LookupError::NoRecords {
                name: name.to_string(),
            })
        })
    }
}

pub(crate) fn failed(name: &str) -> LookupError {
    LookupError::Failed {
        name: name.to_string(),
        message: "SERVFAIL".to_string(),
    }
}
