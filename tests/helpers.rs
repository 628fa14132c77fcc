// Shared test helpers for integration tests.
//
// Provides a resolver with canned answers so runs are deterministic and never
// touch the network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain_mail_status::{
    check_domains, CheckOptions, CheckReport, LookupError, MailResolver,
};
use tokio_util::sync::CancellationToken;

/// Resolver answering from fixed tables. Unknown names have no records.
#[derive(Default, Clone)]
pub struct CannedResolver {
    mx: HashMap<String, Result<Vec<(u16, String)>, LookupError>>,
    txt: HashMap<String, Result<Vec<String>, LookupError>>,
}

#[allow(dead_code)] // Not every test file uses every builder
impl CannedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mx(mut self, name: &str) -> Self {
        self.mx
            .insert(name.to_string(), Ok(vec![(10, format!("mx.{name}."))]));
        self
    }

    pub fn mx_error(mut self, name: &str) -> Self {
        self.mx.insert(name.to_string(), Err(servfail(name)));
        self
    }

    pub fn txt(mut self, name: &str, records: &[&str]) -> Self {
        self.txt.insert(
            name.to_string(),
            Ok(records.iter().map(|r| r.to_string()).collect()),
        );
        self
    }

    pub fn txt_error(mut self, name: &str) -> Self {
        self.txt.insert(name.to_string(), Err(servfail(name)));
        self
    }
}

fn servfail(name: &str) -> LookupError {
    LookupError::Failed {
        name: name.to_string(),
        message: "SERVFAIL".to_string(),
    }
}

#[async_trait]
impl MailResolver for CannedResolver {
    async fn lookup_mx(&self, name: &str) -> Result<Vec<(u16, String)>, LookupError> {
        self.mx.get(name).cloned().unwrap_or_else(|| {
            Err(LookupError::NoRecords {
                name: name.to_string(),
            })
        })
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.txt.get(name).cloned().unwrap_or_else(|| {
            Err(LookupError::NoRecords {
                name: name.to_string(),
            })
        })
    }
}

/// Runs a check over `input` and returns the output text and report.
#[allow(dead_code)]
pub async fn run_in_memory(
    input: &str,
    workers: usize,
    resolver: Arc<dyn MailResolver>,
) -> (String, CheckReport) {
    let mut out = Vec::new();
    let report = check_domains(
        input.as_bytes(),
        &mut out,
        resolver,
        CheckOptions::new(workers),
        CancellationToken::new(),
    )
    .await
    .expect("check should succeed");
    (String::from_utf8(out).expect("output is UTF-8"), report)
}

/// Result rows (header skipped), sorted for order-independent comparison.
#[allow(dead_code)]
pub fn sorted_rows(output: &str) -> Vec<String> {
    let mut rows: Vec<String> = output.lines().skip(1).map(str::to_string).collect();
    rows.sort();
    rows
}
