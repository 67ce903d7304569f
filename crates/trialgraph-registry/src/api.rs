//! ClinicalTrials.gov v2 API client and pagination

use indicatif::ProgressBar;
use serde::Deserialize;
use serde_json::Value;
use trialgraph_core::{HttpError, fmt_num, get_json, retry_with_backoff};

use crate::config::Config;

/// One study exactly as the registry returned it.
///
/// Fields are read by JSON pointer; nothing about the shape is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawTrial(pub Value);

impl RawTrial {
    /// String at `pointer`, or `""` when absent or not a string.
    pub fn text(&self, pointer: &str) -> &str {
        self.0.pointer(pointer).and_then(Value::as_str).unwrap_or("")
    }

    /// Array at `pointer`, or an empty slice when absent or not an array.
    pub fn list(&self, pointer: &str) -> &[Value] {
        self.0
            .pointer(pointer)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One page of the `studies` endpoint
#[derive(Debug, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub studies: Vec<RawTrial>,
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// Anything that can hand out registry pages by continuation token.
pub trait PageSource {
    /// Fetch the page after `token` (`None` = first page).
    fn fetch_page(&mut self, token: Option<&str>) -> Result<Page, HttpError>;
}

/// HTTP page source for the registry endpoint
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    search_term: String,
    page_size: usize,
    max_retries: u32,
}

impl RegistryClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            search_term: config.search_term.clone(),
            page_size: config.page_size,
            max_retries: config.max_retries,
        }
    }

    fn query(&self, token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("query.term", self.search_term.clone()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(token) = token {
            query.push(("pageToken", token.to_string()));
        }
        query
    }
}

impl PageSource for RegistryClient {
    fn fetch_page(&mut self, token: Option<&str>) -> Result<Page, HttpError> {
        let query = self.query(token);
        retry_with_backoff("registry page", self.max_retries, || {
            get_json(&self.base_url, &query)
        })
    }
}

/// Page through `source` until `max_trials` studies are held or no token remains.
///
/// A failed page ends pagination; whatever was accumulated is returned.
/// The result never exceeds `max_trials` studies.
pub fn fetch_all<S: PageSource + ?Sized>(
    source: &mut S,
    max_trials: usize,
    pb: &ProgressBar,
) -> Vec<RawTrial> {
    let mut trials: Vec<RawTrial> = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    while trials.len() < max_trials {
        let page = match source.fetch_page(token.as_deref()) {
            Ok(page) => page,
            Err(e) => {
                log::error!(
                    "Failed to fetch trials (page {}): {e}; keeping {} already fetched",
                    pages + 1,
                    trials.len()
                );
                break;
            }
        };
        pages += 1;
        trials.extend(page.studies);
        pb.set_message(format!("{} trials, {pages} pages", fmt_num(trials.len())));
        log::debug!("page {pages}: {} trials so far", trials.len());

        token = page.next_page_token.filter(|t| !t.is_empty());
        if token.is_none() {
            break;
        }
    }

    trials.truncate(max_trials);
    log::info!("Fetched {} clinical trials", fmt_num(trials.len()));
    trials
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use serde_json::json;

    use super::*;

    /// Replays canned responses and records the tokens it was asked for.
    struct Scripted {
        responses: VecDeque<Result<Page, HttpError>>,
        tokens: Vec<Option<String>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<Page, HttpError>>) -> Self {
            Self {
                responses: responses.into(),
                tokens: Vec::new(),
            }
        }
    }

    impl PageSource for Scripted {
        fn fetch_page(&mut self, token: Option<&str>) -> Result<Page, HttpError> {
            self.tokens.push(token.map(String::from));
            self.responses
                .pop_front()
                .unwrap_or_else(|| Ok(Page::default()))
        }
    }

    fn page(ids: &[&str], next: Option<&str>) -> Result<Page, HttpError> {
        Ok(Page {
            studies: ids
                .iter()
                .map(|id| RawTrial(json!({"protocolSection": {"identificationModule": {"nctId": id}}})))
                .collect(),
            next_page_token: next.map(String::from),
        })
    }

    #[test]
    fn follows_tokens_until_exhausted() {
        let mut source = Scripted::new(vec![
            page(&["NCT1", "NCT2"], Some("t1")),
            page(&["NCT3"], None),
        ]);
        let trials = fetch_all(&mut source, 100, &ProgressBar::hidden());
        assert_eq!(trials.len(), 3);
        assert_eq!(source.tokens, vec![None, Some("t1".to_string())]);
    }

    #[test]
    fn empty_token_ends_pagination() {
        let mut source = Scripted::new(vec![page(&["NCT1"], Some("")), page(&["NCT2"], None)]);
        let trials = fetch_all(&mut source, 100, &ProgressBar::hidden());
        assert_eq!(trials.len(), 1);
        assert_eq!(source.tokens.len(), 1);
    }

    #[test]
    fn stops_and_truncates_at_max_trials() {
        let mut source = Scripted::new(vec![
            page(&["NCT1", "NCT2"], Some("t1")),
            page(&["NCT3", "NCT4"], Some("t2")),
            page(&["NCT5"], None),
        ]);
        let trials = fetch_all(&mut source, 3, &ProgressBar::hidden());
        assert_eq!(trials.len(), 3);
        assert_eq!(source.tokens.len(), 2);
        assert_eq!(trials[2].text("/protocolSection/identificationModule/nctId"), "NCT3");
    }

    #[test]
    fn failure_keeps_accumulated_trials() {
        let mut source = Scripted::new(vec![
            page(&["NCT1", "NCT2"], Some("t1")),
            Err(HttpError::Status {
                status: 500,
                message: "Internal Server Error".into(),
            }),
        ]);
        let trials = fetch_all(&mut source, 100, &ProgressBar::hidden());
        assert_eq!(trials.len(), 2);
    }

    #[test]
    fn failure_on_first_page_yields_nothing() {
        let mut source = Scripted::new(vec![Err(HttpError::Transport("refused".into()))]);
        assert!(fetch_all(&mut source, 100, &ProgressBar::hidden()).is_empty());
    }

    #[test]
    fn page_parses_registry_shape() {
        let body = r#"{"studies": [{"protocolSection": {}}], "nextPageToken": "abc"}"#;
        let page: Page = serde_json::from_str(body).unwrap();
        assert_eq!(page.studies.len(), 1);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let last: Page = serde_json::from_str("{}").unwrap();
        assert!(last.studies.is_empty());
        assert!(last.next_page_token.is_none());
    }

    #[test]
    fn query_carries_token_only_when_present() {
        let client = RegistryClient::new(&Config::default());
        let first = client.query(None);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0], ("query.term", "triple-negative breast cancer".to_string()));
        assert_eq!(first[1], ("pageSize", "100".to_string()));

        let next = client.query(Some("tok"));
        assert_eq!(next[2], ("pageToken", "tok".to_string()));
    }

    #[test]
    fn raw_trial_accessors_default_when_absent() {
        let raw = RawTrial(json!({"a": {"b": "x", "n": 3, "l": [1, 2]}}));
        assert_eq!(raw.text("/a/b"), "x");
        assert_eq!(raw.text("/a/n"), "");
        assert_eq!(raw.text("/missing"), "");
        assert_eq!(raw.list("/a/l").len(), 2);
        assert!(raw.list("/a/b").is_empty());
    }
}
