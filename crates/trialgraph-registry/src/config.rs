//! Registry fetch configuration

/// Runtime configuration for the registry fetch
#[derive(Debug, Clone)]
pub struct Config {
    /// `studies` endpoint of the ClinicalTrials.gov v2 API
    pub base_url: String,
    /// Value of the `query.term` parameter
    pub search_term: String,
    /// Stop once this many trials have been accumulated
    pub max_trials: usize,
    /// Value of the `pageSize` parameter
    pub page_size: usize,
    /// Retries per page for 429/5xx/transport failures
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://clinicaltrials.gov/api/v2/studies".to_string(),
            search_term: "triple-negative breast cancer".to_string(),
            max_trials: 2000,
            page_size: 100,
            max_retries: 3,
        }
    }
}
