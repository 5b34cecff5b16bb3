//! Web actions: search and site-open URL construction.

use command_core::{ActionExecutor, ActionOutcome, PipelineError};
use std::collections::HashMap;
use tracing::info;
use url::Url;

const SEARCH_BASE: &str = "https://www.google.com/search";

pub struct WebExecutor {
    last_url: Option<Url>,
}

impl WebExecutor {
    pub fn new() -> Self {
        Self { last_url: None }
    }

    pub fn last_url(&self) -> Option<&Url> {
        self.last_url.as_ref()
    }

    fn search_url(query: &str) -> Result<Url, PipelineError> {
        let mut url =
            Url::parse(SEARCH_BASE).map_err(|e| PipelineError::ExecutorFailure(e.to_string()))?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }

    fn site_url(target: &str) -> Result<Url, PipelineError> {
        // "youtube" becomes youtube.com; a spec with a dot is taken as given.
        let host = if target.contains('.') {
            target.to_string()
        } else {
            format!("{target}.com")
        };
        Url::parse(&format!("https://{host}/"))
            .map_err(|e| PipelineError::ExecutorFailure(e.to_string()))
    }
}

impl Default for WebExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for WebExecutor {
    fn name(&self) -> &'static str {
        "web"
    }

    fn execute(
        &mut self,
        slots: &HashMap<String, String>,
    ) -> Result<ActionOutcome, PipelineError> {
        let target = slots
            .get("target")
            .map(String::as_str)
            .ok_or_else(|| PipelineError::IncompleteSlots {
                slot: "target".to_string(),
            })?;
        let action = slots.get("action").map(String::as_str).unwrap_or("search");

        let (url, message) = match action {
            "open" => (
                Self::site_url(target)?,
                format!("Opening {target} in the browser."),
            ),
            _ => (
                Self::search_url(target)?,
                format!("Searching the web for {target}."),
            ),
        };
        info!(%url, "browser navigation prepared");
        self.last_url = Some(url);
        Ok(ActionOutcome::ok(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn search_builds_an_encoded_query_url() {
        let mut exec = WebExecutor::new();
        let outcome = match exec.execute(&slots(&[
            ("target", "rust workspaces"),
            ("action", "search"),
        ])) {
            Ok(o) => o,
            Err(e) => panic!("execute failed: {e}"),
        };
        assert!(outcome.success);
        let url = match exec.last_url() {
            Some(u) => u.as_str(),
            None => panic!("no url recorded"),
        };
        assert_eq!(url, "https://www.google.com/search?q=rust+workspaces");
    }

    #[test]
    fn open_completes_a_bare_site_name() {
        let mut exec = WebExecutor::new();
        let outcome = match exec.execute(&slots(&[("target", "youtube"), ("action", "open")])) {
            Ok(o) => o,
            Err(e) => panic!("execute failed: {e}"),
        };
        assert!(outcome.success);
        assert_eq!(
            exec.last_url().map(|u| u.as_str()),
            Some("https://youtube.com/")
        );
    }
}
