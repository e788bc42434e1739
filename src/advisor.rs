/*!
Advice generation boundary.

The LLM is a black box behind `generate(prompt) -> text`. Any failure there
(missing key, timeout, HTTP error, malformed envelope) is swallowed and
replaced by a rule-based canned tip, so advice can never surface as an error
to the user. Responses are cached on disk for a short TTL to avoid paying for
identical prompts twice.
*/

mod api;
mod cache;
mod fallback;
mod gemini_response;
mod prompts;

pub use cache::AdviceCache;
pub use fallback::{goals_fallback, rule_based_advice};
pub use prompts::*;

use std::time::Duration;
use tracing::{info, warn};

use crate::advisor::api::call_gemini;

#[derive(Clone)]
pub struct Advisor {
    api_key: Option<String>,
    client: reqwest::Client,
    cache: AdviceCache,
}

impl Advisor {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = dotenv::var("GEMINI_API_KEY").ok();
        if api_key.is_none() {
            info!("GEMINI_API_KEY not set, advice runs on rule-based fallback only.");
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Advisor {
            api_key,
            client,
            cache: AdviceCache::new(),
        })
    }

    /// Raw LLM call. Callers inside this crate go through [`Advisor::advise`]
    /// instead, which adds the cache and the fallback.
    pub async fn generate(&self, prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
        let api_key = self.api_key.as_deref().ok_or("GEMINI_API_KEY not configured")?;
        call_gemini(&self.client, api_key, prompt).await
    }

    /// Cache -> LLM -> deterministic fallback. Never fails.
    pub async fn advise(&self, prompt: &str) -> String {
        if let Some(hit) = self.cache.get(prompt) {
            return hit;
        }
        match self.generate(prompt).await {
            Ok(text) => {
                self.cache.put(prompt, &text);
                text
            }
            Err(e) => {
                warn!("Advice generation failed, using rule-based fallback: {e}");
                rule_based_advice(prompt)
            }
        }
    }
}
