use crate::advisor::gemini_response::GeminiResponse;
use serde_json::json;
use tracing::{debug, warn};

pub async fn call_gemini(
    client: &reqwest::Client,
    api_key: &str,
    prompt: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    debug!("Prompt: \n{}", prompt);

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key={}",
        api_key
    );

    let body = json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    {
                        "text": prompt
                    }
                ]
            }
        ],
        "generationConfig": {
            "temperature": 0.7,
            "maxOutputTokens": 500
        }
    });

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if response.status().is_success() {
        let response: GeminiResponse = serde_json::from_str(&response.text().await?)?;
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or("Gemini returned no candidates")?;
        Ok(text)
    } else {
        warn!(
            "Gemini call failed with status: {} {}",
            response.status(),
            response.text().await?
        );
        Err("Gemini call failed".into())
    }
}
