use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;
use crate::gateway::{ChatRequest, ChatResponse};
use crate::providers::http_errors::transport_error;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    // Missing key reads as zero choices, not a parse failure.
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Sends one chat-completion request and returns the first choice's reply.
/// Single attempt; transport failures are mapped to actionable messages and
/// never retried.
pub async fn chat(client: &Client, cfg: &Config, request: &ChatRequest) -> Result<ChatResponse, Error> {
    let api_url = cfg.api_url();
    let body = ChatCompletionRequest {
        model: &request.model,
        messages: vec![WireMessage {
            role: "user",
            content: &request.content,
        }],
    };
    debug!(
        api_url = %api_url,
        model = %request.model,
        content_len = request.content.len(),
        "sending chat completion request"
    );

    let response = client
        .post(api_url)
        .bearer_auth(&cfg.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %request.model,
                error = %err,
                "chat request failed"
            );
            transport_error(err, api_url, cfg.timeout_secs())
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let response_body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());
        warn!(
            api_url = %api_url,
            status = %status,
            response_body_len = response_body.len(),
            "chat endpoint returned non-success status"
        );
        return Err(Error::Api {
            status,
            body: response_body,
        });
    }

    let raw = response
        .text()
        .await
        .map_err(|err| transport_error(err, api_url, cfg.timeout_secs()))?;
    let reply = extract_reply(&raw)?;
    debug!(model = %request.model, reply_len = reply.len(), "received chat reply");
    Ok(ChatResponse { content: reply })
}

fn extract_reply(raw: &str) -> Result<String, Error> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(raw).map_err(|source| Error::ResponseParse { source })?;
    let first = parsed.choices.into_iter().next().ok_or(Error::EmptyResponse)?;
    Ok(first.message.content)
}
