use std::future::Future;
use std::pin::Pin;

use reqwest::Client;

use crate::config::Config;
use crate::error::Error;
use crate::providers;

/// A single chat turn: the model to use and the fully composed user content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub content: String,
}

impl ChatRequest {
    /// Composes the request content from the resolved template and the piped
    /// input: the template alone when the input is empty, otherwise both
    /// joined by a blank line.
    pub fn new(model: &str, template: &str, input: &str) -> Self {
        let content = if input.is_empty() {
            template.to_string()
        } else {
            format!("{template}\n\n{input}")
        };
        Self {
            model: model.to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: String,
}

pub type ChatFuture<'a> = Pin<Box<dyn Future<Output = Result<ChatResponse, Error>> + 'a>>;

/// Capability seam for the outbound chat call. The dispatcher only depends on
/// this trait, so it can run against an in-process stub in tests.
pub trait ChatGateway {
    fn send<'a>(&'a self, request: ChatRequest) -> ChatFuture<'a>;
}

pub struct HttpChatGateway<'a> {
    client: &'a Client,
    cfg: &'a Config,
}

impl<'a> HttpChatGateway<'a> {
    pub fn new(client: &'a Client, cfg: &'a Config) -> Self {
        Self { client, cfg }
    }
}

impl<'a> ChatGateway for HttpChatGateway<'a> {
    fn send<'b>(&'b self, request: ChatRequest) -> ChatFuture<'b> {
        Box::pin(async move { providers::openai::chat(self.client, self.cfg, &request).await })
    }
}

/// Runs one prompt through the gateway and returns the reply text.
pub async fn send_prompt(
    gateway: &impl ChatGateway,
    model: &str,
    template: &str,
    input: &str,
) -> Result<String, Error> {
    let response = gateway.send(ChatRequest::new(model, template, input)).await?;
    Ok(response.content)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{ChatFuture, ChatGateway, ChatRequest, ChatResponse, send_prompt};
    use crate::error::Error;

    #[test]
    fn request_joins_template_and_input_with_blank_line() {
        let request = ChatRequest::new("gpt-3.5-turbo", "Summarize:", "apple, banana");
        assert_eq!(request.content, "Summarize:\n\napple, banana");
        assert_eq!(request.model, "gpt-3.5-turbo");
    }

    #[test]
    fn request_uses_template_alone_for_empty_input() {
        let request = ChatRequest::new("gpt-3.5-turbo", "Hello", "");
        assert_eq!(request.content, "Hello");
    }

    enum StubOutcome {
        Ok(&'static str),
        Empty,
    }

    struct StubGateway {
        requests: RefCell<Vec<ChatRequest>>,
        outcome: StubOutcome,
    }

    impl StubGateway {
        fn ok(content: &'static str) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                outcome: StubOutcome::Ok(content),
            }
        }

        fn empty() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                outcome: StubOutcome::Empty,
            }
        }
    }

    impl ChatGateway for StubGateway {
        fn send<'a>(&'a self, request: ChatRequest) -> ChatFuture<'a> {
            self.requests.borrow_mut().push(request);
            let result = match self.outcome {
                StubOutcome::Ok(content) => Ok(ChatResponse {
                    content: content.to_string(),
                }),
                StubOutcome::Empty => Err(Error::EmptyResponse),
            };
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn send_prompt_passes_composed_request_and_returns_reply() {
        let gateway = StubGateway::ok("A fruit list");

        let reply = send_prompt(&gateway, "gpt-3.5-turbo", "Summarize:", "apple, banana")
            .await
            .expect("send_prompt should succeed");

        assert_eq!(reply, "A fruit list");
        let requests = gateway.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].content, "Summarize:\n\napple, banana");
        assert_eq!(requests[0].model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn send_prompt_preserves_gateway_errors() {
        let gateway = StubGateway::empty();

        let err = send_prompt(&gateway, "gpt-3.5-turbo", "Hello", "")
            .await
            .expect_err("send_prompt should fail");

        assert!(matches!(err, Error::EmptyResponse));
        assert_eq!(gateway.requests.borrow().len(), 1);
    }
}
