// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// OpenAI-compatible streaming chat completions provider

use super::{FragmentStream, StreamingClient};
use crate::error::SessionError;
use crate::log_debug;
use crate::session::Message;
use eventsource_stream::Eventsource;
use futures::{future, Stream, StreamExt};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt::Display;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const DONE_MARKER: &str = "[DONE]";

/// Client for any service speaking the OpenAI chat completions protocol
/// (OpenAI itself, OpenRouter, local servers such as llama.cpp or vLLM).
pub struct OpenAiCompatibleProvider {
	api_key: String,
	base_url: String,
	http: Client,
}

impl OpenAiCompatibleProvider {
	pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			base_url: base_url.into(),
			http: Client::new(),
		}
	}

	pub fn endpoint(&self) -> String {
		format!(
			"{}{}",
			self.base_url.trim_end_matches('/'),
			CHAT_COMPLETIONS_PATH
		)
	}
}

#[async_trait::async_trait]
impl StreamingClient for OpenAiCompatibleProvider {
	fn name(&self) -> &str {
		"openai-compatible"
	}

	async fn exchange(
		&self,
		messages: &[Message],
		model: &str,
	) -> Result<FragmentStream, SessionError> {
		let request_body = serde_json::json!({
			"model": model,
			"messages": messages,
			"stream": true,
		});

		let url = self.endpoint();
		log_debug!("POST {} with {} messages", url, messages.len());

		let response = self
			.http
			.post(&url)
			.bearer_auth(&self.api_key)
			.header("Accept", "text/event-stream")
			.json(&request_body)
			.send()
			.await
			.map_err(classify_reqwest_error)?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(SessionError::transport(describe_http_error(status, &body)));
		}

		Ok(fragments_from_sse(response.bytes_stream()))
	}
}

/// One decoded `data:` payload
#[derive(Debug, PartialEq)]
enum Chunk {
	Fragment(String),
	Done,
}

/// Turn a server-sent-event byte stream into reply fragments, stopping at `[DONE]`
fn fragments_from_sse<S, B, E>(body: S) -> FragmentStream
where
	S: Stream<Item = Result<B, E>> + Send + 'static,
	B: AsRef<[u8]> + Send + 'static,
	E: Display + Send + 'static,
{
	let fragments = body
		.eventsource()
		.map(|event| match event {
			Ok(event) => parse_chunk(&event.data),
			Err(e) => Err(SessionError::transport(format!("Stream interrupted: {}", e))),
		})
		.take_while(|chunk| future::ready(!matches!(chunk, Ok(Chunk::Done))))
		.map(|chunk| {
			chunk.map(|chunk| match chunk {
				Chunk::Fragment(text) => text,
				Chunk::Done => String::new(),
			})
		});

	Box::pin(fragments)
}

/// Extract the incremental text from one streamed chunk.
/// A chunk without `choices[0].delta.content` (role-only deltas, usage
/// chunks, `null` content) is an empty fragment.
fn parse_chunk(data: &str) -> Result<Chunk, SessionError> {
	let trimmed = data.trim();
	if trimmed == DONE_MARKER {
		return Ok(Chunk::Done);
	}
	if trimmed.is_empty() {
		return Ok(Chunk::Fragment(String::new()));
	}

	let value: Value = serde_json::from_str(trimmed).map_err(|e| {
		SessionError::transport(format!("Failed to parse stream chunk: {}. Chunk: {}", e, trimmed))
	})?;

	if let Some(error) = value.get("error") {
		let message = error
			.get("message")
			.and_then(|m| m.as_str())
			.unwrap_or("Unknown error");
		return Err(SessionError::transport(format!(
			"Error in stream: {}",
			message
		)));
	}

	let content = value
		.get("choices")
		.and_then(|choices| choices.get(0))
		.and_then(|choice| choice.get("delta"))
		.and_then(|delta| delta.get("content"))
		.and_then(|content| content.as_str())
		.unwrap_or_default();

	Ok(Chunk::Fragment(content.to_string()))
}

fn describe_http_error(status: StatusCode, body: &str) -> String {
	let mut error_details = vec![format!("HTTP {}", status)];

	if let Ok(json) = serde_json::from_str::<Value>(body) {
		if let Some(error_obj) = json.get("error") {
			if let Some(msg) = error_obj.get("message").and_then(|m| m.as_str()) {
				error_details.push(format!("Message: {}", msg));
			}
			if let Some(code) = error_obj.get("code").and_then(|c| c.as_str()) {
				error_details.push(format!("Code: {}", code));
			}
			if let Some(type_) = error_obj.get("type").and_then(|t| t.as_str()) {
				error_details.push(format!("Type: {}", type_));
			}
		}
	}

	if error_details.len() == 1 && !body.trim().is_empty() {
		error_details.push(format!("Raw response: {}", body.trim()));
	}

	error_details.join(" | ")
}

fn classify_reqwest_error(e: reqwest::Error) -> SessionError {
	if e.is_timeout() {
		SessionError::transport(format!("Request timed out: {}", e))
	} else if e.is_connect() {
		SessionError::transport(format!("Connection failed: {}", e))
	} else {
		SessionError::transport(format!("Network error: {}", e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sse(chunks: &[&str]) -> FragmentStream {
		let body: Vec<Result<Vec<u8>, std::io::Error>> = chunks
			.iter()
			.map(|chunk| Ok(chunk.as_bytes().to_vec()))
			.collect();
		fragments_from_sse(futures::stream::iter(body))
	}

	#[test]
	fn test_parse_chunk_extracts_delta_content() {
		let chunk = r#"{"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#;
		assert_eq!(parse_chunk(chunk).unwrap(), Chunk::Fragment("Hel".to_string()));
	}

	#[test]
	fn test_parse_chunk_missing_content_is_empty_fragment() {
		let chunks = [
			r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#,
			r#"{"choices":[{"index":0,"delta":{"content":null},"finish_reason":"stop"}]}"#,
			r#"{"choices":[],"usage":{"prompt_tokens":3}}"#,
			"",
		];
		for chunk in chunks {
			assert_eq!(parse_chunk(chunk).unwrap(), Chunk::Fragment(String::new()));
		}
	}

	#[test]
	fn test_parse_chunk_done_and_errors() {
		assert_eq!(parse_chunk(" [DONE] ").unwrap(), Chunk::Done);

		let err = parse_chunk(r#"{"error":{"message":"overloaded"}}"#).unwrap_err();
		assert!(err.is_transport());
		assert!(err.to_string().contains("overloaded"));

		assert!(parse_chunk("{not json").unwrap_err().is_transport());
	}

	#[test]
	fn test_describe_http_error() {
		let body = r#"{"error":{"message":"Invalid API key","type":"auth_error","code":"invalid_key"}}"#;
		let described = describe_http_error(StatusCode::UNAUTHORIZED, body);
		assert_eq!(
			described,
			"HTTP 401 Unauthorized | Message: Invalid API key | Code: invalid_key | Type: auth_error"
		);

		let described = describe_http_error(StatusCode::BAD_GATEWAY, "upstream down");
		assert_eq!(described, "HTTP 502 Bad Gateway | Raw response: upstream down");
	}

	#[test]
	fn test_endpoint_joins_base_url() {
		let provider = OpenAiCompatibleProvider::new("key", "https://api.example.com/v1/");
		assert_eq!(provider.endpoint(), "https://api.example.com/v1/chat/completions");

		let provider = OpenAiCompatibleProvider::new("key", "http://localhost:8080/v1");
		assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
	}

	#[tokio::test]
	async fn test_sse_stream_yields_fragments_until_done() {
		let stream = sse(&[
			"data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
			"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: {\"choices\":[{\"delta\":",
			"{\"content\":\" there\"}}]}\n\n",
			"data: [DONE]\n\n",
			"data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n",
		]);

		let fragments: Vec<String> = stream.map(|item| item.unwrap()).collect().await;
		assert_eq!(fragments, vec!["", "Hi", " there"]);
	}

	#[tokio::test]
	async fn test_sse_stream_surfaces_error_chunk() {
		let stream = sse(&[
			"data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n\n",
			"data: {\"error\":{\"message\":\"rate limited\"}}\n\n",
		]);

		let items: Vec<Result<String, SessionError>> = stream.collect().await;
		assert_eq!(items.len(), 2);
		assert_eq!(items[0].as_ref().unwrap(), "partial");
		assert!(items[1].as_ref().unwrap_err().is_transport());
	}
}
