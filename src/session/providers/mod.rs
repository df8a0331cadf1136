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

// Provider abstraction for streaming chat completions

use crate::error::SessionError;
use crate::session::Message;
use futures::Stream;
use std::pin::Pin;

pub mod openai;

pub use openai::OpenAiCompatibleProvider;

/// Lazy sequence of reply fragments in emission order.
///
/// The stream ending is the completion signal; an `Err` item is the failure
/// signal and nothing after it is read. An empty fragment carries no new text
/// and does not end the stream.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, SessionError>> + Send>>;

/// Trait that every completion backend implements
#[async_trait::async_trait]
pub trait StreamingClient: Send + Sync {
	/// Get the provider name (e.g., "openai-compatible")
	fn name(&self) -> &str;

	/// Start an exchange for the whole conversation so far.
	/// Errors returned here mean no fragment was ever produced.
	async fn exchange(
		&self,
		messages: &[Message],
		model: &str,
	) -> Result<FragmentStream, SessionError>;
}
