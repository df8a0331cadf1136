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

// In-memory collaborators for session tests

use crate::error::SessionError;
use crate::session::chat::{ChatSession, LineSource, ReadLine};
use crate::session::providers::{FragmentStream, StreamingClient};
use crate::session::Message;
use anyhow::Result;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum Reply {
	Fragments(Vec<&'static str>),
	FailBefore(&'static str),
	FailAfter(Vec<&'static str>, &'static str),
	/// Emit the fragments, then never finish
	Stall(Vec<&'static str>),
}

/// Streaming client that plays back queued replies and records what it was
/// asked.
#[derive(Clone, Default)]
pub struct ScriptedClient {
	replies: Arc<Mutex<VecDeque<Reply>>>,
	calls: Arc<AtomicUsize>,
	seen: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl ScriptedClient {
	pub fn new(replies: Vec<Reply>) -> Self {
		Self {
			replies: Arc::new(Mutex::new(replies.into())),
			..Default::default()
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Conversations passed to each exchange, in call order
	pub fn seen(&self) -> Vec<Vec<Message>> {
		self.seen.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl StreamingClient for ScriptedClient {
	fn name(&self) -> &str {
		"scripted"
	}

	async fn exchange(
		&self,
		messages: &[Message],
		_model: &str,
	) -> Result<FragmentStream, SessionError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.seen.lock().unwrap().push(messages.to_vec());

		let reply = self
			.replies
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or(Reply::Fragments(Vec::new()));

		let ok = |fragments: Vec<&'static str>| {
			fragments
				.into_iter()
				.map(|f| Ok::<String, SessionError>(f.to_string()))
				.collect::<Vec<_>>()
		};

		let stream: FragmentStream = match reply {
			Reply::Fragments(fragments) => Box::pin(futures::stream::iter(ok(fragments))),
			Reply::FailBefore(message) => return Err(SessionError::transport(message)),
			Reply::FailAfter(fragments, message) => {
				let mut items = ok(fragments);
				items.push(Err(SessionError::transport(message)));
				Box::pin(futures::stream::iter(items))
			}
			Reply::Stall(fragments) => Box::pin(
				futures::stream::iter(ok(fragments)).chain(futures::stream::pending()),
			),
		};
		Ok(stream)
	}
}

/// Line source that plays back queued reads, then reports end of input
#[derive(Debug, Default)]
pub struct ScriptedLines {
	reads: VecDeque<ReadLine>,
	pub prompts: Vec<String>,
	pub history_saved: bool,
}

impl ScriptedLines {
	pub fn new(reads: Vec<ReadLine>) -> Self {
		Self {
			reads: reads.into(),
			..Default::default()
		}
	}

	pub fn lines(lines: &[&str]) -> Self {
		Self::new(
			lines
				.iter()
				.map(|line| ReadLine::Line(line.to_string()))
				.collect(),
		)
	}
}

impl LineSource for ScriptedLines {
	fn read_line(&mut self, prompt: &str) -> Result<ReadLine> {
		self.prompts.push(prompt.to_string());
		Ok(self.reads.pop_front().unwrap_or(ReadLine::EndOfInput))
	}

	fn save_history(&mut self) -> Result<()> {
		self.history_saved = true;
		Ok(())
	}
}

/// Session writing into a buffer, colors off
pub fn buffered_session(client: &ScriptedClient) -> ChatSession<Vec<u8>> {
	colored::control::set_override(false);
	ChatSession::new(Box::new(client.clone()), "test-model", Vec::new())
}

pub fn output_of(session: &ChatSession<Vec<u8>>) -> String {
	String::from_utf8_lossy(session.output()).into_owned()
}
