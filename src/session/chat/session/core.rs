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

// Chat session implementation

use super::super::response::{stream_reply, ReplyOutcome, TurnOutcome};
use crate::error::SessionError;
use crate::session::providers::StreamingClient;
use crate::session::{Message, MessageStore};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// What the loop should do after an input line has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Quit,
}

/// One conversation with a completion service.
///
/// Owns the transcript, the client used for assistant turns and the sink all
/// user-visible output goes to.
pub struct ChatSession<W: Write> {
	pub(super) messages: MessageStore,
	client: Box<dyn StreamingClient>,
	model: String,
	pub(super) out: W,
	interrupted: Arc<AtomicBool>,
}

impl<W: Write> ChatSession<W> {
	pub fn new(client: Box<dyn StreamingClient>, model: impl Into<String>, out: W) -> Self {
		Self {
			messages: MessageStore::new(),
			client,
			model: model.into(),
			out,
			interrupted: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Share an interrupt flag (set from a Ctrl+C handler) with the session
	pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
		self.interrupted = flag;
		self
	}

	pub fn messages(&self) -> &MessageStore {
		&self.messages
	}

	pub fn model(&self) -> &str {
		&self.model
	}

	pub fn output(&self) -> &W {
		&self.out
	}

	/// Send one user message and stream the assistant's reply.
	///
	/// The user message is appended before the exchange starts and stays even
	/// if the exchange fails. The assistant message is appended only once the
	/// stream has finished normally.
	pub async fn send_message(&mut self, body: String) -> Result<TurnOutcome> {
		if body.trim().is_empty() {
			return Ok(TurnOutcome::Skipped);
		}

		self.messages.append(Message::user(body));

		write!(self.out, "\n{} ", "Assistant:".bright_green())?;
		self.out.flush()?;

		let reply = stream_reply(
			self.client.as_ref(),
			self.messages.snapshot(),
			&self.model,
			&mut self.out,
			&self.interrupted,
		)
		.await?;
		writeln!(self.out)?;

		let outcome = match reply {
			ReplyOutcome::Completed(text) => {
				self.messages.append(Message::assistant(text));
				TurnOutcome::Completed
			}
			ReplyOutcome::Failed(err) => {
				self.report_error(&err)?;
				TurnOutcome::Failed
			}
			ReplyOutcome::Interrupted => {
				writeln!(self.out, "{}", "Response interrupted.".yellow())?;
				TurnOutcome::Interrupted
			}
		};

		Ok(outcome)
	}

	/// Print a one-line diagnostic naming the error kind
	pub(crate) fn report_error(&mut self, err: &SessionError) -> Result<()> {
		writeln!(self.out, "{}", err.to_string().bright_red())?;
		Ok(())
	}

	pub(crate) fn write_line(&mut self, text: &str) -> Result<()> {
		writeln!(self.out, "{}", text)?;
		Ok(())
	}
}
