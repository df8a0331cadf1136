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

// Streaming response processing

use crate::error::SessionError;
use crate::log_debug;
use crate::session::providers::StreamingClient;
use crate::session::Message;
use anyhow::Result;
use futures::StreamExt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// How a user turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
	/// The reply streamed to completion and was recorded
	Completed,
	/// The exchange failed; only the user message was recorded
	Failed,
	/// Ctrl+C during the reply; only the user message was recorded
	Interrupted,
	/// Nothing to send
	Skipped,
}

pub(crate) enum ReplyOutcome {
	Completed(String),
	Failed(SessionError),
	Interrupted,
}

// Resolves once the interrupt flag is raised
async fn wait_for_interrupt(flag: &AtomicBool) {
	while !flag.load(Ordering::SeqCst) {
		tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
	}
}

/// Run one exchange, echoing each fragment to `out` as it arrives and
/// concatenating them in order.
///
/// Only I/O failures on `out` are returned as errors; transport failures and
/// interrupts are outcomes.
pub(crate) async fn stream_reply<W: Write>(
	client: &dyn StreamingClient,
	messages: &[Message],
	model: &str,
	out: &mut W,
	interrupted: &AtomicBool,
) -> Result<ReplyOutcome> {
	interrupted.store(false, Ordering::SeqCst);
	log_debug!(
		"Requesting reply from {} (model: {}, messages: {})",
		client.name(),
		model,
		messages.len()
	);

	let started = tokio::select! {
		result = client.exchange(messages, model) => result,
		_ = wait_for_interrupt(interrupted) => {
			interrupted.store(false, Ordering::SeqCst);
			return Ok(ReplyOutcome::Interrupted);
		}
	};

	let mut stream = match started {
		Ok(stream) => stream,
		Err(err) => return Ok(ReplyOutcome::Failed(err)),
	};

	let mut reply = String::new();
	let mut fragments = 0usize;

	loop {
		let next = tokio::select! {
			item = stream.next() => item,
			_ = wait_for_interrupt(interrupted) => {
				interrupted.store(false, Ordering::SeqCst);
				log_debug!("Reply interrupted after {} fragments", fragments);
				return Ok(ReplyOutcome::Interrupted);
			}
		};

		match next {
			Some(Ok(fragment)) => {
				fragments += 1;
				if !fragment.is_empty() {
					write!(out, "{}", fragment)?;
					out.flush()?;
					reply.push_str(&fragment);
				}
			}
			Some(Err(err)) => {
				log_debug!("Reply failed after {} fragments", fragments);
				return Ok(ReplyOutcome::Failed(err));
			}
			None => break,
		}
	}

	log_debug!(
		"Reply complete: {} fragments, {} bytes",
		fragments,
		reply.len()
	);
	Ok(ReplyOutcome::Completed(reply))
}
