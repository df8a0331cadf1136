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

// Session input processing - one module per directive

mod exit;
mod help;
mod load;
mod multiline;
mod save;
mod send;

use super::super::commands::{parse_input, Directive, Input};
use super::super::input::LineSource;
use super::core::{ChatSession, Flow};
use crate::log_debug;
use anyhow::Result;
use std::io::Write;

/// Handle one line of user input: send it as a message or run the directive
/// it names.
///
/// Failures of the directive itself (unreadable file, bad transcript, broken
/// connection) are reported to the session output and never end the loop.
pub async fn process_input<W: Write>(
	session: &mut ChatSession<W>,
	raw: &str,
	lines: &mut dyn LineSource,
) -> Result<Flow> {
	let directive = match parse_input(raw) {
		Input::Empty => return Ok(Flow::Continue),
		Input::Message(body) => {
			session.send_message(body).await?;
			return Ok(Flow::Continue);
		}
		Input::Directive(directive) => directive,
	};

	log_debug!("Directive: {:?}", directive);

	match directive {
		Directive::Save(file) => save::handle_save(session, &file),
		Directive::Load(file) => load::handle_load(session, &file),
		Directive::Send(file) => send::handle_send(session, &file).await,
		Directive::Multiline => multiline::handle_multiline(session, lines).await,
		Directive::Help => help::handle_help(session),
		Directive::Quit => exit::handle_quit(),
		Directive::Unknown(_) => help::handle_unknown(session),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::chat::ReadLine;
	use crate::session::test_support::{
		buffered_session, output_of, Reply, ScriptedClient, ScriptedLines,
	};
	use crate::session::Message;
	use std::fs;
	use tempfile::TempDir;

	fn path_arg(dir: &TempDir, name: &str) -> String {
		dir.path().join(name).to_string_lossy().into_owned()
	}

	#[tokio::test]
	async fn test_empty_input_is_noop() {
		let client = ScriptedClient::new(vec![]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		for raw in ["", "   ", "\t\n"] {
			let flow = process_input(&mut session, raw, &mut lines).await.unwrap();
			assert_eq!(flow, Flow::Continue);
		}

		assert!(session.messages().is_empty());
		assert_eq!(client.calls(), 0);
		assert!(output_of(&session).is_empty());
	}

	#[tokio::test]
	async fn test_plain_text_is_sent_trimmed() {
		let client = ScriptedClient::new(vec![Reply::Fragments(vec!["Hi", " there"])]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		process_input(&mut session, "  Hi  ", &mut lines).await.unwrap();

		assert_eq!(
			session.messages().snapshot(),
			&[Message::user("Hi"), Message::assistant("Hi there")]
		);
	}

	#[tokio::test]
	async fn test_save_then_load_into_fresh_session() {
		let dir = TempDir::new().unwrap();
		let file = path_arg(&dir, "out.json");

		let client = ScriptedClient::new(vec![Reply::Fragments(vec!["Hi", " there"])]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();
		process_input(&mut session, "Hi", &mut lines).await.unwrap();
		process_input(&mut session, &format!(":save {}", file), &mut lines)
			.await
			.unwrap();
		assert!(output_of(&session).contains(&format!("Conversation saved to {}", file)));

		let fresh_client = ScriptedClient::new(vec![]);
		let mut fresh = buffered_session(&fresh_client);
		process_input(&mut fresh, &format!(":load {}", file), &mut lines)
			.await
			.unwrap();

		assert_eq!(
			fresh.messages().snapshot(),
			&[Message::user("Hi"), Message::assistant("Hi there")]
		);
		assert_eq!(fresh_client.calls(), 0);
		let output = output_of(&fresh);
		assert!(output.contains(&format!("Loaded conversation from {}", file)));
		assert!(output.contains("\nUser: Hi\n\nAssistant: Hi there\n"));
	}

	#[tokio::test]
	async fn test_failed_load_leaves_conversation_unchanged() {
		let dir = TempDir::new().unwrap();
		let bad = path_arg(&dir, "bad.json");
		fs::write(&bad, r#"[{"role": "user"}]"#).unwrap();
		let missing = path_arg(&dir, "missing.json");

		let client = ScriptedClient::new(vec![Reply::Fragments(vec!["pong"])]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();
		process_input(&mut session, "ping", &mut lines).await.unwrap();
		let before = session.messages().clone();

		process_input(&mut session, &format!(":load {}", bad), &mut lines)
			.await
			.unwrap();
		assert_eq!(session.messages(), &before);

		process_input(&mut session, &format!(":load {}", missing), &mut lines)
			.await
			.unwrap();
		assert_eq!(session.messages(), &before);

		let output = output_of(&session);
		assert!(output.contains("SchemaError:"));
		assert!(output.contains("IOError:"));
	}

	#[tokio::test]
	async fn test_wrong_arity_and_case_are_unknown() {
		let dir = TempDir::new().unwrap();
		let target = path_arg(&dir, "never.json");

		let client = ScriptedClient::new(vec![]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		for raw in [
			":save".to_string(),
			format!(":save {} extra", target),
			format!(":SAVE {}", target),
			":help me".to_string(),
			":bogus".to_string(),
		] {
			let flow = process_input(&mut session, &raw, &mut lines).await.unwrap();
			assert_eq!(flow, Flow::Continue);
		}

		assert!(!dir.path().join("never.json").exists());
		assert_eq!(output_of(&session).matches("Unknown command.").count(), 5);
		assert_eq!(client.calls(), 0);
	}

	#[tokio::test]
	async fn test_help_prints_usage() {
		let client = ScriptedClient::new(vec![]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		process_input(&mut session, ":help", &mut lines).await.unwrap();

		let output = output_of(&session);
		assert!(!output.contains("Unknown command."));
		for command in crate::session::chat::COMMANDS {
			assert!(output.contains(command), "help is missing {}", command);
		}
	}

	#[tokio::test]
	async fn test_send_uses_file_contents_verbatim() {
		let dir = TempDir::new().unwrap();
		let file = path_arg(&dir, "prompt.txt");
		fs::write(&file, "line one\nline two\n").unwrap();

		let client = ScriptedClient::new(vec![Reply::Fragments(vec!["ack"])]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		process_input(&mut session, &format!(":send {}", file), &mut lines)
			.await
			.unwrap();

		assert_eq!(
			session.messages().snapshot(),
			&[
				Message::user("line one\nline two\n"),
				Message::assistant("ack")
			]
		);
	}

	#[tokio::test]
	async fn test_send_missing_file_sends_nothing() {
		let dir = TempDir::new().unwrap();
		let file = path_arg(&dir, "absent.txt");

		let client = ScriptedClient::new(vec![]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		let flow = process_input(&mut session, &format!(":send {}", file), &mut lines)
			.await
			.unwrap();

		assert_eq!(flow, Flow::Continue);
		assert!(session.messages().is_empty());
		assert_eq!(client.calls(), 0);
		assert!(output_of(&session).contains("IOError:"));
	}

	#[tokio::test]
	async fn test_multiline_joins_lines() {
		let client = ScriptedClient::new(vec![Reply::Fragments(vec!["done"])]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::lines(&["first", "", "third"]);

		process_input(&mut session, ":multiline", &mut lines)
			.await
			.unwrap();

		assert_eq!(
			session.messages().snapshot(),
			&[Message::user("first\n\nthird"), Message::assistant("done")]
		);
		assert!(lines.prompts.iter().all(|p| p == "> "));
		assert!(output_of(&session).contains("Enter EOF on a blank line to finish input:"));
	}

	#[tokio::test]
	async fn test_multiline_empty_or_cancelled_sends_nothing() {
		let client = ScriptedClient::new(vec![]);
		let mut session = buffered_session(&client);

		let mut blank = ScriptedLines::lines(&["", "  "]);
		process_input(&mut session, ":multiline", &mut blank)
			.await
			.unwrap();

		let mut cancelled =
			ScriptedLines::new(vec![ReadLine::Line("draft".to_string()), ReadLine::Interrupted]);
		process_input(&mut session, ":multiline", &mut cancelled)
			.await
			.unwrap();

		assert!(session.messages().is_empty());
		assert_eq!(client.calls(), 0);
	}

	#[tokio::test]
	async fn test_quit_stops_loop() {
		let client = ScriptedClient::new(vec![]);
		let mut session = buffered_session(&client);
		let mut lines = ScriptedLines::default();

		let flow = process_input(&mut session, ":quit", &mut lines).await.unwrap();

		assert_eq!(flow, Flow::Quit);
	}
}
