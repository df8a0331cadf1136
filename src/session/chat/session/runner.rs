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

// Interactive session runner

use super::super::input::{LineSource, ReadLine, TerminalInput};
use super::super::USER_PROMPT;
use super::commands::process_input;
use super::core::{ChatSession, Flow};
use crate::config::SessionSettings;
use crate::directories;
use crate::error::SessionError;
use crate::session::providers::OpenAiCompatibleProvider;
use crate::{log_debug, log_error, log_info};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Drive the read/dispatch loop until quit, end of input or Ctrl+C at the
/// prompt. The input history is saved on the way out.
pub async fn run_interactive_session<W: Write>(
	session: &mut ChatSession<W>,
	lines: &mut dyn LineSource,
) -> Result<()> {
	session.display_welcome()?;

	loop {
		session.write_line("")?;

		let input = match lines.read_line(USER_PROMPT)? {
			ReadLine::Line(input) => input,
			ReadLine::EndOfInput => {
				log_debug!("End of input, leaving session");
				break;
			}
			ReadLine::Interrupted => {
				log_debug!("Interrupted at prompt, leaving session");
				break;
			}
		};

		if process_input(session, &input, lines).await? == Flow::Quit {
			break;
		}
	}

	if let Err(e) = lines.save_history() {
		log_error!("Failed to save input history: {}", e);
	}

	log_info!(
		"Session ended with {} messages",
		session.messages().len()
	);
	Ok(())
}

/// Build the terminal session from resolved settings and run it
pub async fn start_session(settings: SessionSettings) -> Result<()> {
	let history_file = match settings.history_file {
		Some(path) => Some(path),
		None => match directories::default_history_file() {
			Ok(path) => Some(path),
			Err(e) => {
				log_debug!("No default history file: {}", e);
				None
			}
		},
	};

	let client = OpenAiCompatibleProvider::new(settings.api_key, settings.base_url);
	log_info!("Using endpoint {}", client.endpoint());

	let mut lines = TerminalInput::new(history_file)?;

	// Ctrl+C while a reply streams abandons it; a second one before the
	// reply loop notices forces exit
	let interrupted = Arc::new(AtomicBool::new(false));
	let interrupted_clone = interrupted.clone();
	ctrlc::set_handler(move || {
		if interrupted_clone.load(Ordering::SeqCst) {
			println!("\n{}", "Forcing exit due to repeated Ctrl+C...".bright_red());
			std::process::exit(130);
		}
		interrupted_clone.store(true, Ordering::SeqCst);
	})
	.map_err(|e| SessionError::startup(format!("Failed to install Ctrl+C handler: {}", e)))?;

	let mut session = ChatSession::new(Box::new(client), settings.model, std::io::stdout())
		.with_interrupt_flag(interrupted);

	run_interactive_session(&mut session, &mut lines).await
}
