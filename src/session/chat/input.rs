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

// User input handling module

use crate::session::chat_helper::CommandHelper;
use crate::{log_debug, log_info};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as RustylineConfig, EditMode, Editor};
use std::path::PathBuf;

/// Outcome of reading one line. End of input and Ctrl+C are ordinary
/// terminal conditions of the source, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
	Line(String),
	EndOfInput,
	Interrupted,
}

/// Where the session gets its input lines from
pub trait LineSource {
	fn read_line(&mut self, prompt: &str) -> Result<ReadLine>;

	/// Collect lines until end of input.
	/// Returns `None` when the user interrupts the entry instead.
	fn read_until_end_of_input(&mut self, prompt: &str) -> Result<Option<Vec<String>>> {
		let mut lines = Vec::new();
		loop {
			match self.read_line(prompt)? {
				ReadLine::Line(line) => lines.push(line),
				ReadLine::EndOfInput => return Ok(Some(lines)),
				ReadLine::Interrupted => return Ok(None),
			}
		}
	}

	/// Persist entered lines, if this source keeps a history
	fn save_history(&mut self) -> Result<()> {
		Ok(())
	}
}

/// Interactive terminal input with line editing, directive completion and
/// a persistent history file.
pub struct TerminalInput {
	editor: Editor<CommandHelper, DefaultHistory>,
	history_file: Option<PathBuf>,
}

impl TerminalInput {
	pub fn new(history_file: Option<PathBuf>) -> Result<Self> {
		// Configure rustyline
		let config = RustylineConfig::builder()
			.completion_type(CompletionType::List)
			.edit_mode(EditMode::Emacs)
			.auto_add_history(true) // Automatically add lines to history
			.bell_style(rustyline::config::BellStyle::None) // No bell
			.build();

		let mut editor = Editor::with_config(config)?;
		editor.set_helper(Some(CommandHelper::new()));

		// Best effort: a missing or unreadable history file just means an empty history
		if let Some(path) = &history_file {
			match editor.load_history(path) {
				Ok(()) => log_debug!("Loaded input history from {}", path.display()),
				Err(e) => log_debug!("No input history loaded from {}: {}", path.display(), e),
			}
		}

		Ok(Self {
			editor,
			history_file,
		})
	}
}

impl LineSource for TerminalInput {
	fn read_line(&mut self, prompt: &str) -> Result<ReadLine> {
		match self.editor.readline(prompt) {
			Ok(line) => Ok(ReadLine::Line(line)),
			// Ctrl+C
			Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
			// Ctrl+D
			Err(ReadlineError::Eof) => Ok(ReadLine::EndOfInput),
			Err(err) => Err(err.into()),
		}
	}

	fn save_history(&mut self) -> Result<()> {
		if let Some(path) = &self.history_file {
			self.editor.save_history(path)?;
			log_info!("Saved input history to {}", path.display());
		}
		Ok(())
	}
}
