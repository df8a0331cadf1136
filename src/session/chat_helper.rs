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

// Directive completion and highlighting for rustyline

use crate::session::chat::{COMMANDS, DIRECTIVE_MARKER};
use colored::*;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow::{self, Borrowed, Owned};

// Directives whose single argument is a file path
const FILE_ARGUMENT_COMMANDS: [&str; 3] = [
	crate::session::chat::SAVE_COMMAND,
	crate::session::chat::LOAD_COMMAND,
	crate::session::chat::SEND_COMMAND,
];

struct CommandCompleter {
	commands: Vec<String>,
}

impl CommandCompleter {
	fn new() -> Self {
		let commands = COMMANDS.iter().map(|&s| s.to_string()).collect();
		Self { commands }
	}

	/// Commands that extend what has been typed so far
	fn candidates(&self, line: &str) -> Vec<Pair> {
		if !line.starts_with(DIRECTIVE_MARKER) || line.contains(char::is_whitespace) {
			return vec![];
		}

		self.commands
			.iter()
			.filter(|cmd| cmd.starts_with(line))
			.map(|cmd| Pair {
				display: cmd.clone(),
				replacement: cmd.clone(),
			})
			.collect()
	}

	fn is_known_prefix(&self, line: &str) -> bool {
		let command = line.split_whitespace().next().unwrap_or("");
		self.commands
			.iter()
			.any(|cmd| cmd == command || (line == command && cmd.starts_with(command)))
	}
}

impl Hinter for CommandCompleter {
	type Hint = String;

	fn hint(&self, line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
		if line.len() < 2 {
			return None;
		}

		// Look for a command that starts with the current input
		self.candidates(line)
			.first()
			.map(|pair| pair.replacement[line.len()..].to_string())
	}
}

impl Highlighter for CommandCompleter {
	fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
		// Only directives are colored; plain messages stay as typed
		if line.starts_with(DIRECTIVE_MARKER) && self.is_known_prefix(line) {
			Owned(line.green().to_string())
		} else {
			Borrowed(line)
		}
	}

	fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
		true
	}

	fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
		// Make hints appear in dim gray color - like bash autocomplete
		Owned(hint.bright_black().to_string())
	}
}

// Helper for rustyline
pub struct CommandHelper {
	completer: CommandCompleter,
	files: FilenameCompleter,
	hinter: HistoryHinter,
}

impl CommandHelper {
	pub fn new() -> Self {
		Self {
			completer: CommandCompleter::new(),
			files: FilenameCompleter::new(),
			hinter: HistoryHinter {},
		}
	}
}

impl Default for CommandHelper {
	fn default() -> Self {
		Self::new()
	}
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
	type Candidate = Pair;

	fn complete(
		&self,
		line: &str,
		pos: usize,
		ctx: &rustyline::Context<'_>,
	) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
		// File names after :save, :load and :send
		let takes_file = FILE_ARGUMENT_COMMANDS
			.iter()
			.any(|cmd| line.starts_with(&format!("{} ", cmd)));
		if takes_file {
			return self.files.complete(line, pos, ctx);
		}

		Ok((0, self.completer.candidates(&line[..pos])))
	}
}

impl Hinter for CommandHelper {
	type Hint = String;

	fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
		if line.starts_with(DIRECTIVE_MARKER) {
			self.completer.hint(line, pos, ctx)
		} else {
			self.hinter.hint(line, pos, ctx)
		}
	}
}

impl Highlighter for CommandHelper {
	fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
		self.completer.highlight(line, pos)
	}

	fn highlight_char(&self, line: &str, pos: usize) -> bool {
		self.completer.highlight_char(line, pos)
	}

	fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
		self.completer.highlight_hint(hint)
	}
}

impl Validator for CommandHelper {}
