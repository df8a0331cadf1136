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

// Chat directives and input classification

pub const DIRECTIVE_MARKER: char = ':';

// Chat commands
pub const SAVE_COMMAND: &str = ":save";
pub const LOAD_COMMAND: &str = ":load";
pub const SEND_COMMAND: &str = ":send";
pub const MULTILINE_COMMAND: &str = ":multiline";
pub const HELP_COMMAND: &str = ":help";
pub const QUIT_COMMAND: &str = ":quit";

// List of all available commands for autocomplete
pub const COMMANDS: [&str; 6] = [
	SAVE_COMMAND,
	LOAD_COMMAND,
	SEND_COMMAND,
	MULTILINE_COMMAND,
	HELP_COMMAND,
	QUIT_COMMAND,
];

/// A recognized directive with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	Save(String),
	Load(String),
	Send(String),
	Multiline,
	Help,
	Quit,
	/// Unrecognized name or wrong number of arguments
	Unknown(String),
}

/// Classification of one line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
	/// Nothing but whitespace
	Empty,
	/// Text to send to the model
	Message(String),
	Directive(Directive),
}

/// Classify a raw input line.
///
/// Command names match case-sensitively and each directive takes an exact
/// number of arguments; anything else starting with the marker is `Unknown`.
pub fn parse_input(raw: &str) -> Input {
	let input = raw.trim();
	if input.is_empty() {
		return Input::Empty;
	}
	if !input.starts_with(DIRECTIVE_MARKER) {
		return Input::Message(input.to_string());
	}

	let tokens: Vec<&str> = input.split_whitespace().collect();
	let (command, params) = match tokens.split_first() {
		Some((command, params)) => (*command, params),
		None => return Input::Empty,
	};

	let directive = match (command, params) {
		(SAVE_COMMAND, [file]) => Directive::Save(file.to_string()),
		(LOAD_COMMAND, [file]) => Directive::Load(file.to_string()),
		(SEND_COMMAND, [file]) => Directive::Send(file.to_string()),
		(MULTILINE_COMMAND, []) => Directive::Multiline,
		(HELP_COMMAND, []) => Directive::Help,
		(QUIT_COMMAND, []) => Directive::Quit,
		_ => Directive::Unknown(input.to_string()),
	};

	Input::Directive(directive)
}

/// Usage text shown by `:help` and after an unknown command
pub fn help_text() -> String {
	let rows = [
		(format!("{} <filename>", SAVE_COMMAND), "Save the conversation to <filename>"),
		(format!("{} <filename>", LOAD_COMMAND), "Load a conversation from <filename>"),
		(format!("{} <filename>", SEND_COMMAND), "Send the contents of <filename>"),
		(MULTILINE_COMMAND.to_string(), "Enter multiline input"),
		(HELP_COMMAND.to_string(), "Display help"),
		(QUIT_COMMAND.to_string(), "Exit the program"),
	];

	let mut text = String::from(
		"\nEnter a message to send to the model or use one of the following commands:\n",
	);
	for (usage, description) in rows {
		text.push_str(&format!("{:<18}{}\n", usage, description));
	}
	text
}
