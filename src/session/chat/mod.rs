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

// Chat session module
pub mod commands;
mod input;
mod response;
mod session;

// Re-export main structures and functions
pub use commands::{
	help_text, parse_input, Directive, Input, COMMANDS, DIRECTIVE_MARKER, HELP_COMMAND,
	LOAD_COMMAND, MULTILINE_COMMAND, QUIT_COMMAND, SAVE_COMMAND, SEND_COMMAND,
};
pub use input::{LineSource, ReadLine, TerminalInput};
pub use response::TurnOutcome;
pub use session::{print_messages, process_input, ChatSession, Flow};

// Re-export the main run_interactive_session function
pub use session::{run_interactive_session, start_session};

// Prompts shown by the line source
pub const USER_PROMPT: &str = "User: ";
pub const MULTILINE_PROMPT: &str = "> ";
