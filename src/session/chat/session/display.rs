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

// Session display functionality

use super::core::ChatSession;
use crate::session::chat::help_text;
use crate::session::{Message, Role};
use anyhow::Result;
use colored::*;
use std::io::Write;

/// Print a transcript, one `Role: content` block per message
pub fn print_messages<W: Write>(out: &mut W, messages: &[Message]) -> Result<()> {
	for msg in messages {
		let label = format!("{}:", msg.role.label());
		let label = match msg.role {
			Role::User => label.bright_blue(),
			Role::Assistant => label.bright_green(),
			Role::System => label.yellow(),
		};
		write!(out, "\n{} {}\n", label, msg.content)?;
	}
	out.flush()?;
	Ok(())
}

impl<W: Write> ChatSession<W> {
	pub(crate) fn display_welcome(&mut self) -> Result<()> {
		let banner = format!("\nWelcome to Terminal Chat (Model: {})", self.model());
		writeln!(self.out, "{}", banner.bright_cyan())?;
		self.display_help()
	}

	pub(crate) fn display_help(&mut self) -> Result<()> {
		write!(self.out, "{}", help_text())?;
		self.out.flush()?;
		Ok(())
	}

	pub(crate) fn display_transcript(&mut self) -> Result<()> {
		print_messages(&mut self.out, self.messages.snapshot())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_print_messages_layout() {
		colored::control::set_override(false);

		let mut out = Vec::new();
		print_messages(
			&mut out,
			&[Message::user("Hi"), Message::assistant("Hi there\nsecond line")],
		)
		.unwrap();

		assert_eq!(
			String::from_utf8(out).unwrap(),
			"\nUser: Hi\n\nAssistant: Hi there\nsecond line\n"
		);
	}
}
