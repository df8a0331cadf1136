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

// Multiline command handler

use super::super::super::input::LineSource;
use super::super::super::MULTILINE_PROMPT;
use super::super::core::{ChatSession, Flow};
use crate::log_debug;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

pub async fn handle_multiline<W: Write>(
	session: &mut ChatSession<W>,
	lines: &mut dyn LineSource,
) -> Result<Flow> {
	writeln!(
		session.out,
		"{}",
		"Enter EOF on a blank line to finish input:".bright_cyan()
	)?;
	session.out.flush()?;

	match lines.read_until_end_of_input(MULTILINE_PROMPT)? {
		Some(collected) => {
			session.send_message(collected.join("\n")).await?;
		}
		None => {
			log_debug!("Multiline input cancelled");
			writeln!(session.out, "{}", "Input cancelled.".yellow())?;
		}
	}
	Ok(Flow::Continue)
}
