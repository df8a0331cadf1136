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

// Load command handler

use super::super::core::{ChatSession, Flow};
use crate::log_info;
use crate::session::codec;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Replace the live conversation with a saved one. The current conversation
/// is kept as-is when the file cannot be read or decoded.
pub fn handle_load<W: Write>(session: &mut ChatSession<W>, file: &str) -> Result<Flow> {
	let loaded = match codec::load_from_file(Path::new(file)) {
		Ok(messages) => messages,
		Err(e) => {
			session.report_error(&e)?;
			return Ok(Flow::Continue);
		}
	};

	log_info!("Loaded {} messages from {}", loaded.len(), file);
	session.messages.replace_all(loaded);

	let notice = format!("Loaded conversation from {}", file);
	writeln!(session.out, "{}", notice.bright_green())?;
	session.display_transcript()?;
	Ok(Flow::Continue)
}
