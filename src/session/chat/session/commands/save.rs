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

// Save command handler

use super::super::core::{ChatSession, Flow};
use crate::log_info;
use crate::session::codec;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

pub fn handle_save<W: Write>(session: &mut ChatSession<W>, file: &str) -> Result<Flow> {
	match codec::save_to_file(Path::new(file), session.messages.snapshot()) {
		Ok(()) => {
			log_info!("Saved {} messages to {}", session.messages.len(), file);
			let notice = format!("Conversation saved to {}", file);
			writeln!(session.out, "{}", notice.bright_green())?;
		}
		Err(e) => session.report_error(&e)?,
	}
	Ok(Flow::Continue)
}
