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

// Help and unknown command handlers

use super::super::core::{ChatSession, Flow};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

pub fn handle_help<W: Write>(session: &mut ChatSession<W>) -> Result<Flow> {
	session.display_help()?;
	Ok(Flow::Continue)
}

pub fn handle_unknown<W: Write>(session: &mut ChatSession<W>) -> Result<Flow> {
	writeln!(session.out, "{}", "Unknown command.".bright_red())?;
	session.display_help()?;
	Ok(Flow::Continue)
}
