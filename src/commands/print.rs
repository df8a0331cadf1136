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

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use termchat::session::chat::print_messages;
use termchat::session::codec;

#[derive(Args, Debug)]
pub struct PrintArgs {
	/// Saved conversation to print
	#[arg(value_name = "FILE")]
	pub file: PathBuf,
}

/// Print a saved conversation as a transcript, without contacting any service
pub fn execute(args: &PrintArgs) -> Result<()> {
	let messages = codec::load_from_file(&args.file)?;
	let mut stdout = std::io::stdout().lock();
	print_messages(&mut stdout, &messages)
}

