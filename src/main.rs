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

mod commands;

use clap::{Parser, Subcommand};
use commands::{PrintArgs, SessionArgs};
use termchat::config::{set_thread_config, Config};
use termchat::error::SessionError;
use termchat::{log_debug, log_error};

// Missing configuration is a usage problem, same status clap uses
const STARTUP_EXIT_CODE: i32 = 2;
const PRINT_FAILURE_EXIT_CODE: i32 = 1;

#[derive(Parser)]
#[command(name = "termchat")]
#[command(version)]
#[command(about = "Chat with an OpenAI-compatible model from your terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct TermchatArgs {
	#[command(subcommand)]
	command: Option<Commands>,

	#[command(flatten)]
	session: SessionArgs,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a saved conversation and exit
	Print(PrintArgs),
}

fn exit_on_startup_error(err: SessionError) -> ! {
	match err {
		SessionError::Startup(message) => log_error!("Error: {}", message),
		other => log_error!("Error: {}", other),
	}
	std::process::exit(STARTUP_EXIT_CODE);
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
	let args = TermchatArgs::parse();

	// Load configuration, then let flags and environment win
	let mut config = Config::load().unwrap_or_else(|e| exit_on_startup_error(e));
	config.apply_overrides(args.session.overrides());

	// Set the thread-local config for logging macros
	set_thread_config(&config);
	if let Some(path) = config.config_path() {
		log_debug!("Configuration file: {}", path.display());
	}

	if let Some(Commands::Print(print_args)) = &args.command {
		if let Err(e) = commands::print::execute(print_args) {
			log_error!("{}", e);
			std::process::exit(PRINT_FAILURE_EXIT_CODE);
		}
		return Ok(());
	}

	let settings = config
		.validate_required()
		.unwrap_or_else(|e| exit_on_startup_error(e));

	termchat::session::chat::start_session(settings).await
}
