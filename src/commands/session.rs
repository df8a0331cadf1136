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

use clap::Args;
use std::path::PathBuf;
use termchat::config::{ConfigOverrides, LogLevel};

#[derive(Args, Debug, Default)]
pub struct SessionArgs {
	/// API key for the completion service
	#[arg(long, env = "TERMCHAT_API_KEY", hide_env_values = true)]
	pub api_key: Option<String>,

	/// Base URL of an OpenAI-compatible API, e.g. https://api.openai.com/v1
	#[arg(long, env = "TERMCHAT_BASE_URL")]
	pub base_url: Option<String>,

	/// Model identifier to chat with
	#[arg(long, env = "TERMCHAT_MODEL")]
	pub model: Option<String>,

	/// File that keeps the input line history (default: ~/.chat_history)
	#[arg(long)]
	pub history_file: Option<PathBuf>,

	/// Logging level: none, info or debug
	#[arg(long)]
	pub log_level: Option<LogLevel>,
}

impl SessionArgs {
	pub fn overrides(&self) -> ConfigOverrides {
		ConfigOverrides {
			api_key: self.api_key.clone(),
			base_url: self.base_url.clone(),
			model: self.model.clone(),
			history_file: self.history_file.clone(),
			log_level: self.log_level,
		}
	}
}
