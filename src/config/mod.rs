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

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use std::str::FromStr;

pub mod loading;


#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub enum LogLevel {
	#[default]
	#[serde(rename = "none")]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}
}

impl FromStr for LogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"none" => Ok(LogLevel::None),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			other => Err(format!(
				"Invalid log level '{}'. Valid levels are: none, info, debug",
				other
			)),
		}
	}
}

/// Persistent configuration, read from `config.toml` and then overridden
/// by environment variables and command-line flags.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
	#[serde(default)]
	pub log_level: LogLevel,

	// Access credential for the completion service
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,

	// Service endpoint base address, e.g. https://api.openai.com/v1
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,

	// Where interactive line history is kept (defaults to ~/.chat_history)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub history_file: Option<PathBuf>,

	#[serde(skip)]
	config_path: Option<PathBuf>,
}

/// Values supplied on the command line (or through their environment
/// fallbacks); each one that is set wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub api_key: Option<String>,
	pub base_url: Option<String>,
	pub model: Option<String>,
	pub history_file: Option<PathBuf>,
	pub log_level: Option<LogLevel>,
}

/// Everything the interactive session needs, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
	pub api_key: String,
	pub base_url: String,
	pub model: String,
	pub history_file: Option<PathBuf>,
}

impl Config {
	/// Get the global log level
	pub fn get_log_level(&self) -> LogLevel {
		self.log_level
	}

	/// Path the configuration was read from, if any
	pub fn config_path(&self) -> Option<&PathBuf> {
		self.config_path.as_ref()
	}

	pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
		if let Some(api_key) = overrides.api_key {
			self.api_key = Some(api_key);
		}
		if let Some(base_url) = overrides.base_url {
			self.base_url = Some(base_url);
		}
		if let Some(model) = overrides.model {
			self.model = Some(model);
		}
		if let Some(history_file) = overrides.history_file {
			self.history_file = Some(history_file);
		}
		if let Some(log_level) = overrides.log_level {
			self.log_level = log_level;
		}
	}

	/// Resolve the settings for an interactive session.
	/// Credential, endpoint and model are all required; empty strings count as missing.
	pub fn validate_required(&self) -> Result<SessionSettings, SessionError> {
		let non_empty = |value: &Option<String>| {
			value
				.as_deref()
				.map(str::trim)
				.filter(|v| !v.is_empty())
				.map(str::to_string)
		};

		match (
			non_empty(&self.api_key),
			non_empty(&self.base_url),
			non_empty(&self.model),
		) {
			(Some(api_key), Some(base_url), Some(model)) => Ok(SessionSettings {
				api_key,
				base_url,
				model,
				history_file: self.history_file.clone(),
			}),
			_ => Err(SessionError::startup(
				"--api-key, --base-url, and --model are required arguments",
			)),
		}
	}
}

// Logging macros for different log levels
// These macros automatically check the current log level and only print if appropriate

thread_local! {
	static CURRENT_CONFIG: RefCell<Option<Config>> = const { RefCell::new(None) };
}

/// Set the current config for the thread (to be used by logging macros)
pub fn set_thread_config(config: &Config) {
	CURRENT_CONFIG.with(|c| {
		*c.borrow_mut() = Some(config.clone());
	});
}

/// Get the current config for the thread
pub fn with_thread_config<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Config) -> R,
{
	CURRENT_CONFIG.with(|c| (*c.borrow()).as_ref().map(f))
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", $fmt.cyan());
			}
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", format!($fmt, $($arg),*).cyan());
			}
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", $fmt.bright_blue());
			}
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(should_log) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			if should_log {
				use colored::Colorize;
				println!("{}", format!($fmt, $($arg),*).bright_blue());
			}
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level (errors should always be shown)
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),*) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}
