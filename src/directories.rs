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

// Directory utilities for cross-platform data directory management

use anyhow::Result;
use std::path::PathBuf;

const HISTORY_FILE_NAME: &str = ".chat_history";

/// Get the system-wide data directory for termchat
///
/// This function returns the appropriate data directory based on the OS:
/// - macOS: ~/.local/share/termchat
/// - Linux: ~/.local/share/termchat (following XDG Base Directory specification)
/// - Windows: %LOCALAPPDATA%/termchat
///
/// Nothing is created on disk; termchat only ever reads from this location.
pub fn get_termchat_data_dir() -> Result<PathBuf> {
	let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;

	#[cfg(target_os = "windows")]
	let path = match dirs::data_local_dir() {
		Some(dir) => dir.join("termchat"),
		None => home.join("AppData").join("Local").join("termchat"),
	};

	#[cfg(not(target_os = "windows"))]
	let path = home.join(".local").join("share").join("termchat");

	Ok(path)
}

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
	Ok(get_termchat_data_dir()?.join("config"))
}

/// Get the default configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
	Ok(get_config_dir()?.join("config.toml"))
}

/// Default location of the interactive line history: `~/.chat_history`
pub fn default_history_file() -> Result<PathBuf> {
	let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
	Ok(home.join(HISTORY_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_file_path() {
		if let Ok(config_path) = get_config_file_path() {
			assert!(config_path.to_string_lossy().ends_with("config.toml"));
			assert!(config_path.to_string_lossy().contains("termchat"));
		}
	}

	#[test]
	fn test_default_history_file_name() {
		if let Ok(path) = default_history_file() {
			assert_eq!(path.file_name().unwrap(), HISTORY_FILE_NAME);
		}
	}
}
