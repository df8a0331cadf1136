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

use std::fs;
use std::path::Path;

use super::Config;
use crate::error::SessionError;

impl Config {
	/// Load configuration from the system-wide config file.
	/// A missing file yields the defaults; an unreadable or malformed one is fatal.
	pub fn load() -> Result<Self, SessionError> {
		let config_path = crate::directories::get_config_file_path()
			.map_err(|e| SessionError::startup(e.to_string()))?;
		Self::load_from(&config_path)
	}

	/// Load configuration from an explicit path
	pub fn load_from(config_path: &Path) -> Result<Self, SessionError> {
		if !config_path.exists() {
			return Ok(Self {
				config_path: Some(config_path.to_path_buf()),
				..Default::default()
			});
		}

		let config_str = fs::read_to_string(config_path).map_err(|e| {
			SessionError::startup(format!(
				"Failed to read config from {}: {}",
				config_path.display(),
				e
			))
		})?;

		let mut config: Config = toml::from_str(&config_str).map_err(|e| {
			SessionError::startup(format!(
				"Failed to parse TOML configuration {}: {}",
				config_path.display(),
				e
			))
		})?;

		// Store the config path for diagnostics
		config.config_path = Some(config_path.to_path_buf());

		Ok(config)
	}
}
