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

// Typed errors surfaced by the conversation session engine

use std::path::Path;
use thiserror::Error;

/// Every error the session reports to the user carries one of these kinds.
///
/// The display form is always `<Kind>: <description>` so diagnostics name
/// the kind without callers having to format it themselves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
	/// Persisted conversation document does not match the expected shape
	#[error("SchemaError: {0}")]
	Schema(String),

	/// File access failure
	#[error("IOError: {0}")]
	Io(String),

	/// Streaming exchange with the completion service failed
	#[error("TransportError: {0}")]
	Transport(String),

	/// Required configuration missing or unreadable, fatal before the session starts
	#[error("StartupError: {0}")]
	Startup(String),
}

impl SessionError {
	pub fn schema(message: impl Into<String>) -> Self {
		Self::Schema(message.into())
	}

	pub fn transport(message: impl Into<String>) -> Self {
		Self::Transport(message.into())
	}

	pub fn startup(message: impl Into<String>) -> Self {
		Self::Startup(message.into())
	}

	/// IO error tied to the file it happened on
	pub fn io(path: &Path, err: &std::io::Error) -> Self {
		Self::Io(format!("{}: {}", path.display(), err))
	}

	pub fn is_schema(&self) -> bool {
		matches!(self, Self::Schema(_))
	}

	pub fn is_io(&self) -> bool {
		matches!(self, Self::Io(_))
	}

	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}
