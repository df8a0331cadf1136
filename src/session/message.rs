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

// Conversation messages and the in-memory transcript

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	System,
	User,
	Assistant,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::System => "system",
			Role::User => "user",
			Role::Assistant => "assistant",
		}
	}

	/// Capitalized form used when printing a transcript
	pub fn label(&self) -> &'static str {
		match self {
			Role::System => "System",
			Role::User => "User",
			Role::Assistant => "Assistant",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"system" => Ok(Role::System),
			"user" => Ok(Role::User),
			"assistant" => Ok(Role::Assistant),
			other => Err(format!("unknown role '{}'", other)),
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
	pub role: Role,
	pub content: String,
}

impl Message {
	pub fn new(role: Role, content: impl Into<String>) -> Self {
		Self {
			role,
			content: content.into(),
		}
	}

	pub fn system(content: impl Into<String>) -> Self {
		Self::new(Role::System, content)
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self::new(Role::User, content)
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self::new(Role::Assistant, content)
	}
}

/// Ordered conversation owned by a single session.
///
/// The only mutations are appending a message and replacing the whole
/// transcript; readers get a borrowed slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageStore {
	messages: Vec<Message>,
}

impl MessageStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn append(&mut self, message: Message) {
		self.messages.push(message);
	}

	/// Install a new transcript, dropping the current one
	pub fn replace_all(&mut self, messages: Vec<Message>) {
		self.messages = messages;
	}

	pub fn snapshot(&self) -> &[Message] {
		&self.messages
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn last(&self) -> Option<&Message> {
		self.messages.last()
	}
}
