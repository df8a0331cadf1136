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

//! Conversation persistence.
//!
//! The on-disk document is a JSON array of `{"role": string, "content": string}`
//! objects, pretty-printed with two-space indentation and non-ASCII text kept
//! as-is. Decoding is all-or-nothing: either every element is valid and the
//! whole conversation is returned, or a `SchemaError` is.

use super::message::{Message, Role};
use crate::error::SessionError;
use crate::log_debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA_HINT: &str =
	"expected a list of objects with keys 'role' (string) and 'content' (string)";

/// Encode a conversation as a pretty-printed JSON document
pub fn encode(messages: &[Message]) -> Result<String, SessionError> {
	serde_json::to_string_pretty(messages)
		.map_err(|e| SessionError::schema(format!("Failed to encode conversation: {}", e)))
}

/// Parse and validate a JSON document into a conversation
pub fn decode(text: &str) -> Result<Vec<Message>, SessionError> {
	let value: Value = serde_json::from_str(text)
		.map_err(|e| SessionError::schema(format!("Invalid JSON: {}", e)))?;

	let elements = value.as_array().ok_or_else(|| {
		SessionError::schema(format!(
			"Invalid JSON schema: {}; top-level value is {}",
			SCHEMA_HINT,
			describe(&value)
		))
	})?;

	elements
		.iter()
		.enumerate()
		.map(|(index, element)| decode_message(index, element))
		.collect()
}

fn decode_message(index: usize, element: &Value) -> Result<Message, SessionError> {
	let object = element.as_object().ok_or_else(|| {
		SessionError::schema(format!(
			"Invalid JSON schema: {}; element {} is {}",
			SCHEMA_HINT,
			index,
			describe(element)
		))
	})?;

	let field = |key: &str| -> Result<&str, SessionError> {
		object.get(key).and_then(Value::as_str).ok_or_else(|| {
			SessionError::schema(format!(
				"Invalid JSON schema: {}; element {} has no string '{}'",
				SCHEMA_HINT, index, key
			))
		})
	};

	let role = field("role")?;
	let content = field("content")?;
	let role: Role = role.parse().map_err(|e| {
		SessionError::schema(format!("Invalid JSON schema: element {} has {}", index, e))
	})?;

	Ok(Message::new(role, content))
}

fn describe(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// Write the conversation to `path`.
///
/// The document goes to a sibling temporary file first and is renamed into
/// place, so an existing file is either fully replaced or left untouched.
pub fn save_to_file(path: &Path, messages: &[Message]) -> Result<(), SessionError> {
	let document = encode(messages)?;
	let temp_path = temporary_path(path);

	if let Err(e) = fs::write(&temp_path, document.as_bytes()) {
		let _ = fs::remove_file(&temp_path);
		return Err(SessionError::io(path, &e));
	}
	if let Err(e) = fs::rename(&temp_path, path) {
		let _ = fs::remove_file(&temp_path);
		return Err(SessionError::io(path, &e));
	}

	log_debug!("Wrote {} messages to {}", messages.len(), path.display());
	Ok(())
}

/// Read and decode a conversation file
pub fn load_from_file(path: &Path) -> Result<Vec<Message>, SessionError> {
	let text = read_text_file(path)?;
	let messages = decode(&text)?;
	log_debug!("Read {} messages from {}", messages.len(), path.display());
	Ok(messages)
}

/// Read a whole file as UTF-8 text
pub fn read_text_file(path: &Path) -> Result<String, SessionError> {
	fs::read_to_string(path).map_err(|e| SessionError::io(path, &e))
}

fn temporary_path(path: &Path) -> PathBuf {
	let file_name = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| "conversation".to_string());
	path.with_file_name(format!(".{}.tmp", file_name))
}
