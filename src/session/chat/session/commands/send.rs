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

// Send command handler

use super::super::core::{ChatSession, Flow};
use crate::log_debug;
use crate::session::codec;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub async fn handle_send<W: Write>(session: &mut ChatSession<W>, file: &str) -> Result<Flow> {
	let body = match codec::read_text_file(Path::new(file)) {
		Ok(text) => text,
		Err(e) => {
			session.report_error(&e)?;
			return Ok(Flow::Continue);
		}
	};

	log_debug!("Sending {} bytes from {}", body.len(), file);
	// File contents go out verbatim
	session.send_message(body).await?;
	Ok(Flow::Continue)
}
