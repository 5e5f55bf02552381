//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::{CodecError, CodecResult, SubnegotiationErrorKind, TelnetOption};
use bytes::BufMut;
use serde_json::Value;
use std::fmt;

///
/// GMCP (Generic Mud Communication Protocol) Message
///
/// Each message is a dotted package name optionally followed by one JSON
/// value. The package name ends at the first byte that is not a letter,
/// digit, `.` or `_`; that byte is skipped and the rest is parsed as JSON.
///
/// # Examples
///
/// ```text
/// Core.Hello {"client": "DecafMUD", "version": "0.9.0-alpha"}
/// Char.Vitals {"hp": 100, "maxhp": 120}
/// Core.Ping 42
/// ```
///
/// # References
///
/// - [GMCP Protocol Specification](https://tintin.mudhalla.net/protocols/gmcp/)
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmcpMessage {
    package: String,
    data: Option<Value>,
}

impl GmcpMessage {
    /// Creates a message carrying a JSON value.
    ///
    /// ```
    /// use decafmud_telnetcodec::gmcp::GmcpMessage;
    /// use serde_json::json;
    ///
    /// let msg = GmcpMessage::new("Core.Hello", json!({"client": "DecafMUD"}));
    /// assert_eq!(msg.to_string(), r#"Core.Hello {"client":"DecafMUD"}"#);
    /// ```
    pub fn new<S: Into<String>>(package: S, data: Value) -> Self {
        Self {
            package: package.into(),
            data: Some(data),
        }
    }

    /// Creates a message without data (command only).
    pub fn command<S: Into<String>>(package: S) -> Self {
        Self {
            package: package.into(),
            data: None,
        }
    }

    /// Parses a raw GMCP subnegotiation payload.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::SubnegotiationError` with `InvalidPayload` if the
    /// text after the package name is not valid JSON.
    ///
    /// ```
    /// use decafmud_telnetcodec::gmcp::GmcpMessage;
    ///
    /// let msg = GmcpMessage::parse(b"Core.Goodbye \"Shutting down\"").unwrap();
    /// assert_eq!(msg.package(), "Core.Goodbye");
    /// assert_eq!(msg.data().and_then(|v| v.as_str()), Some("Shutting down"));
    /// ```
    pub fn parse(bytes: &[u8]) -> CodecResult<Self> {
        let text = String::from_utf8_lossy(bytes);
        let end = text
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
            .unwrap_or(text.len());
        let package = text[..end].to_string();

        let mut rest = text[end..].chars();
        rest.next();
        let rest = rest.as_str();
        let data = if rest.is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(rest).map_err(|err| {
                    CodecError::subnegotiation(
                        TelnetOption::GMCP,
                        SubnegotiationErrorKind::InvalidPayload {
                            description: format!("{package}: {err}"),
                        },
                    )
                })?,
            )
        };
        Ok(Self { package, data })
    }

    /// Returns the package name.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the JSON data if present.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Checks if this message has data.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Writes `package[ json]` to `dst`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) {
        dst.put_slice(self.to_string().as_bytes());
    }

    /// Checks if the message is empty (has no package name).
    pub fn is_empty(&self) -> bool {
        self.package.is_empty()
    }
}

impl fmt::Display for GmcpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)?;
        if let Some(ref data) = self.data {
            write!(f, " {}", data)?;
        }
        Ok(())
    }
}
