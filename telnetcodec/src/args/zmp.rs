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

//! Zenith MUD Protocol
//!
//! <http://discworld.starturtle.net/external/protocols/zmp.html>
//!
//! A ZMP message is a command name followed by zero or more arguments, each
//! field terminated by `NUL`.

use crate::{CodecError, CodecResult, SubnegotiationErrorKind, TelnetOption};
use bytes::BufMut;

/// A ZMP command with its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZmpMessage {
    /// Dotted command name, e.g. `zmp.ping`
    pub command: String,
    /// Arguments in order
    pub args: Vec<String>,
}

impl ZmpMessage {
    /// Creates a message.
    pub fn new<S: Into<String>>(command: S, args: Vec<String>) -> Self {
        ZmpMessage {
            command: command.into(),
            args,
        }
    }

    /// Parses a payload.
    ///
    /// # Errors
    ///
    /// A payload with no `NUL`, or whose first byte is `NUL`, has no command
    /// name and is rejected with `IncompleteData`.
    ///
    /// ```
    /// use decafmud_telnetcodec::zmp::ZmpMessage;
    ///
    /// let msg = ZmpMessage::parse(b"zmp.check\0color.\0").unwrap();
    /// assert_eq!(msg.command, "zmp.check");
    /// assert_eq!(msg.args, vec!["color.".to_string()]);
    /// ```
    pub fn parse(payload: &[u8]) -> CodecResult<ZmpMessage> {
        match payload.iter().position(|byte| *byte == 0) {
            Some(index) if index > 0 => {}
            _ => {
                return Err(CodecError::subnegotiation(
                    TelnetOption::ZMP,
                    SubnegotiationErrorKind::IncompleteData {
                        description: "NUL terminated command name".to_string(),
                    },
                ));
            }
        }

        let body = payload.strip_suffix(&[0]).unwrap_or(payload);
        let mut fields = body
            .split(|byte| *byte == 0)
            .map(|field| String::from_utf8_lossy(field).into_owned());
        let command = fields.next().unwrap_or_default();
        Ok(ZmpMessage {
            command,
            args: fields.collect(),
        })
    }

    /// Writes `command NUL arg NUL ... NUL`.
    pub fn encode<T: BufMut>(&self, dst: &mut T) {
        dst.put_slice(self.command.as_bytes());
        for arg in &self.args {
            dst.put_u8(0);
            dst.put_slice(arg.as_bytes());
        }
        dst.put_u8(0);
    }
}

impl std::fmt::Display for ZmpMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            write!(f, " {:?}", arg)?;
        }
        Ok(())
    }
}
