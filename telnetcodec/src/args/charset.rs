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

//! CHARSET [RFC2066](https://tools.ietf.org/html/rfc2066)

use crate::consts::charset::{ACCEPTED, REJECTED, REQUEST, TTABLE};
use crate::{CodecError, CodecResult, SubnegotiationErrorKind, TelnetOption};
use bytes::BufMut;

/// A CHARSET subnegotiation message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharsetMessage {
    /// Offer of character sets separated by `separator`.
    Request {
        /// Separator byte between names
        separator: u8,
        /// Offered names in preference order
        names: Vec<String>,
    },
    /// The peer picked one of our names.
    Accepted(String),
    /// The peer refused every name.
    Rejected,
    /// Translation table verbs and anything else.
    Other(u8),
}

impl CharsetMessage {
    /// Parses a payload.
    ///
    /// In a request, a leading `TTABLE <version>` marker is skipped since
    /// translation tables are not supported; the first remaining byte is the
    /// separator.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty payload.
    pub fn parse(payload: &[u8]) -> CodecResult<CharsetMessage> {
        let Some((&verb, data)) = payload.split_first() else {
            return Err(CodecError::subnegotiation(
                TelnetOption::Charset,
                SubnegotiationErrorKind::InsufficientData {
                    required: 1,
                    available: 0,
                },
            ));
        };

        Ok(match verb {
            REQUEST => {
                let data = if data.starts_with(TTABLE) {
                    data.get(TTABLE.len() + 1..).unwrap_or_default()
                } else {
                    data
                };
                match data.split_first() {
                    Some((&separator, names)) => CharsetMessage::Request {
                        separator,
                        names: names
                            .split(|byte| *byte == separator)
                            .map(latin1)
                            .collect(),
                    },
                    None => CharsetMessage::Request {
                        separator: b' ',
                        names: Vec::new(),
                    },
                }
            }
            ACCEPTED => CharsetMessage::Accepted(latin1(data)),
            REJECTED => CharsetMessage::Rejected,
            other => CharsetMessage::Other(other),
        })
    }

    /// Writes the message body.
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use decafmud_telnetcodec::charset::CharsetMessage;
    ///
    /// let mut buf = BytesMut::new();
    /// CharsetMessage::Request {
    ///     separator: b' ',
    ///     names: vec!["UTF-8".into(), "ISO-8859-1".into()],
    /// }
    /// .encode(&mut buf);
    /// assert_eq!(&buf[..], b"\x01 UTF-8 ISO-8859-1");
    /// ```
    pub fn encode<T: BufMut>(&self, dst: &mut T) {
        match self {
            CharsetMessage::Request { separator, names } => {
                dst.put_u8(REQUEST);
                for name in names {
                    dst.put_u8(*separator);
                    dst.put_slice(name.as_bytes());
                }
            }
            CharsetMessage::Accepted(name) => {
                dst.put_u8(ACCEPTED);
                dst.put_slice(name.as_bytes());
            }
            CharsetMessage::Rejected => dst.put_u8(REJECTED),
            CharsetMessage::Other(verb) => dst.put_u8(*verb),
        }
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request() {
        assert_eq!(
            CharsetMessage::parse(b"\x01;UTF-8;ISO-8859-1").expect("parse"),
            CharsetMessage::Request {
                separator: b';',
                names: vec!["UTF-8".to_string(), "ISO-8859-1".to_string()],
            }
        );
    }

    #[test]
    fn parse_request_skips_ttable() {
        assert_eq!(
            CharsetMessage::parse(b"\x01TTABLE \x01 CP437").expect("parse"),
            CharsetMessage::Request {
                separator: b' ',
                names: vec!["CP437".to_string()],
            }
        );
    }

    #[test]
    fn parse_replies() {
        assert_eq!(
            CharsetMessage::parse(b"\x02UTF-8").expect("parse"),
            CharsetMessage::Accepted("UTF-8".to_string())
        );
        assert_eq!(CharsetMessage::parse(b"\x03").expect("parse"), CharsetMessage::Rejected);
        assert_eq!(CharsetMessage::parse(b"\x05").expect("parse"), CharsetMessage::Other(5));
        assert!(CharsetMessage::parse(b"").is_err());
    }
}
