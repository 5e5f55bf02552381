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

use crate::TelnetOption;
use decafmud_charset::CharsetError;

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Failures raised while framing, parsing option payloads or switching codecs.
///
/// None of these end a session: the engine traces them and carries on with
/// the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The stream underneath the framer failed.
    IOError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// The error's own description
        operation: String,
    },

    /// An option payload between `IAC SB` and `IAC SE` was unusable.
    SubnegotiationError {
        /// Option code the payload belonged to
        option: Option<u8>,
        /// What was wrong with it
        reason: SubnegotiationErrorKind,
    },

    /// The codec registry refused an encoding switch.
    Charset(CharsetError),
}

impl CodecError {
    /// Shorthand for a [`CodecError::SubnegotiationError`] tied to `option`.
    pub fn subnegotiation(option: TelnetOption, reason: SubnegotiationErrorKind) -> CodecError {
        CodecError::SubnegotiationError {
            option: Some(option.to_u8()),
            reason,
        }
    }

    /// The option the error concerns, when there is one.
    pub fn option(&self) -> Option<TelnetOption> {
        match self {
            CodecError::SubnegotiationError {
                option: Some(code), ..
            } => Some(TelnetOption::from(*code)),
            _ => None,
        }
    }
}

/// Why a subnegotiation payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubnegotiationErrorKind {
    /// Fewer bytes than the format needs.
    InsufficientData {
        /// Bytes the format needs
        required: usize,
        /// Bytes that arrived
        available: usize,
    },

    /// A terminator or separator never showed up.
    IncompleteData {
        /// What was missing
        description: String,
    },

    /// Well formed bytes carrying content that does not parse.
    InvalidPayload {
        /// Parser diagnostic
        description: String,
    },
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Charset(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::IOError { kind, operation } => {
                write!(f, "stream error ({:?}): {}", kind, operation)
            }
            CodecError::SubnegotiationError {
                option: Some(code),
                reason,
            } => write!(f, "bad {} subnegotiation: {}", TelnetOption::from(*code), reason),
            CodecError::SubnegotiationError { option: None, reason } => {
                write!(f, "bad subnegotiation: {}", reason)
            }
            CodecError::Charset(err) => write!(f, "{}", err),
        }
    }
}

impl std::fmt::Display for SubnegotiationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubnegotiationErrorKind::InsufficientData {
                required,
                available,
            } => write!(f, "need {} bytes, got {}", required, available),
            SubnegotiationErrorKind::IncompleteData { description } => {
                write!(f, "missing {}", description)
            }
            SubnegotiationErrorKind::InvalidPayload { description } => f.write_str(description),
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IOError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}

impl From<CharsetError> for CodecError {
    fn from(err: CharsetError) -> Self {
        CodecError::Charset(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subnegotiation_errors_name_their_option() {
        let err = CodecError::subnegotiation(
            TelnetOption::NAWS,
            SubnegotiationErrorKind::InsufficientData {
                required: 4,
                available: 2,
            },
        );
        assert_eq!(err.option(), Some(TelnetOption::NAWS));
        assert_eq!(err.to_string(), "bad NEGOTIATE-ABOUT-WINDOW-SIZE subnegotiation: need 4 bytes, got 2");
    }

    #[test]
    fn charset_errors_keep_their_source() {
        use std::error::Error;

        let err = CodecError::from(CharsetError::UnknownEncoding("koi8r".to_string()));
        assert!(err.option().is_none());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("koi8r"));
    }
}
