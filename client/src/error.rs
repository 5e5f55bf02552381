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

//! Error types for the client session

use decafmud_telnetcodec::CodecError;
use thiserror::Error;

/// Result type for session operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Client session error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// I/O error reported by the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the telnet layer, such as an unknown encoding
    #[error("Protocol error: {0}")]
    Protocol(#[from] CodecError),

    /// The transport has not reported itself ready, or is not connected
    #[error("The socket isn't ready yet.")]
    TransportNotReady,

    /// Connecting gave up after the configured number of tries
    #[error("Unable to connect after {0} attempts")]
    ReconnectionFailed(u32),
}

impl ClientError {
    /// Check if the error is recoverable
    ///
    /// A usage fault such as [`ClientError::TransportNotReady`] is never worth
    /// retrying; transport I/O may succeed on another attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClientError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decafmud_charset::CharsetError;

    #[test]
    fn transport_not_ready_is_not_recoverable() {
        let err = ClientError::TransportNotReady;
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "The socket isn't ready yet.");
    }

    #[test]
    fn io_errors_convert_and_recover() {
        let err: ClientError =
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused").into();
        assert!(err.is_recoverable());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn codec_errors_convert() {
        let err: ClientError =
            CodecError::Charset(CharsetError::UnknownEncoding("koi8r".to_string())).into();
        assert!(matches!(err, ClientError::Protocol(_)));
        assert!(err.to_string().contains("koi8r"));
    }
}
