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

//! Error types for the ansicodec crate.

/// Result type alias for operations that may fail with an [`AnsiError`].
pub type AnsiResult<T> = Result<T, AnsiError>;

/// Errors raised while scanning terminal output.
///
/// None of these stop the interpreter. They are logged and the offending
/// input is skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AnsiError {
    /// An escape sequence ran past [`MAX_SEQUENCE_LENGTH`] (or
    /// [`MAX_OSC_LENGTH`] for OSC) without a terminator.
    ///
    /// [`MAX_SEQUENCE_LENGTH`]: crate::consts::MAX_SEQUENCE_LENGTH
    /// [`MAX_OSC_LENGTH`]: crate::consts::MAX_OSC_LENGTH
    SequenceTooLong {
        /// Byte position of the `ESC` that was dropped
        position: usize,
        /// The maximum allowed length
        max: usize,
    },

    /// A numeric parameter could not be read.
    InvalidParameter {
        /// The raw parameter text
        value: String,
        /// The command it belonged to
        command: char,
    },
}

impl std::fmt::Display for AnsiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnsiError::SequenceTooLong { position, max } => {
                write!(
                    f,
                    "Unterminated escape sequence at position {} (longer than {} bytes)",
                    position, max
                )
            }
            AnsiError::InvalidParameter { value, command } => {
                write!(f, "Invalid parameter '{}' for ESC [ {}", value, command)
            }
        }
    }
}

impl std::error::Error for AnsiError {}
