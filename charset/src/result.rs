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

/// Result Type for Charset Operations
pub type CharsetResult<T> = Result<T, CharsetError>;

/// Errors raised by the codec registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharsetError {
    /// No codec is registered under the (normalized) name.
    UnknownEncoding(String),
    /// A codec with the same name is already registered.
    DuplicateEncoding(String),
}

impl std::error::Error for CharsetError {}

impl std::fmt::Display for CharsetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharsetError::UnknownEncoding(name) => {
                write!(f, "'{name}' isn't a valid encoding scheme, or it isn't loaded")
            }
            CharsetError::DuplicateEncoding(name) => {
                write!(f, "encoding '{name}' is already registered")
            }
        }
    }
}
