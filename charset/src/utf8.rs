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

use crate::Codec;

/// UTF-8.
///
/// A sequence cut off by the end of the chunk is returned as the tail. Bytes
/// that can never start or continue a valid sequence are decoded one at a time
/// as their ISO-8859-1 code point, so a misconfigured server still produces
/// readable output instead of stalling the stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8;

impl Codec for Utf8 {
    fn name(&self) -> &'static str {
        "utf8"
    }

    fn proper_name(&self) -> &'static str {
        "UTF-8"
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> (String, &'a [u8]) {
        let mut text = String::with_capacity(bytes.len());
        let mut rest = bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    return (text, &[]);
                }
                Err(error) => {
                    let (valid, after) = rest.split_at(error.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match error.error_len() {
                        // Truncated sequence at the end of input
                        None => return (text, after),
                        Some(len) => {
                            text.extend(after[..len].iter().copied().map(char::from));
                            rest = &after[len..];
                        }
                    }
                }
            }
        }
    }

    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}
