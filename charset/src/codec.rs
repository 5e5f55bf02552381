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

/// A pure byte to text transform.
///
/// Codecs hold no mutable state. Anything a codec cannot finish decoding is
/// handed back to the caller as the undecoded tail, so the same codec value can
/// be shared by every connection.
pub trait Codec: Send + Sync {
    /// Internal registry name, lower case without dashes (e.g. `utf8`).
    fn name(&self) -> &'static str;

    /// Display name used on the wire during CHARSET negotiation (e.g. `UTF-8`).
    fn proper_name(&self) -> &'static str;

    /// Decodes `bytes` into text.
    ///
    /// # Returns
    ///
    /// A tuple of the decoded text and the trailing bytes that could not be
    /// decoded yet because they form an incomplete sequence. The tail must be
    /// prepended to the next chunk before decoding it.
    fn decode<'a>(&self, bytes: &'a [u8]) -> (String, &'a [u8]);

    /// Encodes `text` into bytes. Characters the codec cannot represent are
    /// replaced with `?`.
    fn encode(&self, text: &str) -> Vec<u8>;
}

impl std::fmt::Debug for dyn Codec + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Codec({})", self.name())
    }
}

/// Normalizes an encoding name into registry form by removing every `-` and
/// lowercasing the rest.
///
/// ```
/// use decafmud_charset::normalize_name;
///
/// assert_eq!(normalize_name("ISO-8859-15"), "iso885915");
/// assert_eq!(normalize_name("UTF-8"), "utf8");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_dashes_and_lowercases() {
        assert_eq!(normalize_name("UTF-8"), "utf8");
        assert_eq!(normalize_name("ISO-8859-1"), "iso88591");
        assert_eq!(normalize_name("CP437"), "cp437");
    }

    #[test]
    fn normalize_keeps_already_normal_names() {
        assert_eq!(normalize_name("iso885915"), "iso885915");
        assert_eq!(normalize_name(""), "");
    }
}
