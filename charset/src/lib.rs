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

//! # DecafMUD Charset
//!
//! Stateless byte to text transforms used by the telnet engine to turn the
//! payload of a MUD connection into text, and typed input back into bytes.
//!
//! Every codec is a pure `{name, proper name, decode, encode}` value. `decode`
//! never fails: when the input ends in the middle of a multi-byte sequence the
//! decodable prefix is returned together with the undecoded tail, which the
//! caller prepends to the next chunk.
//!
//! ## Built-in codecs
//!
//! | Name        | Proper name   | Notes                                   |
//! |-------------|---------------|-----------------------------------------|
//! | `iso88591`  | `ISO-8859-1`  | identity, the default                   |
//! | `utf8`      | `UTF-8`       | carries partial sequences               |
//! | `cp437`     | `CP437`       | IBM PC glyphs for 0x00-0x1F, 0x80-0xFF  |
//! | `iso885915` | `ISO-8859-15` | eight substitutions over ISO-8859-1     |
//!
//! ## Example
//!
//! ```
//! use decafmud_charset::CodecRegistry;
//!
//! let mut registry = CodecRegistry::default();
//! registry.set_active("UTF-8").unwrap();
//!
//! let (text, tail) = registry.active().decode(b"caf\xC3");
//! assert_eq!(text, "caf");
//! assert_eq!(tail, b"\xC3");
//! ```

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_map_unit_fn,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

mod codec;
mod cp437;
mod latin;
mod registry;
mod result;
mod utf8;

pub use self::codec::{Codec, normalize_name};
pub use self::cp437::Cp437;
pub use self::latin::{Iso88591, Iso885915};
pub use self::registry::{CodecRegistry, DEFAULT_CODEC};
pub use self::result::{CharsetError, CharsetResult};
pub use self::utf8::Utf8;
