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

use crate::{CharsetError, CharsetResult, Codec, Cp437, Iso88591, Iso885915, Utf8, normalize_name};
use tracing::debug;

/// Name of the codec every registry starts with active.
pub const DEFAULT_CODEC: &str = "iso88591";

/// An ordered set of codecs with exactly one active at a time.
///
/// Registration order is kept; it decides the tail of the CHARSET candidate
/// list and the search order when matching names offered by a peer.
#[derive(Debug)]
pub struct CodecRegistry {
    codecs: Vec<Box<dyn Codec>>,
    active: usize,
}

impl CodecRegistry {
    /// Creates a registry holding only the default ISO-8859-1 codec.
    pub fn new() -> CodecRegistry {
        CodecRegistry {
            codecs: vec![Box::new(Iso88591)],
            active: 0,
        }
    }

    /// Registers another codec.
    ///
    /// # Errors
    ///
    /// Returns [`CharsetError::DuplicateEncoding`] if a codec with the same
    /// name is already present.
    pub fn register<C: Codec + 'static>(&mut self, codec: C) -> CharsetResult<()> {
        if self.position(codec.name()).is_some() {
            return Err(CharsetError::DuplicateEncoding(codec.name().to_string()));
        }
        self.codecs.push(Box::new(codec));
        Ok(())
    }

    /// Looks up a codec by name. The name is normalized first, so `UTF-8`
    /// and `utf8` find the same codec.
    pub fn get(&self, name: &str) -> Option<&dyn Codec> {
        self.position(&normalize_name(name))
            .map(|index| self.codecs[index].as_ref())
    }

    /// Finds the codec matching a name exactly as offered by a peer, either
    /// by raw registry name or by proper name.
    pub fn find_offered(&self, offered: &str) -> Option<&dyn Codec> {
        self.codecs
            .iter()
            .find(|codec| codec.name() == offered || codec.proper_name() == offered)
            .map(|codec| codec.as_ref())
    }

    /// Finds the codec whose proper name matches.
    pub fn find_proper(&self, proper: &str) -> Option<&dyn Codec> {
        self.codecs
            .iter()
            .find(|codec| codec.proper_name() == proper)
            .map(|codec| codec.as_ref())
    }

    /// The currently selected codec.
    pub fn active(&self) -> &dyn Codec {
        self.codecs[self.active].as_ref()
    }

    /// Switches the active codec.
    ///
    /// # Errors
    ///
    /// Returns [`CharsetError::UnknownEncoding`] if nothing is registered
    /// under the normalized name. The active codec is left unchanged.
    pub fn set_active(&mut self, name: &str) -> CharsetResult<&dyn Codec> {
        let normalized = normalize_name(name);
        let index = self
            .position(&normalized)
            .ok_or(CharsetError::UnknownEncoding(normalized))?;
        self.active = index;
        debug!("Switching to character encoding: {}", self.codecs[index].name());
        Ok(self.codecs[index].as_ref())
    }

    /// Whether the active codec is [`DEFAULT_CODEC`].
    pub fn is_default_active(&self) -> bool {
        self.active().name() == DEFAULT_CODEC
    }

    /// Iterates over every registered codec in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Codec> {
        self.codecs.iter().map(|codec| codec.as_ref())
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Always false: the default codec cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.codecs.iter().position(|codec| codec.name() == name)
    }
}

impl Default for CodecRegistry {
    /// A registry with every built-in codec: ISO-8859-1 (active), UTF-8,
    /// CP437 and ISO-8859-15.
    fn default() -> Self {
        CodecRegistry {
            codecs: vec![
                Box::new(Iso88591),
                Box::new(Utf8),
                Box::new(Cp437),
                Box::new(Iso885915),
            ],
            active: 0,
        }
    }
}
