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

//! MUD Server Data Protocol
//!
//! <https://tintin.mudhalla.net/protocols/msdp/>
//!
//! MSDP payloads are a flat run of `VAR name VAL value` pairs. A value may
//! open a nested table with `VAL TABLE_OPEN ... TABLE_CLOSE` or an array
//! with `VAL ARRAY_OPEN VAL a VAL b ARRAY_CLOSE`. Repeating `VAL` after one
//! `VAR` also builds a list. MSSP uses the same layout without nesting.

use crate::consts::msdp::{ARRAY_CLOSE, ARRAY_OPEN, TABLE_CLOSE, TABLE_OPEN, VAL, VAR};
use bytes::BufMut;

/// One MSDP value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MsdpValue {
    /// Plain text value
    String(String),
    /// Repeated values under one variable
    List(Vec<MsdpValue>),
    /// Nested table
    Table(MsdpTable),
}

impl MsdpValue {
    /// Shorthand for [`MsdpValue::String`].
    pub fn string<S: Into<String>>(value: S) -> MsdpValue {
        MsdpValue::String(value.into())
    }

    /// Text values carried by this value. A single string counts as a one
    /// element list; nested tables contribute nothing.
    ///
    /// ```
    /// use decafmud_telnetcodec::msdp::MsdpValue;
    ///
    /// assert_eq!(MsdpValue::string("LIST").strings(), vec!["LIST"]);
    /// ```
    pub fn strings(&self) -> Vec<&str> {
        match self {
            MsdpValue::String(value) => vec![value.as_str()],
            MsdpValue::List(values) => values
                .iter()
                .filter_map(|value| match value {
                    MsdpValue::String(value) => Some(value.as_str()),
                    _ => None,
                })
                .collect(),
            MsdpValue::Table(_) => Vec::new(),
        }
    }

    fn encode<T: BufMut>(&self, dst: &mut T) {
        match self {
            MsdpValue::String(value) => dst.put_slice(value.as_bytes()),
            MsdpValue::List(values) => {
                dst.put_u8(ARRAY_OPEN);
                for value in values {
                    dst.put_u8(VAL);
                    value.encode(dst);
                }
                dst.put_u8(ARRAY_CLOSE);
            }
            MsdpValue::Table(table) => {
                dst.put_u8(TABLE_OPEN);
                table.encode(dst);
                dst.put_u8(TABLE_CLOSE);
            }
        }
    }
}

impl std::fmt::Display for MsdpValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MsdpValue::String(value) => write!(f, "{:?}", value),
            MsdpValue::List(values) => {
                write!(f, "[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            MsdpValue::Table(table) => write!(f, "{}", table),
        }
    }
}

/// An ordered MSDP variable table.
///
/// Order of first appearance is kept so a table written back out matches
/// the order it was built in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MsdpTable(Vec<(String, MsdpValue)>);

impl MsdpTable {
    /// Creates an empty table.
    pub fn new() -> MsdpTable {
        MsdpTable::default()
    }

    /// Sets `key`, replacing any existing value in place.
    pub fn set<S: Into<String>>(&mut self, key: S, value: MsdpValue) {
        let key = key.into();
        match self.0.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    /// Adds `value` under `key`, turning an existing value into a list.
    pub fn append(&mut self, key: &str, value: MsdpValue) {
        match self.0.iter_mut().find(|(name, _)| name == key) {
            Some((_, MsdpValue::List(values))) => values.push(value),
            Some((_, slot)) => {
                let previous = std::mem::replace(slot, MsdpValue::List(Vec::new()));
                *slot = MsdpValue::List(vec![previous, value]);
            }
            None => self.0.push((key.to_string(), value)),
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&MsdpValue> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<MsdpValue> {
        let index = self.0.iter().position(|(name, _)| name == key)?;
        Some(self.0.remove(index).1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MsdpValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Writes the table body (`VAR`/`VAL` pairs, no enclosing markers).
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use decafmud_telnetcodec::msdp::{MsdpTable, MsdpValue};
    ///
    /// let mut table = MsdpTable::new();
    /// table.set("LIST", MsdpValue::string("COMMANDS"));
    /// let mut buf = BytesMut::new();
    /// table.encode(&mut buf);
    /// assert_eq!(&buf[..], b"\x01LIST\x02COMMANDS");
    /// ```
    pub fn encode<T: BufMut>(&self, dst: &mut T) {
        for (name, value) in &self.0 {
            dst.put_u8(VAR);
            dst.put_slice(name.as_bytes());
            match value {
                MsdpValue::List(values) => {
                    for value in values {
                        dst.put_u8(VAL);
                        value.encode(dst);
                    }
                }
                value => {
                    dst.put_u8(VAL);
                    value.encode(dst);
                }
            }
        }
    }

    /// Reads a payload into a table. Parsing stops quietly at the first byte
    /// that does not fit the layout; whatever was read up to that point is
    /// returned.
    pub fn decode(payload: &[u8]) -> MsdpTable {
        let mut pos = 0;
        read_table(payload, &mut pos)
    }
}

impl std::fmt::Display for MsdpTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (name, value)) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl<S: Into<String>> FromIterator<(S, MsdpValue)> for MsdpTable {
    fn from_iter<I: IntoIterator<Item = (S, MsdpValue)>>(iter: I) -> Self {
        let mut table = MsdpTable::new();
        for (key, value) in iter {
            table.set(key, value);
        }
        table
    }
}

fn is_marker(byte: u8) -> bool {
    (VAR..=ARRAY_CLOSE).contains(&byte)
}

fn read_text(data: &[u8], pos: &mut usize) -> String {
    let start = *pos;
    let end = data[start..]
        .iter()
        .position(|byte| is_marker(*byte))
        .map_or(data.len(), |offset| start + offset);
    *pos = end;
    String::from_utf8_lossy(&data[start..end]).into_owned()
}

fn read_value(data: &[u8], pos: &mut usize) -> MsdpValue {
    match data.get(*pos) {
        Some(&TABLE_OPEN) => {
            *pos += 1;
            MsdpValue::Table(read_table(data, pos))
        }
        Some(&ARRAY_OPEN) => {
            *pos += 1;
            MsdpValue::List(read_array(data, pos))
        }
        _ => MsdpValue::String(read_text(data, pos)),
    }
}

fn read_array(data: &[u8], pos: &mut usize) -> Vec<MsdpValue> {
    let mut values = Vec::new();
    while let Some(&byte) = data.get(*pos) {
        match byte {
            VAL => {
                *pos += 1;
                values.push(read_value(data, pos));
            }
            ARRAY_CLOSE => {
                *pos += 1;
                break;
            }
            _ => break,
        }
    }
    values
}

fn read_table(data: &[u8], pos: &mut usize) -> MsdpTable {
    let mut table = MsdpTable::new();
    let mut variable: Option<String> = None;
    while let Some(&byte) = data.get(*pos) {
        match byte {
            VAR => {
                *pos += 1;
                let name = read_text(data, pos);
                table.remove(&name);
                variable = Some(name);
            }
            TABLE_CLOSE => {
                *pos += 1;
                break;
            }
            _ => {
                let Some(name) = variable.as_deref() else {
                    // Values before any variable name: give up on the rest.
                    *pos = data.len();
                    break;
                };
                if byte != VAL {
                    break;
                }
                *pos += 1;
                let value = read_value(data, pos);
                table.append(name, value);
            }
        }
    }
    table
}
