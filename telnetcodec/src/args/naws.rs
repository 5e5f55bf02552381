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

//! Negotiate About Window Size
//!

use crate::{CodecError, CodecResult, SubnegotiationErrorKind, TelnetOption};
use bytes::{Buf, BufMut};

/// Largest dimension expressible in two base 255 digits.
pub const MAX_DIMENSION: u16 = 255 * 255 + 254;

/// Terminal dimensions reported through NAWS.
///
/// # Format
///
/// Each dimension is sent as two bytes `high, low` with
/// `value = 255 * high + low`. Servers in the MUD world read the pair this
/// way, so the base stays 255 rather than the 256 of RFC 1073.
///
/// ```
/// use decafmud_telnetcodec::naws::WindowSize;
///
/// let size = WindowSize::new(80, 24);
/// assert_eq!(size.cols, 80);
/// assert_eq!(size.rows, 24);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of columns (characters) in the terminal window
    pub cols: u16,
    /// The number of rows (lines) in the terminal window
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Encoded payload length before `IAC` escaping. Always `4`.
    pub fn len(&self) -> usize {
        4
    }

    /// Always false; kept next to [`WindowSize::len`].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Writes `cols / 255, cols % 255, rows / 255, rows % 255`.
    /// Dimensions above [`MAX_DIMENSION`] are clamped.
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use decafmud_telnetcodec::naws::WindowSize;
    ///
    /// let mut buf = BytesMut::new();
    /// WindowSize::new(300, 24).encode(&mut buf);
    /// assert_eq!(&buf[..], &[1, 45, 0, 24]);
    /// ```
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> usize {
        for value in [self.cols, self.rows] {
            let value = value.min(MAX_DIMENSION);
            dst.put_u8((value / 255) as u8);
            dst.put_u8((value % 255) as u8);
        }
        4
    }

    /// Reads four bytes as two base 255 pairs.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::SubnegotiationError` with `InsufficientData` if
    /// fewer than 4 bytes are available in the buffer.
    pub fn decode<T: Buf>(src: &mut T) -> CodecResult<WindowSize> {
        if src.remaining() < 4 {
            return Err(CodecError::subnegotiation(
                TelnetOption::NAWS,
                SubnegotiationErrorKind::InsufficientData {
                    required: 4,
                    available: src.remaining(),
                },
            ));
        }
        let mut read = || u16::from(src.get_u8()) * 255 + u16::from(src.get_u8());
        let cols = read();
        let rows = read();
        Ok(WindowSize { cols, rows })
    }
}

impl Default for WindowSize {
    /// A standard 80x24 terminal.
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_small_dimensions() {
        let mut buf = BytesMut::new();
        assert_eq!(WindowSize::new(80, 24).encode(&mut buf), 4);
        assert_eq!(&buf[..], &[0, 80, 0, 24]);
    }

    #[test]
    fn encode_uses_base_255() {
        let mut buf = BytesMut::new();
        WindowSize::new(255, 510).encode(&mut buf);
        assert_eq!(&buf[..], &[1, 0, 2, 0]);
    }

    #[test]
    fn encode_clamps_oversize() {
        let mut buf = BytesMut::new();
        WindowSize::new(u16::MAX, 1).encode(&mut buf);
        assert_eq!(&buf[..], &[255, 254, 0, 1]);
    }

    #[test]
    fn decode_reverses_encode() {
        let mut buf = BytesMut::new();
        WindowSize::new(1000, 42).encode(&mut buf);
        assert_eq!(WindowSize::decode(&mut buf).expect("decode"), WindowSize::new(1000, 42));
    }

    #[test]
    fn decode_short_payload() {
        let mut buf = BytesMut::from(&[0u8, 80][..]);
        assert!(matches!(
            WindowSize::decode(&mut buf),
            Err(CodecError::SubnegotiationError {
                reason: SubnegotiationErrorKind::InsufficientData { available: 2, .. },
                ..
            })
        ));
    }
}
