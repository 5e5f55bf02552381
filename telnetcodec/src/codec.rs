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

use crate::{CodecError, TelnetFrame, TelnetOption, consts};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Splits a raw telnet byte stream into [`TelnetFrame`]s and writes frames
/// back with `IAC` escaping.
///
/// The framer holds no state of its own: the `BytesMut` handed to
/// [`Decoder::decode`] is the raw buffer. A command that is cut short stays
/// in that buffer untouched until more bytes arrive, so nothing is acted on
/// before it is complete.
#[derive(Clone, Copy, Debug, Default)]
pub struct TelnetCodec;

impl TelnetCodec {
    /// Creates a framer.
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use decafmud_telnetcodec::{TelnetCodec, TelnetFrame, TelnetOption};
    /// use tokio_util::codec::Decoder;
    ///
    /// let mut codec = TelnetCodec::new();
    /// let mut buf = BytesMut::from(&b"\xFF\xFD"[..]);
    /// assert_eq!(codec.decode(&mut buf).unwrap(), None);
    /// buf.extend_from_slice(b"\x18");
    /// assert_eq!(
    ///     codec.decode(&mut buf).unwrap(),
    ///     Some(TelnetFrame::Do(TelnetOption::TTYPE))
    /// );
    /// ```
    pub fn new() -> TelnetCodec {
        TelnetCodec
    }
}

/// Finds the end of a subnegotiation body starting right after `IAC SB`.
///
/// Returns the option, the unescaped payload and the number of bytes the
/// body occupies including the closing `IAC SE`, or `None` if the closing
/// pair has not arrived yet.
fn scan_subnegotiation(data: &[u8]) -> Option<(u8, BytesMut, usize)> {
    let (&option, body) = data.split_first()?;
    let mut payload = BytesMut::new();
    let mut pos = 0;
    loop {
        let offset = body[pos..].iter().position(|byte| *byte == consts::IAC)?;
        let iac = pos + offset;
        payload.put_slice(&body[pos..iac]);
        match *body.get(iac + 1)? {
            consts::SE => return Some((option, payload, iac + 3)),
            consts::IAC => payload.put_u8(consts::IAC),
            other => {
                payload.put_u8(consts::IAC);
                payload.put_u8(other);
            }
        }
        pos = iac + 2;
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetFrame;
    type Error = CodecError;

    /// Frames the next unit at the front of `src`.
    ///
    /// # Behavior
    ///
    /// - Plain bytes are returned as one [`TelnetFrame::Data`] run ending at
    ///   the next `IAC` or the end of the buffer.
    /// - `IAC IAC` is a one byte data run holding `0xFF`.
    /// - `IAC GA`, `IAC NOP` and `IAC EOR` are discarded.
    /// - `IAC DO|DONT|WILL|WONT <option>` become negotiation frames.
    /// - `IAC SB <option> ... IAC SE` becomes a subnegotiation frame. Inside
    ///   the payload `IAC IAC` is unescaped; any other `IAC <byte>` pair is
    ///   kept as is.
    /// - `IAC` followed by anything else drops the `IAC` alone; the next
    ///   byte is framed as ordinary data.
    ///
    /// Returns `Ok(None)` when `src` is empty or starts with an incomplete
    /// command, which is then left in `src` as is.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetFrame>, Self::Error> {
        loop {
            let Some(&first) = src.first() else {
                return Ok(None);
            };
            if first != consts::IAC {
                let run = src
                    .iter()
                    .position(|byte| *byte == consts::IAC)
                    .unwrap_or(src.len());
                return Ok(Some(TelnetFrame::Data(src.split_to(run).freeze())));
            }

            let Some(&command) = src.get(1) else {
                return Ok(None);
            };
            match command {
                consts::IAC => {
                    src.advance(2);
                    return Ok(Some(TelnetFrame::Data(Bytes::from_static(&[consts::IAC]))));
                }
                consts::GA | consts::NOP | consts::EOR => {
                    src.advance(2);
                }
                consts::DO | consts::DONT | consts::WILL | consts::WONT => {
                    let Some(&code) = src.get(2) else {
                        return Ok(None);
                    };
                    src.advance(3);
                    let option = TelnetOption::from_u8(code);
                    return Ok(Some(match command {
                        consts::DO => TelnetFrame::Do(option),
                        consts::DONT => TelnetFrame::Dont(option),
                        consts::WILL => TelnetFrame::Will(option),
                        _ => TelnetFrame::Wont(option),
                    }));
                }
                consts::SB => {
                    let Some((code, payload, used)) = scan_subnegotiation(&src[2..]) else {
                        return Ok(None);
                    };
                    src.advance(2 + used);
                    return Ok(Some(TelnetFrame::Subnegotiate(
                        TelnetOption::from_u8(code),
                        payload.freeze(),
                    )));
                }
                _ => {
                    trace!("Dropping IAC before unrecognized command {:#04X}", command);
                    src.advance(1);
                }
            }
        }
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Writes `item` to `dst`. Every `0xFF` inside data runs and
    /// subnegotiation payloads is doubled.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        write_frame(&item, dst);
        Ok(())
    }
}

/// Infallible core of the frame encoder.
pub(crate) fn write_frame(frame: &TelnetFrame, dst: &mut BytesMut) {
    match frame {
        TelnetFrame::Data(data) => {
            escape_into(data, dst);
        }
        TelnetFrame::Do(option) => {
            dst.reserve(3);
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::DO);
            dst.put_u8(option.to_u8());
        }
        TelnetFrame::Dont(option) => {
            dst.reserve(3);
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::DONT);
            dst.put_u8(option.to_u8());
        }
        TelnetFrame::Will(option) => {
            dst.reserve(3);
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::WILL);
            dst.put_u8(option.to_u8());
        }
        TelnetFrame::Wont(option) => {
            dst.reserve(3);
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::WONT);
            dst.put_u8(option.to_u8());
        }
        TelnetFrame::Subnegotiate(option, payload) => {
            dst.reserve(payload.len() + 5);
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::SB);
            dst.put_u8(option.to_u8());
            escape_into(payload, dst);
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::SE);
        }
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    /// Writes raw application bytes, doubling `0xFF`.
    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        escape_into(item, dst);
        Ok(())
    }
}

pub(crate) fn escape_into(data: &[u8], dst: &mut BytesMut) {
    dst.reserve(data.len());
    for chunk in data.split_inclusive(|byte| *byte == consts::IAC) {
        dst.put_slice(chunk);
        if chunk.last() == Some(&consts::IAC) {
            dst.put_u8(consts::IAC);
        }
    }
}
