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

use crate::TelnetOption;
use bytes::Bytes;

///
/// One unit of the telnet stream after framing.
///
/// `IAC IAC` arrives as a one byte [`TelnetFrame::Data`] run, `GA`, `NOP`
/// and `EOR` are swallowed by the framer and never become frames.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TelnetFrame {
    /// A run of application bytes with no telnet commands in it.
    Data(Bytes),
    /// `IAC DO <option>`
    Do(TelnetOption),
    /// `IAC DONT <option>`
    Dont(TelnetOption),
    /// `IAC WILL <option>`
    Will(TelnetOption),
    /// `IAC WONT <option>`
    Wont(TelnetOption),
    /// `IAC SB <option> <payload> IAC SE` with `IAC IAC` already unescaped.
    Subnegotiate(TelnetOption, Bytes),
}

impl TelnetFrame {
    /// The option a negotiation or subnegotiation frame refers to.
    pub fn option(&self) -> Option<TelnetOption> {
        match self {
            TelnetFrame::Data(_) => None,
            TelnetFrame::Do(option)
            | TelnetFrame::Dont(option)
            | TelnetFrame::Will(option)
            | TelnetFrame::Wont(option)
            | TelnetFrame::Subnegotiate(option, _) => Some(*option),
        }
    }
}
