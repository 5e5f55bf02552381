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

use crate::consts;
use std::collections::HashMap;

///
/// Telnet options a MUD client meets on the wire.
///
/// Only the options with a name in the debug vocabulary are listed; any
/// other code is carried as [`TelnetOption::Unknown`].
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::BINARY`] Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`consts::option::ECHO`] Echo [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SGA`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Status [RFC859](https://tools.ietf.org/html/rfc859)
    Status,
    /// [`consts::option::SNDLOC`] Send Location [RFC779](https://tools.ietf.org/html/rfc779)
    SendLocation,
    /// [`consts::option::TTYPE`] Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TTYPE,
    /// [`consts::option::EOR`] End of Record [RFC885](https://tools.ietf.org/html/rfc885)
    EOR,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    NAWS,
    /// [`consts::option::TSPEED`] Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    TSPEED,
    /// [`consts::option::LFLOW`] Remote Flow Control [RFC1372](https://tools.ietf.org/html/rfc1372)
    LFLOW,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    Linemode,
    /// [`consts::option::AUTH`] Authentication [RFC2941](https://tools.ietf.org/html/rfc2941)
    Authentication,
    /// [`consts::option::NEWENV`] New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    NewEnvironment,
    /// [`consts::option::CHARSET`] Charset [RFC2066](https://tools.ietf.org/html/rfc2066)
    Charset,
    /// [`consts::option::MSDP`] MUD Server Data Protocol [MSDP](https://tintin.mudhalla.net/protocols/msdp/)
    MSDP,
    /// [`consts::option::MSSP`] MUD Server Status Protocol [MSSP](https://tintin.mudhalla.net/protocols/mssp/)
    MSSP,
    /// [`consts::option::COMPRESS`] MUD Client Compression v1
    Compress1,
    /// [`consts::option::COMPRESS2`] MUD Client Compression v2 [MCCP](https://tintin.mudhalla.net/protocols/mccp/)
    Compress2,
    /// [`consts::option::MSP`] MUD Sound Protocol
    MSP,
    /// [`consts::option::MXP`] MUD eXtension Protocol
    MXP,
    /// [`consts::option::ZMP`] Zenith MUD Protocol
    ZMP,
    /// [`consts::option::CONQUEST`] Conquest proprietary extension
    Conquest,
    /// [`consts::option::ATCP`] Achaea Telnet Client Protocol
    ATCP,
    /// [`consts::option::GMCP`] Generic Mud Communication Protocol [GMCP](https://www.gammon.com.au/gmcp)
    GMCP,
    /// Unknown Option
    Unknown(u8),
}

impl TelnetOption {
    /// Option code on the wire.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::SendLocation => consts::option::SNDLOC,
            TelnetOption::TTYPE => consts::option::TTYPE,
            TelnetOption::EOR => consts::option::EOR,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::TSPEED => consts::option::TSPEED,
            TelnetOption::LFLOW => consts::option::LFLOW,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::Authentication => consts::option::AUTH,
            TelnetOption::NewEnvironment => consts::option::NEWENV,
            TelnetOption::Charset => consts::option::CHARSET,
            TelnetOption::MSDP => consts::option::MSDP,
            TelnetOption::MSSP => consts::option::MSSP,
            TelnetOption::Compress1 => consts::option::COMPRESS,
            TelnetOption::Compress2 => consts::option::COMPRESS2,
            TelnetOption::MSP => consts::option::MSP,
            TelnetOption::MXP => consts::option::MXP,
            TelnetOption::ZMP => consts::option::ZMP,
            TelnetOption::Conquest => consts::option::CONQUEST,
            TelnetOption::ATCP => consts::option::ATCP,
            TelnetOption::GMCP => consts::option::GMCP,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Maps a wire code to its option, falling back to [`TelnetOption::Unknown`].
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::SNDLOC => TelnetOption::SendLocation,
            consts::option::TTYPE => TelnetOption::TTYPE,
            consts::option::EOR => TelnetOption::EOR,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::TSPEED => TelnetOption::TSPEED,
            consts::option::LFLOW => TelnetOption::LFLOW,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::AUTH => TelnetOption::Authentication,
            consts::option::NEWENV => TelnetOption::NewEnvironment,
            consts::option::CHARSET => TelnetOption::Charset,
            consts::option::MSDP => TelnetOption::MSDP,
            consts::option::MSSP => TelnetOption::MSSP,
            consts::option::COMPRESS => TelnetOption::Compress1,
            consts::option::COMPRESS2 => TelnetOption::Compress2,
            consts::option::MSP => TelnetOption::MSP,
            consts::option::MXP => TelnetOption::MXP,
            consts::option::ZMP => TelnetOption::ZMP,
            consts::option::CONQUEST => TelnetOption::Conquest,
            consts::option::ATCP => TelnetOption::ATCP,
            consts::option::GMCP => TelnetOption::GMCP,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// Upper case name used in negotiation traces, or `None` for unknown codes.
    pub fn trace_name(&self) -> Option<&'static str> {
        Some(match self {
            TelnetOption::TransmitBinary => "TRANSMIT-BINARY",
            TelnetOption::Echo => "ECHO",
            TelnetOption::SuppressGoAhead => "SUPPRESS-GO-AHEAD",
            TelnetOption::Status => "STATUS",
            TelnetOption::SendLocation => "SEND-LOCATION",
            TelnetOption::TTYPE => "TERMINAL-TYPE",
            TelnetOption::EOR => "END-OF-RECORD",
            TelnetOption::NAWS => "NEGOTIATE-ABOUT-WINDOW-SIZE",
            TelnetOption::TSPEED => "TERMINAL-SPEED",
            TelnetOption::LFLOW => "REMOTE-FLOW-CONTROL",
            TelnetOption::Linemode => "LINEMODE",
            TelnetOption::Authentication => "AUTH",
            TelnetOption::NewEnvironment => "NEW-ENVIRON",
            TelnetOption::Charset => "CHARSET",
            TelnetOption::MSDP => "MSDP",
            TelnetOption::MSSP => "MSSP",
            TelnetOption::Compress1 => "COMPRESS",
            TelnetOption::Compress2 => "COMPRESSv2",
            TelnetOption::MSP => "MSP",
            TelnetOption::MXP => "MXP",
            TelnetOption::ZMP => "ZMP",
            TelnetOption::Conquest => "CONQUEST-PROPRIETARY",
            TelnetOption::ATCP => "ATCP",
            TelnetOption::GMCP => "GMCP",
            TelnetOption::Unknown(_) => return None,
        })
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.trace_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown({})", self.to_u8()),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// Negotiated status of one option.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OptionState {
    /// We agreed to perform the option (answered `DO` with `WILL`).
    pub locally_enabled: bool,
    /// The peer agreed to perform the option (answered with `WILL`).
    pub remotely_enabled: bool,
}

/// Per option negotiation records, created the first time an option is
/// negotiated and kept until the connection closes.
#[derive(Clone, Debug, Default)]
pub struct OptionStates {
    state: HashMap<u8, OptionState>,
}

impl OptionStates {
    /// Creates an empty table.
    pub fn new() -> OptionStates {
        OptionStates::default()
    }

    /// Current record for `option`, if it has been negotiated at all.
    pub fn get(&self, option: TelnetOption) -> Option<OptionState> {
        self.state.get(&option.to_u8()).copied()
    }

    /// Record for `option`, creating a disabled one on first use.
    pub fn entry(&mut self, option: TelnetOption) -> &mut OptionState {
        self.state.entry(option.to_u8()).or_default()
    }

    /// Whether we agreed to perform `option`.
    pub fn local_enabled(&self, option: TelnetOption) -> bool {
        self.get(option).is_some_and(|state| state.locally_enabled)
    }

    /// Whether the peer agreed to perform `option`.
    pub fn remote_enabled(&self, option: TelnetOption) -> bool {
        self.get(option).is_some_and(|state| state.remotely_enabled)
    }

    /// Number of options negotiated so far.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether no option has been negotiated.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Disables every option. Records are kept.
    pub fn reset(&mut self) {
        self.state
            .values_mut()
            .for_each(|state| *state = OptionState::default());
    }

    /// Whether any option is enabled in either direction.
    pub fn any_enabled(&self) -> bool {
        self.state
            .values()
            .any(|state| state.locally_enabled || state.remotely_enabled)
    }
}
