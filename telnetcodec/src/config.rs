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

//! Engine configuration

use crate::msdp::{MsdpTable, MsdpValue};
use std::time::Duration;

/// Settings shared by the telnet engine and its option handlers.
#[derive(Debug, Clone)]
pub struct TelnetConfig {
    /// Terminal type names reported in rotation to `TTYPE SEND`
    pub terminal_types: Vec<String>,

    /// Encodings preferred during CHARSET negotiation, most preferred first
    pub encoding_order: Vec<String>,

    /// Encoding selected on a fresh connection
    pub default_encoding: String,

    /// Client name sent with GMCP `Core.Hello` and ZMP `zmp.ident`
    pub client_name: String,

    /// Client version sent alongside the name
    pub client_version: String,

    /// Free text description for `zmp.ident`
    pub client_description: String,

    /// Delay between GMCP `Core.Ping` messages
    pub gmcp_ping_interval: Duration,

    /// Separator used between names in a CHARSET `REQUEST`
    pub charset_separator: u8,

    /// Variables answered when the server lists MSDP `CONFIGURABLE_VARIABLES`
    pub msdp_variables: MsdpTable,
}

impl Default for TelnetConfig {
    fn default() -> Self {
        let client_version = "0.9.0-alpha".to_string();
        Self {
            terminal_types: vec![
                format!("decafmud-{client_version}"),
                "decafmud".to_string(),
                "xterm".to_string(),
                "unknown".to_string(),
            ],
            encoding_order: vec!["utf8".to_string()],
            default_encoding: decafmud_charset::DEFAULT_CODEC.to_string(),
            client_name: "DecafMUD".to_string(),
            client_description: "DecafMUD telnet stream core".to_string(),
            gmcp_ping_interval: Duration::from_secs(60),
            charset_separator: b' ',
            msdp_variables: [
                ("CLIENT_NAME", MsdpValue::string("decafmud")),
                ("CLIENT_VERSION", MsdpValue::string(client_version.as_str())),
                ("PLUGIN_ID", MsdpValue::string("0")),
                ("ANSI_COLORS", MsdpValue::string("1")),
                ("UTF_8", MsdpValue::string("1")),
                ("XTERM_256_COLORS", MsdpValue::string("1")),
            ]
            .into_iter()
            .collect(),
            client_version,
        }
    }
}

impl TelnetConfig {
    /// Set the terminal types reported to `TTYPE`
    pub fn with_terminal_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terminal_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the CHARSET preference order
    pub fn with_encoding_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encoding_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Set the encoding a new connection starts with
    pub fn with_default_encoding(mut self, name: impl Into<String>) -> Self {
        self.default_encoding = name.into();
        self
    }

    /// Set the client identity sent to the server
    pub fn with_client(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.client_name = name.into();
        self.client_version = version.into();
        self.client_description = description.into();
        self
    }

    /// Set the GMCP ping interval
    pub fn with_gmcp_ping_interval(mut self, interval: Duration) -> Self {
        self.gmcp_ping_interval = interval;
        self
    }

    /// Set the CHARSET request separator
    pub fn with_charset_separator(mut self, separator: u8) -> Self {
        self.charset_separator = separator;
        self
    }

    /// Set or replace one configurable MSDP variable
    pub fn with_msdp_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.msdp_variables.set(name, MsdpValue::String(value.into()));
        self
    }
}
