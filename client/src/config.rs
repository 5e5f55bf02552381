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

//! Client configuration

use decafmud_ansicodec::InterpreterConfig;
use decafmud_telnetcodec::TelnetConfig;
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Connect as soon as the transport reports itself ready
    pub autoconnect: bool,

    /// Reconnect after the connection drops
    pub autoreconnect: bool,

    /// How long one connection attempt may take before it is retried
    pub connect_timeout: Duration,

    /// Delay before a dropped connection is reconnected
    pub reconnect_delay: Duration,

    /// Attempts allowed before giving up
    pub reconnect_tries: u32,

    /// Telnet negotiation settings
    pub telnet: TelnetConfig,

    /// Terminal interpreter settings
    pub interpreter: InterpreterConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4000,
            autoconnect: true,
            autoreconnect: true,
            connect_timeout: Duration::from_millis(5000),
            reconnect_delay: Duration::from_millis(5000),
            reconnect_tries: 3,
            telnet: TelnetConfig::default(),
            interpreter: InterpreterConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set automatic connection once the transport is ready
    pub fn with_autoconnect(mut self, enabled: bool) -> Self {
        self.autoconnect = enabled;
        self
    }

    /// Set automatic reconnection
    pub fn with_autoreconnect(mut self, enabled: bool) -> Self {
        self.autoreconnect = enabled;
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set reconnection delay
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Set the number of connection attempts
    pub fn with_reconnect_tries(mut self, tries: u32) -> Self {
        self.reconnect_tries = tries;
        self
    }

    /// Set the telnet negotiation settings
    pub fn with_telnet(mut self, telnet: TelnetConfig) -> Self {
        self.telnet = telnet;
        self
    }

    /// Set the terminal interpreter settings
    pub fn with_interpreter(mut self, interpreter: InterpreterConfig) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 4000);
        assert!(config.autoconnect);
        assert!(config.autoreconnect);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.reconnect_tries, 3);
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("mud.example.org", 6666)
            .with_autoconnect(false)
            .with_autoreconnect(false)
            .with_connect_timeout(Duration::from_secs(2))
            .with_reconnect_delay(Duration::from_millis(250))
            .with_reconnect_tries(5);

        assert_eq!(config.address(), "mud.example.org:6666");
        assert!(!config.autoconnect);
        assert!(!config.autoreconnect);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.reconnect_delay, Duration::from_millis(250));
        assert_eq!(config.reconnect_tries, 5);
    }

    #[test]
    fn test_nested_configs() {
        let config = ClientConfig::default()
            .with_telnet(TelnetConfig::default().with_default_encoding("utf8"))
            .with_interpreter(InterpreterConfig::default().with_vt100_warning("no cursor"));
        assert_eq!(config.telnet.default_encoding, "utf8");
        assert_eq!(config.interpreter.vt100_warning, "no cursor");
    }
}
