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

//! Diagnostic trace channel.
//!
//! Negotiation traffic, protocol events and interpreter notices are reported
//! through a [`TraceSink`]. The default sink forwards into `tracing` so an
//! embedding application only has to install a subscriber.

use tracing::{debug, error, info, warn};

/// Severity of a trace message.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TraceLevel {
    /// Wire level chatter such as `RCVD` and `SENT` lines
    Debug,
    /// Connection and protocol events
    Info,
    /// Recoverable problems
    Warn,
    /// Failures
    Error,
}

impl std::fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceLevel::Debug => write!(f, "debug"),
            TraceLevel::Info => write!(f, "info"),
            TraceLevel::Warn => write!(f, "warn"),
            TraceLevel::Error => write!(f, "error"),
        }
    }
}

/// Receives diagnostic messages.
pub trait TraceSink {
    /// Records `message` at `level`.
    fn trace(&mut self, level: TraceLevel, message: &str);
}

/// A [`TraceSink`] writing to the `tracing` macros.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn trace(&mut self, level: TraceLevel, message: &str) {
        match level {
            TraceLevel::Debug => debug!("{}", message),
            TraceLevel::Info => info!("{}", message),
            TraceLevel::Warn => warn!("{}", message),
            TraceLevel::Error => error!("{}", message),
        }
    }
}

/// A [`TraceSink`] that keeps every message, handy for inspecting a session.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    /// Messages in arrival order
    pub messages: Vec<(TraceLevel, String)>,
}

impl CollectingSink {
    /// Whether any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|(_, message)| message.contains(needle))
    }
}

impl TraceSink for CollectingSink {
    fn trace(&mut self, level: TraceLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
