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

use super::CommandTree;
use crate::gmcp::GmcpMessage;
use crate::{HandlerContext, HandlerResponse, OptionHandler, TraceLevel};
use serde_json::{Value, json};
use std::time::Instant;

/// Callback run for an incoming GMCP package.
pub type GmcpCommand = fn(&mut GmcpHandler, Option<&Value>, &mut HandlerContext<'_>);

/// GMCP session: says hello, keeps a ping loop running and dispatches
/// incoming packages by dotted name.
#[derive(Clone)]
pub struct GmcpHandler {
    packages: CommandTree<GmcpCommand>,
    ping_average: u64,
    ping_count: u64,
    ping_when: Option<Instant>,
}

impl GmcpHandler {
    /// Deferred task that sends `Core.Hello`.
    pub const SEND_HELLO: u32 = 1;
    /// Deferred task that sends `Core.Ping` and re-arms itself.
    pub const SEND_PING: u32 = 2;

    /// Creates a handler that knows `Core.Ping` and `Core.Goodbye`.
    pub fn new() -> GmcpHandler {
        let mut packages = CommandTree::new();
        packages.insert("Core.Ping", Self::core_ping as GmcpCommand);
        packages.insert("Core.Goodbye", Self::core_goodbye as GmcpCommand);
        GmcpHandler {
            packages,
            ping_average: 0,
            ping_count: 0,
            ping_when: None,
        }
    }

    /// Adds a callback for `package`, e.g. `Char.Vitals`.
    pub fn register_package(&mut self, package: &str, command: GmcpCommand) {
        self.packages.insert(package, command);
    }

    /// Rounded up average ping round trip in milliseconds.
    pub fn ping_average(&self) -> u64 {
        self.ping_average
    }

    /// Number of ping replies measured.
    pub fn ping_count(&self) -> u64 {
        self.ping_count
    }

    /// Sends `message` as one GMCP subnegotiation.
    pub fn send(ctx: &mut HandlerContext<'_>, message: &GmcpMessage) {
        let mut payload = Vec::new();
        message.encode(&mut payload);
        ctx.send_subnegotiation(&payload);
    }

    fn ping(&mut self, ctx: &mut HandlerContext<'_>) {
        let message = if self.ping_count > 0 {
            GmcpMessage::new("Core.Ping", json!(self.ping_average))
        } else {
            GmcpMessage::command("Core.Ping")
        };
        Self::send(ctx, &message);
        self.ping_when = Some(ctx.now());
        let interval = ctx.config().gmcp_ping_interval;
        ctx.schedule(interval, Self::SEND_PING);
    }

    fn reset(&mut self, ctx: &mut HandlerContext<'_>) {
        ctx.cancel_all();
        self.ping_average = 0;
        self.ping_count = 0;
        self.ping_when = None;
    }

    fn core_ping(&mut self, _data: Option<&Value>, ctx: &mut HandlerContext<'_>) {
        let Some(sent) = self.ping_when else {
            return;
        };
        let elapsed = u64::try_from(ctx.now().saturating_duration_since(sent).as_millis()).unwrap_or(u64::MAX);
        self.ping_count += 1;
        let total = elapsed.saturating_add(self.ping_average * (self.ping_count - 1));
        self.ping_average = total.div_ceil(self.ping_count);
        ctx.trace(
            TraceLevel::Debug,
            &format!("PING: {}ms over {} pings", self.ping_average, self.ping_count),
        );
    }

    fn core_goodbye(&mut self, data: Option<&Value>, ctx: &mut HandlerContext<'_>) {
        let reason = match data {
            Some(Value::String(reason)) => reason.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        ctx.trace(TraceLevel::Info, &format!("Reason for disconnect: {reason}"));
    }
}

impl Default for GmcpHandler {
    fn default() -> Self {
        GmcpHandler::new()
    }
}

impl std::fmt::Debug for GmcpHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GmcpHandler")
            .field("ping_average", &self.ping_average)
            .field("ping_count", &self.ping_count)
            .field("ping_when", &self.ping_when)
            .finish_non_exhaustive()
    }
}

impl OptionHandler for GmcpHandler {
    fn on_will(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.defer(Self::SEND_HELLO);
        ctx.cancel(Self::SEND_PING);
        let interval = ctx.config().gmcp_ping_interval;
        ctx.schedule(interval, Self::SEND_PING);
        HandlerResponse::Default
    }

    fn on_wont(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        self.reset(ctx);
        HandlerResponse::Default
    }

    fn on_subnegotiation(&mut self, payload: &[u8], ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        let message = match GmcpMessage::parse(payload) {
            Ok(message) => message,
            Err(err) => {
                ctx.trace(TraceLevel::Warn, &err.to_string());
                return HandlerResponse::Default;
            }
        };
        if message.is_empty() {
            return HandlerResponse::Default;
        }

        let response = if message.has_data() {
            ctx.trace(TraceLevel::Debug, &format!("RCVD IAC SB GMCP {message} IAC SE"));
            HandlerResponse::Suppress
        } else {
            HandlerResponse::Default
        };
        if let Some(command) = self.packages.lookup(message.package()) {
            command(self, message.data(), ctx);
        }
        response
    }

    fn on_disconnect(&mut self, ctx: &mut HandlerContext<'_>) {
        self.reset(ctx);
    }

    fn on_deferred(&mut self, task: u32, ctx: &mut HandlerContext<'_>) {
        match task {
            Self::SEND_HELLO => {
                let hello = json!({
                    "client": ctx.config().client_name,
                    "version": ctx.config().client_version,
                });
                Self::send(ctx, &GmcpMessage::new("Core.Hello", hello));
            }
            Self::SEND_PING => self.ping(ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelnetOption;
    use crate::handler::testing::Harness;
    use std::time::Duration;

    fn sb(text: &str) -> Vec<u8> {
        let mut out = b"\xFF\xFA\xC9".to_vec();
        out.extend_from_slice(text.as_bytes());
        out.extend_from_slice(b"\xFF\xF0");
        out
    }

    #[test]
    fn will_sends_hello_then_pings() {
        let mut harness = Harness::default();
        let start = Instant::now();
        harness.now = Some(start);
        let mut handler = GmcpHandler::new();
        handler.on_will(&mut harness.ctx(TelnetOption::GMCP));

        harness.run_due(TelnetOption::GMCP, &mut handler);
        assert_eq!(
            harness.host.take_sent(),
            sb(r#"Core.Hello {"client":"DecafMUD","version":"0.9.0-alpha"}"#)
        );

        harness.now = Some(start + Duration::from_secs(60));
        harness.run_due(TelnetOption::GMCP, &mut handler);
        assert_eq!(harness.host.take_sent(), sb("Core.Ping"));
        assert!(harness.deferred.contains(TelnetOption::GMCP, GmcpHandler::SEND_PING));
    }

    #[test]
    fn ping_replies_update_average() {
        let mut harness = Harness::default();
        let start = Instant::now();
        harness.now = Some(start);
        let mut handler = GmcpHandler::new();
        handler.on_deferred(GmcpHandler::SEND_PING, &mut harness.ctx(TelnetOption::GMCP));
        harness.host.take_sent();

        harness.now = Some(start + Duration::from_millis(100));
        handler.on_subnegotiation(b"Core.Ping", &mut harness.ctx(TelnetOption::GMCP));
        assert_eq!((handler.ping_average(), handler.ping_count()), (100, 1));

        handler.on_deferred(GmcpHandler::SEND_PING, &mut harness.ctx(TelnetOption::GMCP));
        assert_eq!(harness.host.take_sent(), sb("Core.Ping 100"));

        harness.now = Some(start + Duration::from_millis(151));
        handler.on_subnegotiation(b"Core.Ping", &mut harness.ctx(TelnetOption::GMCP));
        // ceil((51 + 100) / 2)
        assert_eq!((handler.ping_average(), handler.ping_count()), (76, 2));
    }

    #[test]
    fn ping_reply_without_request_is_ignored() {
        let mut harness = Harness::default();
        let mut handler = GmcpHandler::new();
        handler.on_subnegotiation(b"Core.Ping", &mut harness.ctx(TelnetOption::GMCP));
        assert_eq!(handler.ping_count(), 0);
    }

    #[test]
    fn goodbye_reason_is_traced() {
        let mut harness = Harness::default();
        let mut handler = GmcpHandler::new();
        let response = handler.on_subnegotiation(
            b"Core.Goodbye \"Server rebooting\"",
            &mut harness.ctx(TelnetOption::GMCP),
        );
        assert_eq!(response, HandlerResponse::Suppress);
        assert!(harness.host.sink.contains("Reason for disconnect: Server rebooting"));
    }

    #[test]
    fn registered_packages_are_dispatched() {
        fn vitals(handler: &mut GmcpHandler, data: Option<&Value>, _ctx: &mut HandlerContext<'_>) {
            handler.ping_count = data.and_then(|data| data["hp"].as_u64()).unwrap_or_default();
        }
        let mut harness = Harness::default();
        let mut handler = GmcpHandler::new();
        handler.register_package("Char.Vitals", vitals);
        handler.on_subnegotiation(br#"Char.Vitals {"hp": 42}"#, &mut harness.ctx(TelnetOption::GMCP));
        assert_eq!(handler.ping_count(), 42);
    }

    #[test]
    fn bad_json_and_empty_package_fall_back_to_generic_trace() {
        let mut harness = Harness::default();
        let mut handler = GmcpHandler::new();
        let mut ctx = harness.ctx(TelnetOption::GMCP);
        assert_eq!(handler.on_subnegotiation(b"Char.Vitals {", &mut ctx), HandlerResponse::Default);
        assert_eq!(handler.on_subnegotiation(b" 5", &mut ctx), HandlerResponse::Default);
        assert_eq!(handler.on_subnegotiation(b"Room.Info", &mut ctx), HandlerResponse::Default);
        assert!(harness.host.sink.messages.iter().any(|(level, _)| *level == TraceLevel::Warn));
    }

    #[test]
    fn wont_stops_pinging() {
        let mut harness = Harness::default();
        let mut handler = GmcpHandler::new();
        handler.on_will(&mut harness.ctx(TelnetOption::GMCP));
        handler.on_wont(&mut harness.ctx(TelnetOption::GMCP));
        assert!(harness.deferred.is_empty());
    }
}
