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

use crate::{HandlerContext, HandlerResponse, OptionHandler, consts};

/// Answers `TTYPE SEND` with the configured terminal types in rotation.
#[derive(Clone, Debug, Default)]
pub struct TerminalTypeHandler {
    current: Option<usize>,
}

impl TerminalTypeHandler {
    /// Creates a handler that has not reported anything yet.
    pub fn new() -> TerminalTypeHandler {
        TerminalTypeHandler::default()
    }

    /// Index of the last reported name.
    pub fn current(&self) -> Option<usize> {
        self.current
    }
}

impl OptionHandler for TerminalTypeHandler {
    fn on_dont(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        self.current = None;
        HandlerResponse::Default
    }

    fn on_subnegotiation(&mut self, payload: &[u8], ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        if payload != [consts::SEND] {
            return HandlerResponse::Default;
        }
        let count = ctx.config().terminal_types.len();
        if count == 0 {
            return HandlerResponse::Default;
        }
        let next = self.current.map_or(0, |index| (index + 1) % count);
        self.current = Some(next);

        ctx.trace_received(payload);
        let mut reply = vec![consts::IS];
        reply.extend_from_slice(ctx.config().terminal_types[next].as_bytes());
        ctx.send_subnegotiation(&reply);
        HandlerResponse::Suppress
    }

    fn on_disconnect(&mut self, _ctx: &mut HandlerContext<'_>) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelnetOption;
    use crate::handler::testing::Harness;

    fn send(handler: &mut TerminalTypeHandler, harness: &mut Harness) -> Vec<u8> {
        let mut ctx = harness.ctx(TelnetOption::TTYPE);
        assert_eq!(handler.on_subnegotiation(&[consts::SEND], &mut ctx), HandlerResponse::Suppress);
        harness.host.take_sent()
    }

    #[test]
    fn rotates_through_names() {
        let mut harness = Harness::default();
        let mut handler = TerminalTypeHandler::new();
        assert_eq!(send(&mut handler, &mut harness), b"\xFF\xFA\x18\x00decafmud-0.9.0-alpha\xFF\xF0");
        assert_eq!(send(&mut handler, &mut harness), b"\xFF\xFA\x18\x00decafmud\xFF\xF0");
        assert_eq!(send(&mut handler, &mut harness), b"\xFF\xFA\x18\x00xterm\xFF\xF0");
        assert_eq!(send(&mut handler, &mut harness), b"\xFF\xFA\x18\x00unknown\xFF\xF0");
        assert_eq!(send(&mut handler, &mut harness), b"\xFF\xFA\x18\x00decafmud-0.9.0-alpha\xFF\xF0");
        assert!(harness.host.sink.contains("RCVD IAC SB TERMINAL-TYPE SEND IAC SE"));
    }

    #[test]
    fn dont_and_disconnect_restart_rotation() {
        let mut harness = Harness::default();
        let mut handler = TerminalTypeHandler::new();
        send(&mut handler, &mut harness);
        send(&mut handler, &mut harness);
        handler.on_dont(&mut harness.ctx(TelnetOption::TTYPE));
        assert_eq!(handler.current(), None);
        assert_eq!(send(&mut handler, &mut harness), b"\xFF\xFA\x18\x00decafmud-0.9.0-alpha\xFF\xF0");

        handler.on_disconnect(&mut harness.ctx(TelnetOption::TTYPE));
        assert_eq!(handler.current(), None);
    }

    #[test]
    fn other_payloads_are_left_alone() {
        let mut harness = Harness::default();
        let mut handler = TerminalTypeHandler::new();
        let mut ctx = harness.ctx(TelnetOption::TTYPE);
        assert_eq!(handler.on_subnegotiation(b"\x00vt100", &mut ctx), HandlerResponse::Default);
        assert!(harness.host.sent.is_empty());
    }

    #[test]
    fn empty_name_list_sends_nothing() {
        let mut harness = Harness::default();
        harness.config.terminal_types.clear();
        let mut handler = TerminalTypeHandler::new();
        let mut ctx = harness.ctx(TelnetOption::TTYPE);
        assert_eq!(handler.on_subnegotiation(&[consts::SEND], &mut ctx), HandlerResponse::Default);
        assert!(harness.host.sent.is_empty());
    }
}
