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

use crate::naws::WindowSize;
use crate::{HandlerContext, HandlerResponse, OptionHandler};

/// Reports the terminal size once the server asks for it, and again on
/// every resize.
#[derive(Clone, Debug, Default)]
pub struct NawsHandler {
    enabled: bool,
    last: Option<WindowSize>,
}

impl NawsHandler {
    /// Deferred task that sends the current size.
    pub const SEND_SIZE: u32 = 1;

    /// Creates a disarmed handler.
    pub fn new() -> NawsHandler {
        NawsHandler::default()
    }

    /// Whether the server asked for size reports.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The size sent last.
    pub fn last_sent(&self) -> Option<WindowSize> {
        self.last
    }

    fn send(&mut self, ctx: &mut HandlerContext<'_>) {
        if !self.enabled {
            return;
        }
        let Some(size) = ctx.window_size() else {
            return;
        };
        if self.last == Some(size) {
            return;
        }
        self.last = Some(size);
        let mut payload = Vec::with_capacity(size.len());
        size.encode(&mut payload);
        ctx.send_subnegotiation(&payload);
    }
}

impl OptionHandler for NawsHandler {
    fn on_do(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        self.last = None;
        self.enabled = true;
        ctx.defer(Self::SEND_SIZE);
        HandlerResponse::Default
    }

    fn on_dont(&mut self, _ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        self.enabled = false;
        HandlerResponse::Default
    }

    fn on_disconnect(&mut self, _ctx: &mut HandlerContext<'_>) {
        self.enabled = false;
    }

    fn on_deferred(&mut self, task: u32, ctx: &mut HandlerContext<'_>) {
        if task == Self::SEND_SIZE {
            self.send(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelnetOption;
    use crate::handler::testing::Harness;

    #[test]
    fn do_defers_first_report() {
        let mut harness = Harness::default();
        harness.host.size = Some(WindowSize::new(100, 30));
        let mut handler = NawsHandler::new();

        handler.on_do(&mut harness.ctx(TelnetOption::NAWS));
        assert!(harness.host.sent.is_empty());

        harness.run_due(TelnetOption::NAWS, &mut handler);
        assert_eq!(harness.host.take_sent(), b"\xFF\xFA\x1F\x00\x64\x00\x1E\xFF\xF0");
        assert_eq!(handler.last_sent(), Some(WindowSize::new(100, 30)));
    }

    #[test]
    fn unchanged_size_is_not_resent() {
        let mut harness = Harness::default();
        harness.host.size = Some(WindowSize::new(80, 24));
        let mut handler = NawsHandler::new();
        handler.on_do(&mut harness.ctx(TelnetOption::NAWS));
        harness.run_due(TelnetOption::NAWS, &mut handler);
        harness.host.take_sent();

        handler.on_deferred(NawsHandler::SEND_SIZE, &mut harness.ctx(TelnetOption::NAWS));
        assert!(harness.host.sent.is_empty());

        harness.host.size = Some(WindowSize::new(81, 24));
        handler.on_deferred(NawsHandler::SEND_SIZE, &mut harness.ctx(TelnetOption::NAWS));
        assert_eq!(harness.host.take_sent(), b"\xFF\xFA\x1F\x00\x51\x00\x18\xFF\xF0");
    }

    #[test]
    fn literal_iac_in_size_is_escaped() {
        let mut harness = Harness::default();
        // 255 * 255 puts 0xFF in the high byte
        harness.host.size = Some(WindowSize::new(255 * 255, 24));
        let mut handler = NawsHandler::new();
        handler.on_do(&mut harness.ctx(TelnetOption::NAWS));
        harness.run_due(TelnetOption::NAWS, &mut handler);
        assert_eq!(harness.host.take_sent(), b"\xFF\xFA\x1F\xFF\xFF\x00\x00\x18\xFF\xF0");
    }

    #[test]
    fn disarmed_report_is_dropped() {
        let mut harness = Harness::default();
        harness.host.size = Some(WindowSize::new(80, 24));
        let mut handler = NawsHandler::new();
        handler.on_do(&mut harness.ctx(TelnetOption::NAWS));
        handler.on_dont(&mut harness.ctx(TelnetOption::NAWS));
        harness.run_due(TelnetOption::NAWS, &mut handler);
        assert!(harness.host.sent.is_empty());
        assert!(!handler.is_enabled());
    }

    #[test]
    fn unknown_size_sends_nothing() {
        let mut harness = Harness::default();
        let mut handler = NawsHandler::new();
        handler.on_do(&mut harness.ctx(TelnetOption::NAWS));
        harness.run_due(TelnetOption::NAWS, &mut handler);
        assert!(harness.host.sent.is_empty());
    }
}
