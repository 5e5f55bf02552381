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

use crate::{HandlerContext, HandlerResponse, OptionHandler};

/// Turns local echo off while the server echoes for us.
#[derive(Clone, Copy, Debug, Default)]
pub struct EchoHandler;

impl OptionHandler for EchoHandler {
    fn on_will(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.set_local_echo(false);
        HandlerResponse::Default
    }

    fn on_wont(&mut self, ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        ctx.set_local_echo(true);
        HandlerResponse::Default
    }

    fn on_disconnect(&mut self, ctx: &mut HandlerContext<'_>) {
        ctx.set_local_echo(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelnetOption;
    use crate::handler::testing::Harness;

    #[test]
    fn server_echo_toggles_local_echo() {
        let mut harness = Harness::default();
        let mut handler = EchoHandler;
        handler.on_will(&mut harness.ctx(TelnetOption::Echo));
        assert_eq!(harness.host.echo, Some(false));
        handler.on_wont(&mut harness.ctx(TelnetOption::Echo));
        assert_eq!(harness.host.echo, Some(true));
        harness.host.echo = None;
        handler.on_disconnect(&mut harness.ctx(TelnetOption::Echo));
        assert_eq!(harness.host.echo, Some(true));
    }
}
