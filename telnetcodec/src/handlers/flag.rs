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

use crate::msdp::MsdpTable;
use crate::{HandlerContext, HandlerResponse, OptionHandler, TraceLevel};

/// An option we always agree to and never subnegotiate, such as BINARY.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlagHandler;

impl OptionHandler for FlagHandler {}

/// Accepts MSSP and dumps the server status table to the trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct MsspHandler;

impl OptionHandler for MsspHandler {
    fn on_subnegotiation(&mut self, payload: &[u8], ctx: &mut HandlerContext<'_>) -> HandlerResponse {
        let table = MsdpTable::decode(payload);
        ctx.trace(TraceLevel::Debug, &format!("RCVD IAC SB MSSP {table} IAC SE"));
        HandlerResponse::Suppress
    }
}
