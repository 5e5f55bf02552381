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

//! Built-in option handlers.

mod charset;
mod echo;
mod flag;
mod gmcp;
mod msdp;
mod naws;
mod tree;
mod ttype;
mod zmp;

pub use self::charset::CharsetHandler;
pub use self::echo::EchoHandler;
pub use self::flag::{FlagHandler, MsspHandler};
pub use self::gmcp::{GmcpCommand, GmcpHandler};
pub use self::msdp::MsdpHandler;
pub use self::naws::NawsHandler;
pub use self::tree::CommandTree;
pub use self::ttype::TerminalTypeHandler;
pub use self::zmp::{ZmpCommand, ZmpHandler};
