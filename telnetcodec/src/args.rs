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

//! Wire formats of subnegotiation payloads.

/// CHARSET request and reply messages
pub mod charset;
/// GMCP (Generic Mud Communication Protocol) messages
pub mod gmcp;
/// MSDP and MSSP variable tables
pub mod msdp;
/// Window size reports
pub mod naws;
/// ZMP command messages
pub mod zmp;
