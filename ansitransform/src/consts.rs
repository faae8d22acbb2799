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

/// Escape byte that introduces every ANSI sequence.
pub const ESC: u8 = 0x1B;

/// Control Sequence Introducer byte following [`ESC`].
pub const CSI: u8 = b'[';

/// Final byte of a Select Graphic Rendition (SGR) sequence.
pub const SGR_FINAL: u8 = b'm';

/// SGR parameter separator.
pub const SGR_SEPARATOR: u8 = b';';

/// Upper bound on the length of an SGR sequence when running bounded.
///
/// Standard SGR sequences are well under 32 bytes, even with 24-bit colour
/// parameters for both foreground and background. A candidate that runs past
/// this limit without terminating is treated as plain text, which keeps the
/// carried-over buffer from growing without bound on hostile input.
pub const MAX_SEQUENCE_LENGTH: usize = 256;

/// Initial size of the scratch buffer used by the one-shot and chunked drivers.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 256;
