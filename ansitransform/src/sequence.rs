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

//! Recognition of Select Graphic Rendition (SGR) sequences.
//!
//! Only the well formed shape `ESC [ <digits and ;> m` counts. Any other byte
//! inside the parameter run means the bytes are plain text, starting at the
//! `ESC`.

use crate::consts::{CSI, ESC, SGR_FINAL, SGR_SEPARATOR};

/// Outcome of looking for an SGR sequence at the start of a byte slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Recognized {
    /// The slice does not start with an SGR sequence.
    NotSequence,
    /// A complete sequence of the given length starts the slice.
    Complete(usize),
    /// The whole slice (of the given length) is a well formed prefix of an SGR
    /// sequence that has not terminated yet.
    Partial(usize),
}

impl Recognized {
    /// Length of the complete or partial sequence, zero if there is none.
    pub fn len(&self) -> usize {
        match self {
            Recognized::NotSequence => 0,
            Recognized::Complete(len) | Recognized::Partial(len) => *len,
        }
    }

    /// Returns `true` if no sequence was recognised.
    pub fn is_empty(&self) -> bool {
        matches!(self, Recognized::NotSequence)
    }

    /// Returns `true` for an unterminated sequence.
    pub fn is_partial(&self) -> bool {
        matches!(self, Recognized::Partial(_))
    }
}

/// Returns `true` for bytes allowed between `ESC [` and the final `m`.
#[inline]
fn is_parameter_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == SGR_SEPARATOR
}

/// Examines `src` for an SGR sequence starting at its first byte.
///
/// A lone `ESC` is a partial sequence. With a `max_len`, a candidate that has
/// not seen its final byte within `max_len` bytes is not a sequence.
pub fn recognize_sgr(src: &[u8], max_len: Option<usize>) -> Recognized {
    match src {
        [ESC] => return Recognized::Partial(1),
        [ESC, CSI, ..] => {}
        _ => return Recognized::NotSequence,
    }

    for (index, &byte) in src.iter().enumerate().skip(2) {
        if max_len.is_some_and(|limit| index >= limit) {
            return Recognized::NotSequence;
        }
        if byte == SGR_FINAL {
            return Recognized::Complete(index + 1);
        }
        if !is_parameter_byte(byte) {
            return Recognized::NotSequence;
        }
    }

    Recognized::Partial(src.len())
}
