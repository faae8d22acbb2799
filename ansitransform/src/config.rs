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

use crate::consts::{DEFAULT_SCRATCH_CAPACITY, MAX_SEQUENCE_LENGTH};

/// Settings for an [`AnsiTransformer`](crate::AnsiTransformer).
///
/// The defaults recognise SGR sequences of any length, so a partial sequence is
/// carried across calls for as long as it stays well formed. The bounded preset
/// caps sequences at [`MAX_SEQUENCE_LENGTH`] bytes; anything longer is folded
/// into plain text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnsiTransformConfig {
    /// Longest byte run still considered an SGR sequence, `None` for no limit
    pub max_sequence_length: Option<usize>,
    /// Initial scratch buffer size used by the one-shot and chunked drivers
    pub scratch_capacity: usize,
}

impl AnsiTransformConfig {
    /// Recognise SGR sequences of any length
    pub fn unbounded() -> AnsiTransformConfig {
        AnsiTransformConfig {
            max_sequence_length: None,
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
        }
    }

    /// Recognise SGR sequences up to [`MAX_SEQUENCE_LENGTH`] bytes
    pub fn bounded() -> AnsiTransformConfig {
        AnsiTransformConfig {
            max_sequence_length: Some(MAX_SEQUENCE_LENGTH),
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
        }
    }

    /// Replace the sequence length limit.
    pub fn with_max_sequence_length(mut self, limit: Option<usize>) -> AnsiTransformConfig {
        self.max_sequence_length = limit;
        self
    }

    /// Replace the initial scratch capacity. Zero is bumped to one byte so the
    /// drivers can always make progress.
    pub fn with_scratch_capacity(mut self, capacity: usize) -> AnsiTransformConfig {
        self.scratch_capacity = capacity.max(1);
        self
    }
}

impl Default for AnsiTransformConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}
