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

//! Lazy partitioning of a byte buffer into plain text and SGR sequences.

use crate::sequence::{Recognized, recognize_sgr};
use std::iter::FusedIterator;
use std::ops::Range;

/// Classification of a [`Segment`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Ordinary bytes handed to the inner transformer.
    PlainText,
    /// A complete SGR sequence, copied verbatim.
    EscapeSequence,
    /// A well formed but unterminated SGR prefix running to the end of the
    /// buffer. Only ever the last segment.
    PartialEscapeSequence,
}

/// A classified, read-only view over `[start, end)` of a buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    kind: SegmentKind,
    start: usize,
    end: usize,
    bytes: &'a [u8],
}

impl<'a> Segment<'a> {
    fn new(kind: SegmentKind, buffer: &'a [u8], range: Range<usize>) -> Segment<'a> {
        Segment {
            kind,
            start: range.start,
            end: range.end,
            bytes: &buffer[range],
        }
    }

    /// Kind of this segment
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Offset of the first byte in the segmented buffer
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last byte in the segmented buffer
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range in the segmented buffer
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The bytes covered by this segment
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Number of bytes covered by this segment
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Segments are never empty; provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Iterator over the [`Segment`]s of a buffer.
///
/// Segments are produced on demand, left to right, and together cover the
/// whole buffer without gaps or overlaps. Scanning stops after a
/// [`SegmentKind::PartialEscapeSequence`]. Creating a new iterator over the
/// same bytes yields the same segments.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    buffer: &'a [u8],
    max_len: Option<usize>,
    /// Scan position
    position: usize,
    /// Start of the plain text run not yet emitted
    text_start: usize,
    /// Sequence found while a plain text run was still pending
    queued: Option<Segment<'a>>,
    finished: bool,
}

impl<'a> Segments<'a> {
    /// Segment `buffer` with no limit on sequence length.
    pub fn new(buffer: &'a [u8]) -> Segments<'a> {
        Segments::with_limit(buffer, None)
    }

    /// Segment `buffer`, treating SGR candidates longer than `max_len` as text.
    pub fn with_limit(buffer: &'a [u8], max_len: Option<usize>) -> Segments<'a> {
        Segments {
            buffer,
            max_len,
            position: 0,
            text_start: 0,
            queued: None,
            finished: false,
        }
    }

    fn text(&self, end: usize) -> Option<Segment<'a>> {
        (end > self.text_start)
            .then(|| Segment::new(SegmentKind::PlainText, self.buffer, self.text_start..end))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(segment) = self.queued.take() {
            return Some(segment);
        }
        if self.finished {
            return None;
        }

        while self.position < self.buffer.len() {
            let found = recognize_sgr(&self.buffer[self.position..], self.max_len);
            let start = self.position;
            let sequence = match found {
                Recognized::NotSequence => {
                    self.position += 1;
                    continue;
                }
                Recognized::Complete(len) => {
                    self.position += len;
                    Segment::new(SegmentKind::EscapeSequence, self.buffer, start..start + len)
                }
                Recognized::Partial(len) => {
                    self.position = self.buffer.len();
                    self.finished = true;
                    Segment::new(
                        SegmentKind::PartialEscapeSequence,
                        self.buffer,
                        start..start + len,
                    )
                }
            };

            let text = self.text(start);
            self.text_start = self.position;
            return match text {
                Some(text) => {
                    self.queued = Some(sequence);
                    Some(text)
                }
                None => Some(sequence),
            };
        }

        self.finished = true;
        let text = self.text(self.buffer.len());
        self.text_start = self.buffer.len();
        text
    }
}

impl FusedIterator for Segments<'_> {}
