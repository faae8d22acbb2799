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

//! Title casing as a chunked [`Transformer`].
//!
//! The first cased letter of every word is upper-cased and the remaining
//! letters of the word are lower-cased. Word boundaries follow the Unicode
//! word segmentation rules (UAX #29), so `don't`, `ci:lint` and `hello.world`
//! are single words. Enough trailing text is kept between calls to place the
//! next boundary, so a word split across chunks (or across an SGR sequence) is
//! cased as one word.

use crate::traits::{Progress, SpanningTransformer, Transformer};
use crate::{TransformError, TransformResult};
use unicode_segmentation::UnicodeSegmentation;

/// Characters of preceding text kept to locate the next word boundary.
const CONTEXT_CHARS: usize = 8;

/// One decoded unit of input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Unit {
    /// A character and its encoded length
    Char(char, usize),
    /// Bytes that are not valid UTF-8 and never will be
    Invalid(usize),
    /// A multi-byte character cut off by the end of the input
    Truncated,
}

fn decode(src: &[u8]) -> Unit {
    let window = &src[..src.len().min(4)];
    let valid_up_to = match std::str::from_utf8(window) {
        Ok(_) => window.len(),
        Err(error) if error.valid_up_to() > 0 => error.valid_up_to(),
        Err(error) => {
            return match error.error_len() {
                Some(len) => Unit::Invalid(len),
                None => Unit::Truncated,
            };
        }
    };
    match std::str::from_utf8(&window[..valid_up_to])
        .ok()
        .and_then(|text| text.chars().next())
    {
        Some(ch) => Unit::Char(ch, ch.len_utf8()),
        None => Unit::Invalid(1),
    }
}

fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase()
}

/// UTF-8 output for a single input character.
struct Mapped {
    buf: [u8; 16],
    len: usize,
}

impl Mapped {
    fn empty() -> Mapped {
        Mapped {
            buf: [0; 16],
            len: 0,
        }
    }

    fn push(&mut self, ch: char) {
        let encoded = ch.encode_utf8(&mut self.buf[self.len..]);
        self.len += encoded.len();
    }

    fn one(ch: char) -> Mapped {
        let mut mapped = Mapped::empty();
        mapped.push(ch);
        mapped
    }

    /// The leading upper-case character, the rest of a multi-character
    /// expansion lower-cased ("ß" becomes "Ss").
    fn title(ch: char) -> Mapped {
        let mut mapped = Mapped::empty();
        let mut upper = ch.to_uppercase();
        if let Some(first) = upper.next() {
            mapped.push(first);
        }
        upper
            .flat_map(char::to_lowercase)
            .for_each(|lower| mapped.push(lower));
        mapped
    }

    fn lower(ch: char) -> Mapped {
        let mut mapped = Mapped::empty();
        ch.to_lowercase().for_each(|lower| mapped.push(lower));
        mapped
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Output for one character and whether it opens a new word.
struct Step {
    mapped: Mapped,
    starts_word: bool,
}

/// Word position carried between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct WordState {
    /// Most recent characters of the current run of text
    context: String,
    /// A cased letter has been seen in the current word
    cased_seen: bool,
}

impl WordState {
    /// Returns `true` if a word boundary falls between the text seen so far
    /// and `ch`.
    fn breaks_before(&mut self, ch: char) -> bool {
        let at = self.context.len();
        self.context.push(ch);
        let breaks = self
            .context
            .split_word_bound_indices()
            .last()
            .is_none_or(|(start, _)| start == at);
        self.context.pop();
        breaks
    }

    /// Maps `ch` without advancing.
    fn step(&mut self, ch: char) -> Step {
        let starts_word = self.breaks_before(ch);
        let mapped = if !is_cased(ch) {
            Mapped::one(ch)
        } else if starts_word || !self.cased_seen {
            Mapped::title(ch)
        } else {
            Mapped::lower(ch)
        };
        Step {
            mapped,
            starts_word,
        }
    }

    fn advance(&mut self, ch: char, step: &Step) {
        if step.starts_word {
            self.cased_seen = false;
        }
        self.cased_seen |= is_cased(ch);
        self.context.push(ch);
        if self.context.chars().count() > CONTEXT_CHARS {
            self.context.remove(0);
        }
    }

    /// Bytes that are not text end the current word.
    fn interrupt(&mut self) {
        self.context.clear();
        self.cased_seen = false;
    }

    /// Length of the prefix of `src` that maps to itself, advancing over it.
    fn scan(&mut self, src: &[u8], at_eof: bool) -> usize {
        let mut spanned = 0;
        while spanned < src.len() {
            let rest = &src[spanned..];
            let len = match decode(rest) {
                Unit::Char(ch, len) => {
                    let step = self.step(ch);
                    if step.mapped.as_bytes() != &rest[..len] {
                        break;
                    }
                    self.advance(ch, &step);
                    len
                }
                Unit::Invalid(len) => {
                    self.interrupt();
                    len
                }
                Unit::Truncated if at_eof => {
                    self.interrupt();
                    rest.len()
                }
                Unit::Truncated => break,
            };
            spanned += len;
        }
        spanned
    }
}

/// Title-cases text, preserving everything that is not a cased letter.
#[derive(Clone, Debug, Default)]
pub struct TitleCase {
    state: WordState,
}

impl TitleCase {
    /// Creates a title caser positioned outside of any word.
    pub fn new() -> TitleCase {
        TitleCase::default()
    }
}

impl Transformer for TitleCase {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        let mut consumed = 0;
        let mut written = 0;

        while consumed < src.len() {
            let rest = &src[consumed..];
            let (len, step) = match decode(rest) {
                Unit::Char(ch, len) => (len, Some((ch, self.state.step(ch)))),
                Unit::Truncated if !at_eof => {
                    return Progress::stopped(written, consumed, TransformError::ShortSource);
                }
                Unit::Invalid(len) => (len, None),
                Unit::Truncated => (rest.len(), None),
            };
            // Undecodable bytes are copied through as-is.
            let output = match &step {
                Some((_, step)) => step.mapped.as_bytes(),
                None => &rest[..len],
            };

            let Some(target) = dst.get_mut(written..written + output.len()) else {
                return Progress::stopped(written, consumed, TransformError::ShortDestination);
            };
            target.copy_from_slice(output);
            written += output.len();
            consumed += len;
            match &step {
                Some((ch, step)) => self.state.advance(*ch, step),
                None => self.state.interrupt(),
            }
        }

        Progress::complete(written, consumed)
    }

    fn reset(&mut self) {
        self.state = WordState::default();
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        Some(self)
    }
}

impl SpanningTransformer for TitleCase {
    fn span(&mut self, src: &[u8], at_eof: bool) -> TransformResult<usize> {
        Ok(self.state.scan(src, at_eof))
    }

    fn span_whole(&mut self, src: &[u8], at_eof: bool) -> TransformResult<bool> {
        let mut state = self.state.clone();
        if state.scan(src, at_eof) < src.len() {
            return Ok(false);
        }
        self.state = state;
        Ok(true)
    }
}
