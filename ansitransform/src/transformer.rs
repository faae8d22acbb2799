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

//! SGR-preserving wrapper around another [`Transformer`].

use crate::config::AnsiTransformConfig;
use crate::segment::{SegmentKind, Segments};
use crate::traits::{Progress, SpanningTransformer, Transformer};
use crate::{TransformError, TransformResult};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Applies an inner [`Transformer`] to text while passing ANSI SGR sequences
/// (`ESC [ <params> m`) through untouched.
///
/// Title casing `"\x1b[31mhello world\x1b[0m"` directly would treat the escape
/// bytes as text. Wrapped in an `AnsiTransformer`, only `hello world` reaches the
/// inner transformer and the colour codes survive byte for byte.
///
/// Input may arrive in chunks of any size. A sequence split across chunks is
/// held back until it completes, and any bytes the inner transformer could not
/// take are kept as well; the next call only passes new input. Concatenating
/// the output of every call gives the same bytes as transforming the whole
/// stream at once.
#[derive(Debug)]
pub struct AnsiTransformer<T> {
    config: AnsiTransformConfig,
    /// Applied to plain text segments
    inner: T,
    /// Bytes from previous calls that could not be processed yet
    leftover: Vec<u8>,
}

/// Where a single pass over the combined input stopped.
struct Pass {
    written: usize,
    consumed: usize,
    /// Offset from which the combined input must be kept for the next call
    retain_from: Option<usize>,
    result: TransformResult<()>,
}

impl Pass {
    fn done(written: usize, consumed: usize) -> Pass {
        Pass {
            written,
            consumed,
            retain_from: None,
            result: Ok(()),
        }
    }

    fn deferred(written: usize, from: usize, result: TransformResult<()>) -> Pass {
        Pass {
            written,
            consumed: from,
            retain_from: Some(from),
            result,
        }
    }
}

impl<T: Transformer> AnsiTransformer<T> {
    /// Wraps `inner` using the default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(AnsiTransformConfig::default(), inner)
    }

    /// Wraps `inner` using `config`.
    pub fn with_config(config: AnsiTransformConfig, inner: T) -> Self {
        Self {
            config,
            inner,
            leftover: Vec::new(),
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AnsiTransformConfig {
        &self.config
    }

    /// Get a reference to the inner transformer
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Get a mutable reference to the inner transformer
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwraps the inner transformer, discarding any held bytes.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Bytes held back from earlier calls.
    pub fn pending(&self) -> &[u8] {
        &self.leftover
    }

    /// Returns `true` if bytes from an earlier call are waiting for more input
    /// or more output room.
    pub fn has_pending(&self) -> bool {
        !self.leftover.is_empty()
    }

    fn segments<'a>(&self, buffer: &'a [u8]) -> Segments<'a> {
        Segments::with_limit(buffer, self.config.max_sequence_length)
    }

    /// Runs one pass over `buffer`, the held bytes followed by the new input.
    fn run(&mut self, dst: &mut [u8], buffer: &[u8], at_eof: bool) -> Pass {
        let mut written = 0;
        let mut consumed = 0;

        for segment in self.segments(buffer) {
            match segment.kind() {
                SegmentKind::PlainText => {
                    let inner_at_eof = at_eof && segment.end() == buffer.len();
                    let progress =
                        self.inner
                            .transform(&mut dst[written..], segment.bytes(), inner_at_eof);
                    written += progress.written;
                    if let Err(error) = progress.result {
                        let stopped_at = segment.start() + progress.consumed;
                        trace!(stopped_at, %error, "inner transformer stopped early");
                        return Pass::deferred(written, stopped_at, Err(error));
                    }
                }
                // At the end of input the sequence can never complete. It is
                // left unclaimed for the caller to emit or discard.
                SegmentKind::PartialEscapeSequence if at_eof => {
                    trace!(len = segment.len(), "leaving partial SGR sequence unclaimed");
                    return Pass::done(written, segment.start());
                }
                SegmentKind::PartialEscapeSequence => {
                    trace!(len = segment.len(), "deferring partial SGR sequence");
                    return Pass::deferred(written, segment.start(), Ok(()));
                }
                SegmentKind::EscapeSequence => {
                    let Some(target) = dst.get_mut(written..written + segment.len()) else {
                        trace!(len = segment.len(), "no room for SGR sequence");
                        return Pass::deferred(
                            written,
                            segment.start(),
                            Err(TransformError::ShortDestination),
                        );
                    };
                    target.copy_from_slice(segment.bytes());
                    written += segment.len();
                }
            }
            consumed = segment.end();
        }

        Pass::done(written, consumed)
    }
}

impl<T: Transformer> Transformer for AnsiTransformer<T> {
    /// Transforms `src`, preceded by any bytes held from the previous call.
    ///
    /// `consumed` counts bytes of that combined input. Bytes past it are held
    /// for the next call, so callers must not pass them again.
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        let buffer: Cow<'_, [u8]> = if self.leftover.is_empty() {
            Cow::Borrowed(src)
        } else {
            let mut combined = std::mem::take(&mut self.leftover);
            combined.extend_from_slice(src);
            Cow::Owned(combined)
        };

        let pass = self.run(dst, &buffer, at_eof);

        if let Some(from) = pass.retain_from {
            match buffer {
                Cow::Owned(mut combined) => {
                    combined.drain(..from);
                    self.leftover = combined;
                }
                Cow::Borrowed(src) => self.leftover.extend_from_slice(&src[from..]),
            }
            debug!(held = self.leftover.len(), "holding bytes for next call");
        }

        Progress {
            written: pass.written,
            consumed: pass.consumed,
            result: pass.result,
        }
    }

    fn reset(&mut self) {
        trace!(discarded = self.leftover.len(), "transformer reset");
        self.leftover.clear();
        self.inner.reset();
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        Some(self)
    }
}

impl<T: Transformer> SpanningTransformer for AnsiTransformer<T> {
    /// Length of the prefix of `src` that [`transform`](Transformer::transform)
    /// would copy unchanged.
    ///
    /// SGR sequences always pass through. Text passes through only when the
    /// inner transformer can span and spans all of it. Held bytes from an
    /// earlier call mean nothing can be promised, so the span is empty.
    ///
    /// The inner transformer only advances over text inside the returned span.
    fn span(&mut self, src: &[u8], at_eof: bool) -> TransformResult<usize> {
        if self.has_pending() {
            return Ok(0);
        }

        let mut span_end = 0;
        for segment in self.segments(src) {
            match segment.kind() {
                SegmentKind::PlainText => {
                    let Some(spanning) = self.inner.as_spanning() else {
                        return Ok(span_end);
                    };
                    let inner_at_eof = at_eof && segment.end() == src.len();
                    if !spanning.span_whole(segment.bytes(), inner_at_eof)? {
                        trace!(span_end, "inner transformer rejected text segment");
                        return Ok(span_end);
                    }
                }
                SegmentKind::EscapeSequence => {}
                SegmentKind::PartialEscapeSequence => return Ok(span_end),
            }
            span_end = segment.end();
        }

        Ok(src.len())
    }

    fn span_whole(&mut self, src: &[u8], at_eof: bool) -> TransformResult<bool> {
        if self.has_pending() {
            return Ok(false);
        }

        let mut text = None;
        for segment in self.segments(src) {
            match segment.kind() {
                SegmentKind::EscapeSequence => {}
                SegmentKind::PartialEscapeSequence => return Ok(false),
                // Text on both sides of a sequence is reported as modified
                // rather than committing part of it.
                SegmentKind::PlainText if text.is_some() => return Ok(false),
                SegmentKind::PlainText => text = Some(segment),
            }
        }

        let Some(segment) = text else {
            return Ok(true);
        };
        let Some(spanning) = self.inner.as_spanning() else {
            return Ok(false);
        };
        spanning.span_whole(segment.bytes(), at_eof && segment.end() == src.len())
    }
}
