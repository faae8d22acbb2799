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

//! The chunked transformer abstraction shared by [`AnsiTransformer`](crate::AnsiTransformer)
//! and the inner transformers it wraps.

use crate::{TransformError, TransformResult};

/// Outcome of one [`Transformer::transform`] call.
///
/// `written` bytes of the destination and `consumed` bytes of the source were
/// used, whether or not `result` is an error.
#[derive(Debug)]
#[must_use]
pub struct Progress {
    /// Bytes written to the destination
    pub written: usize,
    /// Bytes of the source that were processed
    pub consumed: usize,
    /// Why the call stopped early, if it did
    pub result: TransformResult<()>,
}

impl Progress {
    /// All requested work was done.
    pub fn complete(written: usize, consumed: usize) -> Progress {
        Progress {
            written,
            consumed,
            result: Ok(()),
        }
    }

    /// Work stopped early with `error`.
    pub fn stopped(written: usize, consumed: usize, error: TransformError) -> Progress {
        Progress {
            written,
            consumed,
            result: Err(error),
        }
    }

    /// Returns `true` if the call stopped because the destination was full.
    pub fn is_short_destination(&self) -> bool {
        matches!(self.result, Err(TransformError::ShortDestination))
    }
}

/// A stateful transformation from one byte stream to another, driven one chunk
/// at a time.
///
/// `at_eof` is `true` only for the final chunk of the logical stream.
pub trait Transformer {
    /// Transform `src` into `dst`.
    ///
    /// An `Ok` result means all of `src` was consumed.
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress;

    /// Return to the initial state, ready for an unrelated stream.
    fn reset(&mut self) {}

    /// Access the span capability when the transformer has one.
    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        None
    }
}

/// A [`Transformer`] that can report how much input it would leave unchanged.
pub trait SpanningTransformer: Transformer {
    /// Length of the longest prefix of `src` that the transformer passes through
    /// unmodified. A result shorter than `src` ends the span.
    ///
    /// After `Ok(n)` the state is the same as after transforming `src[..n]`, so
    /// a caller may copy the prefix and transform the rest of `src`.
    fn span(&mut self, src: &[u8], at_eof: bool) -> TransformResult<usize>;

    /// Returns `true` if all of `src` passes through unmodified.
    ///
    /// The state advances over `src` when the answer is `true` and is left
    /// untouched otherwise. The default asks [`span`](Self::span), which is
    /// only exact for transformers whose span never changes state; stateful
    /// transformers override it.
    fn span_whole(&mut self, src: &[u8], at_eof: bool) -> TransformResult<bool> {
        Ok(self.span(src, at_eof)? == src.len())
    }
}

impl<T: Transformer + ?Sized> Transformer for &mut T {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        (**self).transform(dst, src, at_eof)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        (**self).as_spanning()
    }
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        (**self).transform(dst, src, at_eof)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        (**self).as_spanning()
    }
}

/// Copies its input unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Passthrough;

impl Transformer for Passthrough {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], _at_eof: bool) -> Progress {
        let count = src.len().min(dst.len());
        dst[..count].copy_from_slice(&src[..count]);
        if count < src.len() {
            Progress::stopped(count, count, TransformError::ShortDestination)
        } else {
            Progress::complete(count, count)
        }
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        Some(self)
    }
}

impl SpanningTransformer for Passthrough {
    fn span(&mut self, src: &[u8], _at_eof: bool) -> TransformResult<usize> {
        Ok(src.len())
    }
}
