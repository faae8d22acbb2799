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

//! Drivers that run an [`AnsiTransformer`] over whole inputs or a sequence of
//! chunks, growing the output as needed.

use crate::traits::Transformer;
use crate::transformer::AnsiTransformer;
use crate::{TransformError, TransformResult};
use bytes::BufMut;
use tracing::trace;

impl<T: Transformer> AnsiTransformer<T> {
    /// Transforms one chunk of a stream and appends the output to `out`.
    ///
    /// Set `at_eof` on the final chunk only. Bytes that cannot be resolved yet,
    /// such as a split SGR sequence or a split multi-byte character, are held
    /// and emitted by a later call. An SGR sequence still unfinished at the end
    /// of input is left unclaimed by the transformer and appended unchanged.
    /// Returns the number of bytes appended.
    ///
    /// # Errors
    ///
    /// Any error from the inner transformer other than running out of output
    /// room, and [`TransformError::ShortSource`] on the final chunk.
    pub fn transform_chunk<B: BufMut>(
        &mut self,
        chunk: &[u8],
        at_eof: bool,
        out: &mut B,
    ) -> TransformResult<usize> {
        let mut scratch = vec![0u8; self.config().scratch_capacity.max(1)];
        let mut src = chunk;
        let mut appended = 0;

        loop {
            // Only needed to recover an unclaimed tail on the final call.
            let held = if at_eof {
                self.pending().to_vec()
            } else {
                Vec::new()
            };
            let input = src;
            let progress = self.transform(&mut scratch, input, at_eof);
            out.put_slice(&scratch[..progress.written]);
            appended += progress.written;
            // Everything not consumed is held by the transformer.
            src = &[];

            match progress.result {
                Ok(()) if at_eof => {
                    let (held_tail, input_tail) = unclaimed(&held, input, progress.consumed);
                    if !held_tail.is_empty() || !input_tail.is_empty() {
                        trace!(
                            len = held_tail.len() + input_tail.len(),
                            "appending unclaimed tail"
                        );
                    }
                    out.put_slice(held_tail);
                    out.put_slice(input_tail);
                    return Ok(appended + held_tail.len() + input_tail.len());
                }
                Ok(()) => return Ok(appended),
                Err(TransformError::ShortDestination) => {
                    if progress.written == 0 {
                        let grown = scratch.len() * 2;
                        trace!(grown, "growing scratch buffer");
                        scratch.resize(grown, 0);
                    }
                }
                Err(TransformError::ShortSource) if !at_eof => return Ok(appended),
                Err(error) => return Err(error),
            }
        }
    }

    /// Transforms a sequence of chunks as one stream, starting from a clean
    /// state.
    ///
    /// # Errors
    ///
    /// As [`transform_chunk`](Self::transform_chunk).
    pub fn transform_chunks<'a, I>(&mut self, chunks: I) -> TransformResult<Vec<u8>>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        self.reset();
        let mut out = Vec::new();
        let mut chunks = chunks.into_iter().peekable();
        while let Some(chunk) = chunks.next() {
            let at_eof = chunks.peek().is_none();
            self.transform_chunk(chunk, at_eof, &mut out)?;
            if at_eof {
                return Ok(out);
            }
        }
        self.transform_chunk(&[], true, &mut out)?;
        Ok(out)
    }

    /// Transforms `input` as a complete stream, starting from a clean state.
    ///
    /// # Errors
    ///
    /// As [`transform_chunk`](Self::transform_chunk).
    pub fn transform_bytes(&mut self, input: &[u8]) -> TransformResult<Vec<u8>> {
        self.reset();
        let mut out = Vec::with_capacity(input.len());
        self.transform_chunk(input, true, &mut out)?;
        Ok(out)
    }

    /// Transforms `input` as a complete stream, starting from a clean state.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidUtf8`] if the inner transformer produced bytes
    /// that are not UTF-8, otherwise as [`transform_chunk`](Self::transform_chunk).
    pub fn transform_str(&mut self, input: &str) -> TransformResult<String> {
        let out = self.transform_bytes(input.as_bytes())?;
        String::from_utf8(out).map_err(|error| TransformError::InvalidUtf8 {
            position: error.utf8_error().valid_up_to(),
        })
    }
}

/// Splits the bytes of `held` followed by `input` from offset `consumed`.
fn unclaimed<'a>(held: &'a [u8], input: &'a [u8], consumed: usize) -> (&'a [u8], &'a [u8]) {
    match held.get(consumed..) {
        Some(held_tail) => (held_tail, input),
        None => (&[][..], input.get(consumed - held.len()..).unwrap_or_default()),
    }
}
