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

use crate::config::AnsiTransformConfig;
use crate::traits::Transformer;
use crate::transformer::AnsiTransformer;
use crate::{TransformError, TransformResult};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::instrument;

/// Codec that runs a byte stream through an [`AnsiTransformer`].
///
/// Each decoded item is the transformed output of whatever input was
/// available, so frame boundaries follow the reads of the underlying stream.
/// Split SGR sequences and characters are held until the bytes that complete
/// them arrive. A sequence still unfinished when the stream ends is emitted
/// unchanged by [`Decoder::decode_eof`].
#[derive(Debug)]
pub struct AnsiTransformCodec<T> {
    transformer: AnsiTransformer<T>,
}

impl<T: Transformer> AnsiTransformCodec<T> {
    /// Creates a codec applying `inner` to the text of the stream.
    pub fn new(inner: T) -> Self {
        Self {
            transformer: AnsiTransformer::new(inner),
        }
    }

    /// Creates a codec with the given configuration.
    pub fn with_config(config: AnsiTransformConfig, inner: T) -> Self {
        Self {
            transformer: AnsiTransformer::with_config(config, inner),
        }
    }

    /// Get a reference to the transformer
    pub fn transformer(&self) -> &AnsiTransformer<T> {
        &self.transformer
    }

    /// Get a mutable reference to the transformer
    pub fn transformer_mut(&mut self) -> &mut AnsiTransformer<T> {
        &mut self.transformer
    }

    /// Unwraps the transformer
    pub fn into_inner(self) -> AnsiTransformer<T> {
        self.transformer
    }

    fn run(&mut self, src: &mut BytesMut, at_eof: bool) -> TransformResult<Option<BytesMut>> {
        let chunk = src.split();
        let mut out = BytesMut::with_capacity(chunk.len());
        self.transformer.transform_chunk(&chunk, at_eof, &mut out)?;
        Ok((!out.is_empty()).then_some(out))
    }
}

impl<T: Transformer> Decoder for AnsiTransformCodec<T> {
    type Item = BytesMut;
    type Error = TransformError;

    #[instrument(skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> TransformResult<Option<Self::Item>> {
        if src.is_empty() {
            return Ok(None);
        }
        self.run(src, false)
    }

    #[instrument(skip_all)]
    fn decode_eof(&mut self, src: &mut BytesMut) -> TransformResult<Option<Self::Item>> {
        if src.is_empty() && !self.transformer.has_pending() {
            return Ok(None);
        }
        self.run(src, true)
    }
}
