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

//! Text transformations for terminal output that leave ANSI colour codes alone.
//!
//! [`AnsiTransformer`] wraps any chunked [`Transformer`] (for example
//! [`TitleCase`]) and routes only the plain text between SGR sequences to it.
//! It can be driven one chunk at a time, including chunks that split an escape
//! sequence or a multi-byte character, through the one-shot helpers, or as a
//! tokio [`Decoder`](tokio_util::codec::Decoder) via [`AnsiTransformCodec`].

mod codec;
mod config;
mod consts;
mod result;
pub mod segment;
pub mod sequence;
mod string;
mod titlecase;
mod traits;
mod transformer;

pub use self::codec::AnsiTransformCodec;
pub use self::config::AnsiTransformConfig;
pub use self::consts::{ESC, MAX_SEQUENCE_LENGTH};
pub use self::result::{TransformError, TransformResult};
pub use self::segment::{Segment, SegmentKind, Segments};
pub use self::sequence::{Recognized, recognize_sgr};
pub use self::titlecase::TitleCase;
pub use self::traits::{Passthrough, Progress, SpanningTransformer, Transformer};
pub use self::transformer::AnsiTransformer;
