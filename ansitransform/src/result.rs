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

//! Error types for the ansitransform crate.

use thiserror::Error;

/// Result type alias for operations that may fail with a [`TransformError`].
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors reported by transformers and the drivers built on top of them.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The destination buffer cannot hold the next piece of output.
    ///
    /// Recoverable: drain or enlarge the destination and call again. An
    /// [`AnsiTransformer`](crate::AnsiTransformer) keeps every unconsumed byte, so
    /// the retry passes only new input (possibly none).
    #[error("destination buffer too short")]
    ShortDestination,

    /// More input is required before the remaining source can be transformed,
    /// typically a multi-byte character split across chunks.
    #[error("source buffer too short")]
    ShortSource,

    /// The transformed output is not valid UTF-8.
    #[error("invalid UTF-8 in transformed output at position {position}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid byte in the output
        position: usize,
    },

    /// I/O error from a stream feeding the codec
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Inner transformer failure with a message
    #[error("{0}")]
    Other(String),
}

impl TransformError {
    /// Check if the error is recoverable
    ///
    /// Recoverable errors signal a buffer boundary rather than bad input; calling
    /// again with more room or more input makes progress.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TransformError::ShortDestination | TransformError::ShortSource
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(TransformError::ShortDestination.is_recoverable());
        assert!(TransformError::ShortSource.is_recoverable());
        assert!(!TransformError::InvalidUtf8 { position: 3 }.is_recoverable());
        assert!(!TransformError::Other("boom".to_string()).is_recoverable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransformError::ShortDestination.to_string(),
            "destination buffer too short"
        );
        assert_eq!(
            TransformError::InvalidUtf8 { position: 7 }.to_string(),
            "invalid UTF-8 in transformed output at position 7"
        );
    }

    #[test]
    fn test_from_io_error() {
        let error: TransformError =
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(error, TransformError::Io(_)));
        assert!(!error.is_recoverable());
    }
}
