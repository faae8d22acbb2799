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

//! Tests for AnsiTransformer span queries

use std::collections::HashMap;
use termionix_ansitransform::{
    AnsiTransformer, Progress, SpanningTransformer, TitleCase, TransformError, TransformResult,
    Transformer,
};

/// Copies input, with no span capability.
struct NonSpanning;

impl Transformer for NonSpanning {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], _at_eof: bool) -> Progress {
        let count = src.len().min(dst.len());
        dst[..count].copy_from_slice(&src[..count]);
        if count < src.len() {
            Progress::stopped(count, count, TransformError::ShortDestination)
        } else {
            Progress::complete(count, count)
        }
    }
}

/// Answers span queries from a table keyed by segment text.
#[derive(Default)]
struct TableSpanning {
    spans: HashMap<Vec<u8>, usize>,
    queried: Vec<Vec<u8>>,
    reset_called: bool,
}

impl TableSpanning {
    fn new(spans: &[(&str, usize)]) -> Self {
        Self {
            spans: spans
                .iter()
                .map(|(text, len)| (text.as_bytes().to_vec(), *len))
                .collect(),
            ..Default::default()
        }
    }
}

impl Transformer for TableSpanning {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        NonSpanning.transform(dst, src, at_eof)
    }

    fn reset(&mut self) {
        self.reset_called = true;
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        Some(self)
    }
}

impl SpanningTransformer for TableSpanning {
    fn span(&mut self, src: &[u8], _at_eof: bool) -> TransformResult<usize> {
        self.queried.push(src.to_vec());
        // Unknown text is assumed to need transformation.
        Ok(self.spans.get(src).copied().unwrap_or(0))
    }
}

/// Fails every span query.
struct FailingSpan;

impl Transformer for FailingSpan {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        NonSpanning.transform(dst, src, at_eof)
    }

    fn as_spanning(&mut self) -> Option<&mut dyn SpanningTransformer> {
        Some(self)
    }
}

impl SpanningTransformer for FailingSpan {
    fn span(&mut self, _src: &[u8], _at_eof: bool) -> TransformResult<usize> {
        Err(TransformError::Other("span failed".to_string()))
    }
}

#[test]
fn test_span_inner_not_spanning() {
    let cases: &[(&str, &str, bool, usize)] = &[
        ("empty", "", true, 0),
        ("plain text", "hello", true, 0),
        ("single SGR sequence", "\x1b[31m", true, 5),
        ("multiple SGR sequences", "\x1b[31m\x1b[1m", true, 9),
        ("SGR then text", "\x1b[31mhello", true, 5),
        ("text then SGR", "hello\x1b[31m", true, 0),
        ("SGR, text, SGR", "\x1b[1mhello\x1b[0m", true, 4),
        ("text, SGR, text", "a\x1b[1mb\x1b[0mc", true, 0),
        ("SGR, text, SGR, text", "\x1b[1ma\x1b[0mb", true, 4),
        ("partial SGR sequence", "\x1b[31", false, 0),
        ("text then partial SGR", "text\x1b[31", false, 0),
        ("SGR then partial SGR", "\x1b[32m\x1b[0m\x1b[31", false, 9),
        ("SGR, text, then partial SGR", "\x1b[32mtext\x1b[0m\x1b[31", false, 5),
        ("non-SGR CSI is text", "\x1b[2Jhello", true, 0),
        ("lone ESC is partial", "\x1b", false, 0),
        ("ESC then non-bracket is text", "\x1bA", true, 0),
    ];

    for (name, input, at_eof, expected) in cases {
        let mut transformer = AnsiTransformer::new(NonSpanning);
        let span = transformer.span(input.as_bytes(), *at_eof).unwrap();
        assert_eq!(span, *expected, "{name}: {input:?}");
    }
}

#[test]
fn test_span_inner_spanning() {
    let cases: &[(&str, &str, bool, &[(&str, usize)], usize)] = &[
        ("empty", "", true, &[], 0),
        ("inner spans all", "hello", true, &[("hello", 5)], 5),
        ("inner spans none", "hello", true, &[("hello", 0)], 0),
        ("inner spans some", "helloworld", true, &[("helloworld", 5)], 0),
        ("SGR only", "\x1b[31m\x1b[0m", true, &[], 9),
        (
            "SGR then text, inner spans text",
            "\x1b[31mTEXT\x1b[0mhello",
            true,
            &[("TEXT", 4), ("hello", 5)],
            18,
        ),
        (
            "SGR then text, inner stops at latter text",
            "\x1b[31mTEXT\x1b[0mtransform",
            true,
            &[("TEXT", 4), ("transform", 0)],
            13,
        ),
        (
            "text then SGR, inner spans text",
            "hello\x1b[31mTEXT\x1b[0m",
            true,
            &[("hello", 5), ("TEXT", 4)],
            18,
        ),
        (
            "text then SGR, inner stops at text",
            "hello\x1b[31mTEXT\x1b[0m",
            true,
            &[("hello", 0), ("TEXT", 4)],
            0,
        ),
        (
            "interleaved, all text spanned",
            "text1\x1b[1mBOLD\x1b[0mtext2",
            true,
            &[("text1", 5), ("BOLD", 4), ("text2", 5)],
            22,
        ),
        (
            "interleaved, middle text not spanned",
            "text1\x1b[1mtransform_me\x1b[0mtext2",
            true,
            &[("text1", 5), ("transform_me", 0), ("text2", 5)],
            9,
        ),
        (
            "text then partial SGR",
            "text1\x1b[31",
            false,
            &[("text1", 5)],
            5,
        ),
        (
            "non-SGR CSI is one text segment",
            "\x1b[2Jhello",
            true,
            &[("\x1b[2Jhello", 9)],
            9,
        ),
    ];

    for (name, input, at_eof, spans, expected) in cases {
        let mut transformer = AnsiTransformer::new(TableSpanning::new(spans));
        let span = transformer.span(input.as_bytes(), *at_eof).unwrap();
        assert_eq!(span, *expected, "{name}: {input:?}");
    }
}

#[test]
fn test_span_stops_querying_after_first_transformed_segment() {
    let mut transformer = AnsiTransformer::new(TableSpanning::new(&[("a", 0), ("b", 1)]));
    assert_eq!(transformer.span(b"a\x1b[1mb", true).unwrap(), 0);
    assert_eq!(transformer.inner().queried, vec![b"a".to_vec()]);
}

#[test]
fn test_span_propagates_inner_errors() {
    let mut transformer = AnsiTransformer::new(FailingSpan);
    assert!(matches!(
        transformer.span(b"\x1b[1mtext", true),
        Err(TransformError::Other(_))
    ));
    // Sequences alone never reach the inner transformer.
    assert_eq!(transformer.span(b"\x1b[1m", true).unwrap(), 4);
}

#[test]
fn test_span_with_held_bytes() {
    let mut transformer = AnsiTransformer::new(TitleCase::new());
    let mut tmp = [0u8; 100];

    let progress = transformer.transform(&mut tmp, b"text\x1b[31", false);
    assert!(progress.result.is_ok());
    assert_eq!(progress.consumed, 4);
    assert_eq!(transformer.pending(), b"\x1b[31");

    assert_eq!(transformer.span(b"more data to span", false).unwrap(), 0);
}

/// Spans `input`, copies the span and transforms the rest on the same instance.
fn span_then_transform(input: &[u8]) -> (usize, Vec<u8>) {
    let mut transformer = AnsiTransformer::new(TitleCase::new());
    let span = transformer.span(input, true).unwrap();
    let mut out = input[..span].to_vec();
    transformer.transform_chunk(&input[span..], true, &mut out).unwrap();
    (span, out)
}

#[test]
fn test_transform_after_short_span_continues_correctly() {
    let cases: &[(&str, usize, &str)] = &[
        ("AbC", 0, "Abc"),
        ("\x1b[1mAbC", 4, "\x1b[1mAbc"),
        ("Ok\x1b[0mAY", 6, "Ok\x1b[0may"),
        ("Go \x1b[32mpass\x1b[0m", 8, "Go \x1b[32mPass\x1b[0m"),
        ("Done\x1b[0m", 8, "Done\x1b[0m"),
        ("Tail\x1b[1", 4, "Tail\x1b[1"),
    ];

    for (input, span, expected) in cases {
        let (got_span, out) = span_then_transform(input.as_bytes());
        assert_eq!(got_span, *span, "span of {input:?}");
        assert_eq!(out, expected.as_bytes(), "output of {input:?}");

        let fresh = AnsiTransformer::new(TitleCase::new())
            .transform_bytes(input.as_bytes())
            .unwrap();
        assert_eq!(out, fresh, "fresh output of {input:?}");
    }
}

#[test]
fn test_span_after_reset_with_title_case() {
    let mut transformer = AnsiTransformer::new(TitleCase::new());
    let mut tmp = [0u8; 100];
    let _ = transformer.transform(&mut tmp, b"text\x1b[31", false);

    transformer.reset();
    assert!(!transformer.has_pending());
    // "more" would become "More", so nothing can be spanned.
    assert_eq!(transformer.span(b"more data to span", false).unwrap(), 0);
    assert_eq!(transformer.span(b"\x1b[1mAlready Titled", true).unwrap(), 18);
}

#[test]
fn test_span_after_reset_with_table() {
    let mut transformer =
        AnsiTransformer::new(TableSpanning::new(&[("fully spannable data", 20)]));
    let mut tmp = [0u8; 100];
    let _ = transformer.transform(&mut tmp, b"\x1b[", false);
    assert!(transformer.has_pending());

    transformer.reset();
    assert!(transformer.inner().reset_called);
    assert!(!transformer.has_pending());
    assert_eq!(
        transformer.span(b"fully spannable data", false).unwrap(),
        20
    );
}

#[test]
fn test_span_tracks_word_state_across_sequences() {
    // "Bar" continues the word "Foo", so transforming would lower-case it.
    let mut transformer = AnsiTransformer::new(TitleCase::new());
    assert_eq!(transformer.span(b"Foo\x1b[0mBar", true).unwrap(), 7);

    let mut transformer = AnsiTransformer::new(TitleCase::new());
    assert_eq!(transformer.span(b"Foo \x1b[0mBar", true).unwrap(), 11);
}
