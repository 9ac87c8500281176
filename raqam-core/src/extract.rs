//! Digit-run extraction from free text.

use serde::{Deserialize, Serialize};

use crate::script::NumeralScript;

/// A run of digits found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSpan {
    pub value: u64,
    /// Byte offsets into the original text.
    pub start: usize,
    pub end: usize,
    /// Script of the run's first digit.
    pub script: NumeralScript,
}

/// Every maximal digit run in `text`, in order of appearance.
///
/// Runs whose value does not fit in a `u64` are skipped.
pub fn extract_spans(text: &str) -> Vec<NumberSpan> {
    let mut spans = Vec::new();
    let mut current: Option<(usize, NumeralScript, Option<u64>)> = None;

    for (idx, ch) in text.char_indices() {
        let Some(digit) = NumeralScript::digit_value(ch) else {
            if let Some(run) = current.take() {
                push_run(&mut spans, text, run, idx);
            }
            continue;
        };

        match current.as_mut() {
            Some((_, _, value)) => {
                *value = value
                    .and_then(|v| v.checked_mul(10))
                    .and_then(|v| v.checked_add(digit as u64));
            }
            None => {
                if let Some(script) = NumeralScript::of(ch) {
                    current = Some((idx, script, Some(digit as u64)));
                }
            }
        }
    }

    if let Some(run) = current.take() {
        push_run(&mut spans, text, run, text.len());
    }

    spans
}

fn push_run(
    spans: &mut Vec<NumberSpan>,
    text: &str,
    (start, script, value): (usize, NumeralScript, Option<u64>),
    end: usize,
) {
    match value {
        Some(value) => spans.push(NumberSpan {
            value,
            start,
            end,
            script,
        }),
        None => tracing::debug!(run = &text[start..end], "digit run overflows u64, skipped"),
    }
}

/// Values of every digit run in `text`, in order of appearance.
///
/// A run too long to fit in a `u64` is dropped from the result rather than
/// truncated, so the output can hold fewer values than the text has runs.
pub fn extract_numbers(text: &str) -> Vec<u64> {
    extract_spans(text).into_iter().map(|span| span.value).collect()
}
