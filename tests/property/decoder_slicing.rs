//! Decoded text must not depend on how the byte stream was chunked.

use proptest::prelude::*;
use skillwright::decoder::{decode_all, StreamDecoder, StreamFrame};

/// Encode deltas as a wire body, with noise lines between them.
fn encode(deltas: &[String], noise: bool) -> Vec<u8> {
    let mut body = String::new();
    for delta in deltas {
        body.push_str("0:");
        body.push_str(&serde_json::to_string(delta).unwrap());
        body.push('\n');
        if noise {
            body.push_str("2:[{\"progress\":1}]\n");
        }
    }
    body.push_str("d:{\"finishReason\":\"stop\"}\n");
    body.into_bytes()
}

/// Cut `body` at the given offsets (taken modulo its length).
fn slice(body: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (body.len() + 1)).collect();
    points.push(0);
    points.push(body.len());
    points.sort_unstable();
    points.dedup();
    points
        .windows(2)
        .map(|w| body[w[0]..w[1]].to_vec())
        .collect()
}

proptest! {
    #[test]
    fn prop_slicing_does_not_change_text(
        deltas in prop::collection::vec(any::<String>(), 0..8),
        cuts in prop::collection::vec(any::<usize>(), 0..24),
        noise in any::<bool>(),
    ) {
        let body = encode(&deltas, noise);
        let expected: String = deltas.concat();

        let whole = decode_all(&[body.as_slice()]);
        prop_assert_eq!(&whole, &expected);

        let pieces = slice(&body, &cuts);
        let refs: Vec<&[u8]> = pieces.iter().map(Vec::as_slice).collect();
        prop_assert_eq!(decode_all(&refs), expected);
    }

    #[test]
    fn prop_byte_at_a_time_matches(text in "\\PC{0,40}") {
        let body = encode(&[text.clone()], false);
        let mut decoder = StreamDecoder::new();
        let mut decoded = String::new();
        let mut ended = false;
        for byte in &body {
            for frame in decoder.push(std::slice::from_ref(byte)) {
                match frame {
                    StreamFrame::TextDelta(delta) => decoded.push_str(&delta),
                    StreamFrame::EndOfStream => ended = true,
                    StreamFrame::Ignored => {}
                }
            }
        }
        prop_assert!(ended);
        prop_assert_eq!(decoded, text);
    }
}

#[test]
fn test_arbitrary_bytes_never_panic() {
    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(
            &prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..8),
            |chunks| {
                let mut decoder = StreamDecoder::new();
                for chunk in &chunks {
                    decoder.push(chunk);
                }
                let tail = decoder.finish();
                if !tail.is_empty() {
                    assert_eq!(tail.last(), Some(&StreamFrame::EndOfStream));
                }
                Ok(())
            },
        )
        .unwrap();
}
