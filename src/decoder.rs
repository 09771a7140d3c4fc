//! Incremental decoder for the line-framed, tagged text-delta stream.
//!
//! Wire format: one frame per line, `<tag>:<payload>\n`. Tag `0` carries a JSON string
//! literal to append; tag `d` is the finish message. Anything else, and any line whose
//! payload does not parse, is protocol noise and decodes to [`StreamFrame::Ignored`].
//!
//! Chunks may split lines and UTF-8 sequences anywhere. Bytes are buffered until a
//! newline arrives, so the decoded text is identical however the input was sliced.

use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;

/// Tag of a text-delta line.
pub const TEXT_DELTA_TAG: &str = "0";
/// Tag of the finish-message line.
pub const FINISH_TAG: &str = "d";

/// One decoded unit of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    TextDelta(String),
    EndOfStream,
    Ignored,
}

/// Stateful decoder for a single stream. Not shareable across streams.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already searched for a newline.
    scanned: usize,
    finished: bool,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw chunk, returning the frames for every line it completed.
    ///
    /// Input after an end-of-stream frame is discarded.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        let mut frames = Vec::new();
        if self.finished {
            return frames;
        }

        self.buffer.extend_from_slice(chunk);
        let mut consumed = 0;
        let mut search_from = self.scanned;
        while let Some(offset) = self.buffer[search_from..].iter().position(|b| *b == b'\n') {
            let end = search_from + offset;
            if let Some(frame) = decode_line(&self.buffer[consumed..end]) {
                let is_end = frame == StreamFrame::EndOfStream;
                frames.push(frame);
                if is_end {
                    self.finished = true;
                    self.buffer.clear();
                    self.scanned = 0;
                    return frames;
                }
            }
            consumed = end + 1;
            search_from = consumed;
        }
        self.buffer.drain(..consumed);
        self.scanned = self.buffer.len();
        frames
    }

    /// Flush the trailing partial line and terminate the sequence.
    ///
    /// A malformed trailing line is dropped. The result always ends with
    /// [`StreamFrame::EndOfStream`] unless one was already produced.
    pub fn finish(&mut self) -> Vec<StreamFrame> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;

        let tail = std::mem::take(&mut self.buffer);
        self.scanned = 0;
        let mut frames = Vec::with_capacity(2);
        match decode_line(&tail) {
            Some(StreamFrame::EndOfStream) | None => {}
            Some(frame) => frames.push(frame),
        }
        frames.push(StreamFrame::EndOfStream);
        frames
    }

    /// Bytes held back waiting for a newline.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Decode one complete line (without its `\n`). Empty lines produce no frame.
pub fn decode_line(line: &[u8]) -> Option<StreamFrame> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return None;
    }

    let Ok(text) = std::str::from_utf8(line) else {
        return Some(StreamFrame::Ignored);
    };
    let Some((tag, payload)) = text.split_once(':') else {
        return Some(StreamFrame::Ignored);
    };

    let frame = match tag {
        TEXT_DELTA_TAG => serde_json::from_str::<String>(payload)
            .map(StreamFrame::TextDelta)
            .unwrap_or(StreamFrame::Ignored),
        FINISH_TAG => serde_json::from_str::<serde_json::Value>(payload)
            .map(|_| StreamFrame::EndOfStream)
            .unwrap_or(StreamFrame::Ignored),
        _ => StreamFrame::Ignored,
    };
    Some(frame)
}

/// Decode a whole in-memory body, keeping only the appended text.
pub fn decode_all(chunks: &[&[u8]]) -> String {
    let mut decoder = StreamDecoder::new();
    let mut frames = Vec::new();
    for chunk in chunks {
        frames.extend(decoder.push(chunk));
    }
    frames.extend(decoder.finish());

    let mut text = String::new();
    for frame in frames {
        match frame {
            StreamFrame::TextDelta(delta) => text.push_str(&delta),
            StreamFrame::EndOfStream => break,
            StreamFrame::Ignored => {}
        }
    }
    text
}

struct FrameState<S> {
    upstream: S,
    decoder: StreamDecoder,
    pending: VecDeque<StreamFrame>,
    exhausted: bool,
}

/// Adapt a chunk stream into a lazy, ordered stream of frames.
///
/// The frame stream ends after `EndOfStream`. An upstream error is yielded once and
/// ends the sequence without an end marker.
pub fn decode_frames<S, B, E>(upstream: S) -> impl Stream<Item = Result<StreamFrame, E>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    let state = FrameState {
        upstream,
        decoder: StreamDecoder::new(),
        pending: VecDeque::new(),
        exhausted: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.pending.pop_front() {
                if frame == StreamFrame::EndOfStream {
                    state.exhausted = true;
                    state.pending.clear();
                }
                return Some((Ok(frame), state));
            }
            if state.exhausted {
                return None;
            }
            match state.upstream.next().await {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.push(chunk.as_ref());
                    state.pending.extend(frames);
                }
                Some(Err(e)) => {
                    state.exhausted = true;
                    return Some((Err(e), state));
                }
                None => {
                    let frames = state.decoder.finish();
                    state.pending.extend(frames);
                }
            }
        }
    })
}
