//! Incremental decoder for the engine's `text/event-stream` chunks.
//!
//! Network reads do not align with event boundaries, so the decoder buffers
//! partial lines across `feed` calls and yields complete content fragments
//! as they become available.

use crate::wire::ChatCompletionChunk;

/// Streaming SSE decoder for chat-completion chunks.
#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    buffer: String,
    done: bool,
}

impl SseDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes from the wire, returning any content fragments that
    /// completed with this read.
    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }

        self.buffer.push_str(&String::from_utf8_lossy(bytes));
        let mut fragments = Vec::new();

        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            let Some(payload) = line.strip_prefix("data:").map(str::trim_start) else {
                continue;
            };

            if payload == "[DONE]" {
                self.done = true;
                break;
            }

            match serde_json::from_str::<ChatCompletionChunk>(payload) {
                Ok(chunk) => {
                    if let Some(content) = chunk
                        .choices
                        .first()
                        .and_then(|choice| choice.delta.content.as_deref())
                        && !content.is_empty()
                    {
                        fragments.push(content.to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable stream chunk");
                }
            }
        }

        fragments
    }

    /// Whether the terminal sentinel has been seen.
    pub(crate) fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_line(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{content}\"}}}}]}}\n\n"
        )
    }

    #[test]
    fn whole_events_yield_fragments() {
        let mut decoder = SseDecoder::new();
        let fragments = decoder.feed(chunk_line("Hello").as_bytes());
        assert_eq!(fragments, vec!["Hello".to_string()]);
        assert!(!decoder.is_done());
    }

    #[test]
    fn split_reads_are_reassembled() {
        let mut decoder = SseDecoder::new();
        let line = chunk_line("world");
        let (head, tail) = line.split_at(10);

        assert!(decoder.feed(head.as_bytes()).is_empty());
        assert_eq!(decoder.feed(tail.as_bytes()), vec!["world".to_string()]);
    }

    #[test]
    fn done_sentinel_stops_decoding() {
        let mut decoder = SseDecoder::new();
        let input = format!("{}data: [DONE]\n\n{}", chunk_line("a"), chunk_line("b"));
        let fragments = decoder.feed(input.as_bytes());
        assert_eq!(fragments, vec!["a".to_string()]);
        assert!(decoder.is_done());
        assert!(decoder.feed(chunk_line("c").as_bytes()).is_empty());
    }

    #[test]
    fn empty_deltas_and_comments_are_skipped() {
        let mut decoder = SseDecoder::new();
        let input = ": keep-alive\n\ndata: {\"choices\":[{\"delta\":{}}]}\n\n";
        assert!(decoder.feed(input.as_bytes()).is_empty());
    }

    #[test]
    fn malformed_chunks_do_not_poison_the_stream() {
        let mut decoder = SseDecoder::new();
        let input = format!("data: not-json\n\n{}", chunk_line("ok"));
        assert_eq!(decoder.feed(input.as_bytes()), vec!["ok".to_string()]);
    }
}
