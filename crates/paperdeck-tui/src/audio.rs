//! In-terminal playback of generated podcast MP3s.
//!
//! Uses rodio for cross-platform audio output. The MP3 bytes are fetched
//! over the API client and decoded from an in-memory cursor; nothing is
//! written to disk.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// Result of a background MP3 fetch, delivered to the UI loop.
#[derive(Debug)]
pub struct AudioResult {
    pub paper_id: String,
    pub result: Result<Vec<u8>, String>,
}

pub struct AudioPlayer {
    /// Output stream handle (must be kept alive for playback).
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    /// Current sink for playback control.
    sink: Arc<Mutex<Option<Sink>>>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(err) => {
                tracing::warn!("failed to initialize audio output: {}", err);
                (None, None)
            }
        };
        Self {
            _stream: stream,
            stream_handle,
            sink: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.stream_handle.is_some()
    }

    /// Decodes and plays an MP3 held in memory, replacing whatever was
    /// playing before.
    pub fn play_bytes(&self, bytes: Vec<u8>) -> Result<(), String> {
        let stream_handle = self
            .stream_handle
            .as_ref()
            .ok_or_else(|| "audio output not available".to_string())?;
        let source = Decoder::new(Cursor::new(bytes))
            .map_err(|err| format!("failed to decode audio: {err}"))?;
        let sink = Sink::try_new(stream_handle)
            .map_err(|err| format!("failed to create audio sink: {err}"))?;
        sink.append(source);
        let mut guard = self.sink.lock().unwrap();
        if let Some(previous) = guard.take() {
            previous.stop();
        }
        *guard = Some(sink);
        Ok(())
    }

    pub fn stop(&self) {
        if let Some(sink) = self.sink.lock().unwrap().take() {
            sink.stop();
        }
    }

    /// True when nothing is queued (playback ran to the end or was
    /// stopped).
    pub fn finished(&self) -> bool {
        self.sink
            .lock()
            .unwrap()
            .as_ref()
            .map(|sink| sink.empty())
            .unwrap_or(true)
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}
