//! Audio playback for winning songs
//!
//! Uploaded clips are decoded straight from memory. URL references are not
//! streamed here; the UI offers them as links instead.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;
use wheel_shared::{AudioClip, AudioRef};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No audio output available: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("Could not start playback: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("Could not decode {file}: {source}")]
    Decode {
        file: String,
        source: rodio::decoder::DecoderError,
    },
}

/// Lazily opened output device plus the clip currently playing
#[derive(Default)]
pub struct Player {
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
    now_playing: Option<String>,
}

impl Player {
    fn handle(&mut self) -> Result<&OutputStreamHandle, PlaybackError> {
        if self.output.is_none() {
            self.output = Some(OutputStream::try_default()?);
            log::debug!("Opened default audio output");
        }
        match &self.output {
            Some((_, handle)) => Ok(handle),
            None => Err(PlaybackError::Output(rodio::StreamError::NoDevice)),
        }
    }

    /// Play an uploaded clip, replacing whatever is playing
    pub fn play_clip(&mut self, clip: &AudioClip) -> Result<(), PlaybackError> {
        self.stop();

        let source = Cursor::new(Arc::clone(&clip.bytes));
        let decoder = Decoder::new(source).map_err(|source| PlaybackError::Decode {
            file: clip.file_name.clone(),
            source,
        })?;

        let sink = Sink::try_new(self.handle()?)?;
        sink.append(decoder);
        self.sink = Some(sink);
        self.now_playing = Some(clip.file_name.clone());
        log::info!("Playing {} ({})", clip.file_name, clip.mime);
        Ok(())
    }

    /// Play an entry's audio if it is a clip; returns whether playback started
    pub fn play(&mut self, audio: &AudioRef) -> Result<bool, PlaybackError> {
        match audio {
            AudioRef::Clip(clip) => self.play_clip(clip).map(|_| true),
            AudioRef::Url(_) => Ok(false),
        }
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.now_playing = None;
    }

    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|s| !s.empty()).unwrap_or(false)
    }

    /// File name of the clip playing right now
    pub fn now_playing(&self) -> Option<&str> {
        if self.is_playing() {
            self.now_playing.as_deref()
        } else {
            None
        }
    }
}
