//! Voice note capture.
//!
//! The recorder only accumulates PCM16 samples handed to it by a platform
//! audio source. Stopping finalizes whatever was captured into a WAV voice
//! note that becomes a voice block.

use std::io::Cursor;

use crate::error::{Error, Result};
use crate::media::MediaPayload;

/// File name given to every finalized voice note.
pub const VOICE_NOTE_FILE_NAME: &str = "voice-note.wav";

/// Voice memo WAV encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceMemoOptions {
    /// PCM sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Number of interleaved audio channels.
    pub channels: u16,
}

impl Default for VoiceMemoOptions {
    fn default() -> Self {
        Self {
            sample_rate_hz: 16_000,
            channels: 1,
        }
    }
}

impl VoiceMemoOptions {
    fn validate(self) -> Result<Self> {
        if self.sample_rate_hz == 0 {
            return Err(Error::InvalidInput(
                "Voice memo sample_rate_hz must be greater than zero".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(Error::InvalidInput(
                "Voice memo channels must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Grants or refuses microphone access.
pub trait MicrophoneAccess {
    /// Returns `PermissionDenied` when the user or platform refuses access.
    fn request_access(&self) -> Result<()>;
}

/// Access source with a fixed answer, for front ends without a permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticMicrophoneAccess {
    pub granted: bool,
}

impl MicrophoneAccess for StaticMicrophoneAccess {
    fn request_access(&self) -> Result<()> {
        if self.granted {
            Ok(())
        } else {
            Err(Error::PermissionDenied(
                "microphone access was refused".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecorderState {
    Idle,
    Recording { samples: Vec<i16> },
}

/// Idle/recording state machine for a single voice note at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRecorder {
    options: VoiceMemoOptions,
    state: RecorderState,
}

impl Default for VoiceRecorder {
    fn default() -> Self {
        Self::new(VoiceMemoOptions::default())
    }
}

impl VoiceRecorder {
    pub const fn new(options: VoiceMemoOptions) -> Self {
        Self {
            options,
            state: RecorderState::Idle,
        }
    }

    pub const fn options(&self) -> VoiceMemoOptions {
        self.options
    }

    pub const fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Begin capturing after asking for microphone access.
    pub fn start(&mut self, access: &(impl MicrophoneAccess + ?Sized)) -> Result<()> {
        if self.is_recording() {
            return Err(Error::InvalidInput(
                "A voice note is already being recorded".to_string(),
            ));
        }
        self.options.validate()?;
        access.request_access()?;

        self.state = RecorderState::Recording {
            samples: Vec::new(),
        };
        tracing::info!(
            sample_rate_hz = self.options.sample_rate_hz,
            channels = self.options.channels,
            "Voice recording started"
        );
        Ok(())
    }

    /// Append interleaved samples; ignored while idle.
    pub fn push_samples(&mut self, chunk: &[i16]) {
        if let RecorderState::Recording { samples } = &mut self.state {
            samples.extend_from_slice(chunk);
        }
    }

    /// Whole seconds captured so far.
    pub fn elapsed_seconds(&self) -> u64 {
        match &self.state {
            RecorderState::Idle => 0,
            RecorderState::Recording { samples } => {
                estimate_voice_memo_duration_ms(samples.len(), self.options).unwrap_or(0) / 1_000
            }
        }
    }

    /// Recording timer label, `MM:SS`.
    pub fn elapsed_label(&self) -> String {
        format_recording_time(self.elapsed_seconds())
    }

    /// Finish the recording and encode it; `None` when nothing was recording.
    pub fn stop(&mut self) -> Result<Option<MediaPayload>> {
        let RecorderState::Recording { samples } =
            std::mem::replace(&mut self.state, RecorderState::Idle)
        else {
            return Ok(None);
        };

        let bytes = encode_voice_memo_wav(&samples, self.options)?;
        tracing::info!(
            samples = samples.len(),
            bytes = bytes.len(),
            "Voice recording finalized"
        );
        Ok(Some(MediaPayload::from_bytes(
            VOICE_NOTE_FILE_NAME,
            "audio/wav",
            &bytes,
        )))
    }
}

/// `MM:SS`; minutes keep counting past an hour.
pub fn format_recording_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Encode interleaved PCM16 samples as a WAV byte buffer.
pub fn encode_voice_memo_wav(samples_pcm16: &[i16], options: VoiceMemoOptions) -> Result<Vec<u8>> {
    let options = options.validate()?;

    let spec = hound::WavSpec {
        channels: options.channels,
        sample_rate: options.sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(|error| {
            Error::InvalidInput(format!("Failed to initialize WAV writer: {error}"))
        })?;

        for &sample in samples_pcm16 {
            writer.write_sample(sample).map_err(|error| {
                Error::InvalidInput(format!("Failed to write WAV sample: {error}"))
            })?;
        }

        writer.finalize().map_err(|error| {
            Error::InvalidInput(format!("Failed to finalize WAV data: {error}"))
        })?;
    }

    Ok(cursor.into_inner())
}

/// Estimate voice memo duration in milliseconds for interleaved PCM samples.
pub fn estimate_voice_memo_duration_ms(
    sample_count: usize,
    options: VoiceMemoOptions,
) -> Result<u64> {
    let options = options.validate()?;
    let channels = usize::from(options.channels);

    let frame_count = sample_count / channels;
    let duration_ms = (frame_count as u128)
        .saturating_mul(1_000)
        .saturating_div(u128::from(options.sample_rate_hz));

    Ok(u64::try_from(duration_ms).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::decode_data_uri;

    const GRANTED: StaticMicrophoneAccess = StaticMicrophoneAccess { granted: true };
    const REFUSED: StaticMicrophoneAccess = StaticMicrophoneAccess { granted: false };

    #[test]
    fn refused_access_is_permission_denied() {
        let mut recorder = VoiceRecorder::default();
        let error = recorder.start(&REFUSED).unwrap_err();
        assert!(matches!(error, Error::PermissionDenied(_)));
        assert!(!recorder.is_recording());
    }

    #[test]
    fn starting_twice_is_rejected() {
        let mut recorder = VoiceRecorder::default();
        recorder.start(&GRANTED).unwrap();
        assert!(matches!(
            recorder.start(&GRANTED),
            Err(Error::InvalidInput(_))
        ));
        assert!(recorder.is_recording());
    }

    #[test]
    fn stop_while_idle_is_noop() {
        let mut recorder = VoiceRecorder::default();
        recorder.push_samples(&[1, 2, 3]);
        assert_eq!(recorder.stop().unwrap(), None);
    }

    #[test]
    fn stop_finalizes_captured_audio() {
        let mut recorder = VoiceRecorder::default();
        recorder.start(&GRANTED).unwrap();
        recorder.push_samples(&[0, 1200, -1200]);
        recorder.push_samples(&[300, -300]);

        let payload = recorder.stop().unwrap().unwrap();
        assert!(!recorder.is_recording());
        assert_eq!(payload.file_name, VOICE_NOTE_FILE_NAME);
        assert_eq!(payload.mime_type(), Some("audio/wav"));

        let bytes = decode_data_uri(&payload.data_uri).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let decoded: Vec<i16> = reader
            .samples::<i16>()
            .map(std::result::Result::unwrap)
            .collect();
        assert_eq!(decoded, vec![0, 1200, -1200, 300, -300]);
    }

    #[test]
    fn elapsed_label_tracks_captured_samples() {
        let mut recorder = VoiceRecorder::default();
        assert_eq!(recorder.elapsed_label(), "00:00");

        recorder.start(&GRANTED).unwrap();
        recorder.push_samples(&vec![0; 16_000 * 75]);
        assert_eq!(recorder.elapsed_label(), "01:15");
    }

    #[test]
    fn format_recording_time_pads_fields() {
        assert_eq!(format_recording_time(0), "00:00");
        assert_eq!(format_recording_time(59), "00:59");
        assert_eq!(format_recording_time(61), "01:01");
        assert_eq!(format_recording_time(3_725), "62:05");
    }

    #[test]
    fn wav_encoding_generates_valid_header_and_sample_count() {
        let samples = vec![0_i16, 1200, -1200, 300, -300];

        let bytes = encode_voice_memo_wav(
            &samples,
            VoiceMemoOptions {
                sample_rate_hz: 16_000,
                channels: 1,
            },
        )
        .unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
    }

    #[test]
    fn duration_estimation_handles_mono_and_stereo() {
        let mono = estimate_voice_memo_duration_ms(16_000, VoiceMemoOptions::default()).unwrap();
        assert_eq!(mono, 1_000);

        // 2 channels interleaved: 32_000 samples = 16_000 frames = 1 second
        let stereo = estimate_voice_memo_duration_ms(
            32_000,
            VoiceMemoOptions {
                sample_rate_hz: 16_000,
                channels: 2,
            },
        )
        .unwrap();
        assert_eq!(stereo, 1_000);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut recorder = VoiceRecorder::new(VoiceMemoOptions {
            sample_rate_hz: 0,
            channels: 1,
        });
        assert!(matches!(
            recorder.start(&GRANTED),
            Err(Error::InvalidInput(_))
        ));

        let err = estimate_voice_memo_duration_ms(
            100,
            VoiceMemoOptions {
                sample_rate_hz: 16_000,
                channels: 0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
