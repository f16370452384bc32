//! Live audio output through cpal.

use crate::SAMPLE_RATE;
use crate::config::AudioConfig;
use crate::error::{Error, Result};
use crate::mixer::MixBus;
use crate::synth::Frame;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    BufferSize, BuildStreamError, FromSample, Sample, SampleFormat, SampleRate, SizedSample,
    StreamConfig,
};
use std::sync::Arc;

/// Owns the output stream and the [`MixBus`] it pulls from.
///
/// The bus is created when the stream opens and outlives it: [`close`] stops
/// the stream first, so no render pass can be running when the last handle to
/// the bus goes away.
///
/// [`close`]: AudioDriver::close
pub struct AudioDriver {
    bus: Arc<MixBus>,
    stream: cpal::Stream,
    config: StreamConfig,
}

impl AudioDriver {
    /// Opens a stereo stream on the default output device and starts it.
    pub fn open(config: &AudioConfig) -> Result<Self> {
        config.validate()?;

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;
        let sample_format = device.default_output_config()?.sample_format();
        let bus = Arc::new(MixBus::new());

        let mut stream_config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: BufferSize::Fixed(config.latency.buffer_frames(config.block_size)),
        };

        let stream =
            match build_stream(&device, &stream_config, sample_format, &bus, config.block_size) {
                Err(Error::BuildStream(BuildStreamError::StreamConfigNotSupported)) => {
                    tracing::warn!(
                        "Device rejected a fixed buffer size, using the device default instead"
                    );
                    stream_config.buffer_size = BufferSize::Default;
                    build_stream(&device, &stream_config, sample_format, &bus, config.block_size)?
                }
                other => other?,
            };
        stream.play()?;

        let name = device.name().unwrap_or_else(|_| "unknown".into());
        tracing::info!(
            device = %name,
            sample_rate = SAMPLE_RATE,
            buffer = ?stream_config.buffer_size,
            ?sample_format,
            "Audio stream started"
        );

        Ok(Self {
            bus,
            stream,
            config: stream_config,
        })
    }

    /// Handle for enqueueing sounds.
    pub fn bus(&self) -> Arc<MixBus> {
        Arc::clone(&self.bus)
    }

    /// The stream configuration the device accepted.
    pub fn stream_config(&self) -> &StreamConfig {
        &self.config
    }

    /// Stops the stream and waits for the audio thread to let go of the bus.
    pub fn close(self) -> Result<()> {
        let paused = self.stream.pause();
        drop(self.stream);
        tracing::info!(
            pending_clips = self.bus.active_clips(),
            "Audio stream closed"
        );
        paused?;
        Ok(())
    }
}

fn build_stream(
    device: &cpal::Device,
    config: &StreamConfig,
    sample_format: SampleFormat,
    bus: &Arc<MixBus>,
    block_size: u32,
) -> Result<cpal::Stream> {
    match sample_format {
        SampleFormat::F32 => create_stream::<f32>(device, config, Arc::clone(bus), block_size),
        SampleFormat::I16 => create_stream::<i16>(device, config, Arc::clone(bus), block_size),
        SampleFormat::U16 => create_stream::<u16>(device, config, Arc::clone(bus), block_size),
        other => Err(Error::UnsupportedSampleFormat(other)),
    }
}

/// Creates a stream whose callback renders one block from the bus per call.
fn create_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    bus: Arc<MixBus>,
    block_size: u32,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let block_size = block_size as usize;
    // Sized for the largest buffer we ask for so the callback does not allocate
    let mut scratch = vec![Frame::SILENCE; scratch_frames(config, block_size)];

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let frames = data.len() / channels.max(1);
            if scratch.len() < frames {
                scratch.resize(frames, Frame::SILENCE);
            }
            let block = &mut scratch[..frames];
            bus.render_blocks(block, block_size);
            write_frames(block, data, channels);
        },
        |err| tracing::error!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

/// Frames the callback scratch buffer needs up front.
fn scratch_frames(config: &StreamConfig, block_size: usize) -> usize {
    match config.buffer_size {
        BufferSize::Fixed(frames) => (frames as usize).max(block_size),
        BufferSize::Default => block_size * 2,
    }
}

/// Interleaves stereo frames into a device buffer.
///
/// Mono devices get the average of both channels, extra channels get silence.
fn write_frames<T>(frames: &[Frame], data: &mut [T], channels: usize)
where
    T: Sample + FromSample<f32>,
{
    if channels == 0 {
        return;
    }
    for (out, frame) in data.chunks_mut(channels).zip(frames) {
        match out {
            [mono] => *mono = T::from_sample((frame.left + frame.right) * 0.5),
            [left, right, rest @ ..] => {
                *left = T::from_sample(frame.left);
                *right = T::from_sample(frame.right);
                for extra in rest {
                    *extra = T::EQUILIBRIUM;
                }
            }
            [] => {}
        }
    }
}
