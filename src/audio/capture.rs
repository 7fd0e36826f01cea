//! Audio capture adapter built on cpal
//!
//! Captures mono audio from an input device and delivers fixed-size blocks
//! of 16-bit PCM samples over an unbounded channel. The cpal callback is the
//! sole producer; the transcription worker is the sole consumer.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, SampleRate, Stream, StreamConfig};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::config::{AudioConfig, DeviceSelector};
use crate::error::{AudioError, ConfigError, Result};

/// A fixed-size block of mono 16-bit PCM samples
pub type AudioBlock = Vec<i16>;

/// Description of an available input device
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub default_sample_rate: u32,
}

/// Audio capture handle
pub struct AudioCapture {
    config: AudioConfig,
    host: Host,
    device: Option<Device>,
    stream: Option<Stream>,
    block_sender: Sender<AudioBlock>,
    block_receiver: Receiver<AudioBlock>,
    actual_sample_rate: u32,
    channels: u16,
}

impl std::fmt::Debug for AudioCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCapture")
            .field("config", &self.config)
            .field("actual_sample_rate", &self.actual_sample_rate)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl AudioCapture {
    /// Create a new audio capture instance
    pub fn new(config: AudioConfig) -> Result<Self> {
        if config.block_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "audio.block_size".to_string(),
                value: config.block_size.to_string(),
            }
            .into());
        }

        let host = cpal::default_host();
        // Unbounded so the capture callback never blocks on a full queue
        let (sender, receiver) = unbounded();

        Ok(Self {
            config,
            host,
            device: None,
            stream: None,
            block_sender: sender,
            block_receiver: receiver,
            actual_sample_rate: 0,
            channels: 1,
        })
    }

    /// List available audio input devices
    pub fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        let devices = self
            .host
            .input_devices()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let mut infos = Vec::new();
        for (index, device) in devices.enumerate() {
            let Ok(name) = device.name() else { continue };
            let default_sample_rate = device
                .default_input_config()
                .map(|c| c.sample_rate().0)
                .unwrap_or(0);
            infos.push(DeviceInfo {
                index,
                name,
                default_sample_rate,
            });
        }
        Ok(infos)
    }

    /// Select the input device and settle the capture format
    pub fn init(&mut self) -> Result<()> {
        let device = match self.config.device {
            Some(ref selector) => self.find_device(selector)?,
            None => self
                .host
                .default_input_device()
                .ok_or(AudioError::NoInputDevice)?,
        };

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("Using audio input device: {}", device_name);

        let default_config = device
            .default_input_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        self.channels = default_config.channels();

        // Requested rate must fall within a supported range; otherwise the
        // device's default rate is used.
        self.actual_sample_rate = match self.config.sample_rate {
            Some(rate) => {
                let supported = device
                    .supported_input_configs()
                    .map_err(|e| AudioError::DeviceConfig(e.to_string()))?
                    .any(|cfg| {
                        cfg.min_sample_rate().0 <= rate && rate <= cfg.max_sample_rate().0
                    });
                if !supported {
                    return Err(AudioError::DeviceConfig(format!(
                        "sample rate {} Hz not supported by {}",
                        rate, device_name
                    ))
                    .into());
                }
                rate
            }
            None => default_config.sample_rate().0,
        };

        info!(
            "Audio config: {} channels @ {} Hz, {} frames per block",
            self.channels, self.actual_sample_rate, self.config.block_size
        );

        self.device = Some(device);
        Ok(())
    }

    /// Get the sample rate the capture stream runs at
    pub fn actual_sample_rate(&self) -> u32 {
        self.actual_sample_rate
    }

    /// Start capturing audio
    pub fn start(&mut self) -> Result<()> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| AudioError::DeviceConfig("Device not initialized".to_string()))?;

        let config = StreamConfig {
            channels: self.channels,
            sample_rate: SampleRate(self.actual_sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let sender = self.block_sender.clone();
        let channels = self.channels as usize;
        let block_size = self.config.block_size as usize;

        // Frames accumulated between callbacks until a full block is ready
        let mut carry: AudioBlock = Vec::with_capacity(block_size);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    for frame in data.chunks(channels) {
                        let mono = frame.iter().sum::<f32>() / channels as f32;
                        carry.push((mono.clamp(-1.0, 1.0) * i16::MAX as f32) as i16);

                        if carry.len() >= block_size {
                            let block =
                                std::mem::replace(&mut carry, Vec::with_capacity(block_size));
                            if sender.send(block).is_err() {
                                debug!("Block receiver dropped, discarding audio");
                                carry.clear();
                                return;
                            }
                        }
                    }
                },
                // Stream status problems (overruns etc.) are warnings, never fatal
                move |err| {
                    warn!("Audio stream status: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        self.stream = Some(stream);
        info!("Audio capture started");
        Ok(())
    }

    /// Stop capturing audio
    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            info!("Audio capture stopped");
        }
    }

    /// Check if capture is running
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// Get the block receiver channel
    pub fn receiver(&self) -> Receiver<AudioBlock> {
        self.block_receiver.clone()
    }

    fn find_device(&self, selector: &DeviceSelector) -> Result<Device> {
        let devices = self
            .host
            .input_devices()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        match selector {
            DeviceSelector::Index(index) => devices
                .into_iter()
                .nth(*index)
                .ok_or_else(|| AudioError::DeviceNotFound(format!("#{}", index)).into()),
            DeviceSelector::Name(name) => {
                for device in devices {
                    if let Ok(device_name) = device.name() {
                        if device_name.contains(name.as_str()) {
                            return Ok(device);
                        }
                    }
                }
                Err(AudioError::DeviceNotFound(name.clone()).into())
            }
        }
    }
}

impl Drop for AudioCapture {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_capture_creation() {
        let config = AudioConfig::default();
        let capture = AudioCapture::new(config);
        assert!(capture.is_ok());
    }

    #[test]
    fn test_list_devices() {
        let config = AudioConfig::default();
        let capture = AudioCapture::new(config).unwrap();
        let devices = capture.list_devices();
        // Just verify it doesn't panic - actual devices depend on system
        assert!(devices.is_ok());
    }

    #[test]
    fn test_zero_block_size_is_rejected() {
        let config = AudioConfig {
            block_size: 0,
            ..Default::default()
        };
        let err = AudioCapture::new(config).unwrap_err();
        match err {
            crate::error::SignError::Config(ConfigError::InvalidValue { field, value }) => {
                assert_eq!(field, "audio.block_size");
                assert_eq!(value, "0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_start_requires_init() {
        let mut capture = AudioCapture::new(AudioConfig::default()).unwrap();
        assert!(capture.start().is_err());
        assert!(!capture.is_running());
    }
}
