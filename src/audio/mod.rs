//! Audio capture modules

pub mod capture;

pub use capture::{AudioBlock, AudioCapture, DeviceInfo};
