//! mkid-json contains the JSON schemas used by mkid-readout.
//!
//! These describe the firmware build (channel counts, reorder topologies and
//! mixer bit widths), files of tones to load, the register layout of a
//! memory-mapped device, and the readout state reported by the CLI.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Readout configuration JSON schema.
///
/// This describes one DSP pipeline of a firmware build. It is fixed for a
/// given bitstream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReadoutConfig {
    /// ADC sampling clock in Hz.
    pub adc_clk_hz: f64,
    /// Number of points of the receive channelizer.
    pub n_chan_rx: u32,
    /// Number of independent tone slots.
    pub n_tone: u32,
    /// Number of points of each transmit synthesis bank.
    pub n_tx_fft: u32,
    /// Frequency in Hz of the channelizer DC bin.
    ///
    /// This accounts for the mixing upstream of the channelizer. If not
    /// given, `adc_clk_hz / 2` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixing_offset_hz: Option<f64>,
    /// Receive-side channel selection reorder.
    pub rx_reorder: Reorder,
    /// Transmit-side reorder feeding the centred synthesis bank.
    pub tx_reorder: Reorder,
    /// Transmit-side reorder feeding the half-bin offset synthesis bank.
    pub tx_offset_reorder: Reorder,
    /// Oscillator bank.
    pub mixer: Mixer,
}

/// Channel reorder JSON schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reorder {
    /// Register name prefix of the block.
    pub prefix: String,
    /// Number of channels at the input.
    pub chans_in: u32,
    /// Number of channels at the output.
    pub chans_out: u32,
    /// Number of channels presented in parallel at the input.
    pub parallel_chans_in: u32,
    /// Physical order of the two reorder stages.
    pub ordering: Ordering,
    /// Whether outputs can be routed to an always-zero input.
    pub support_zeroing: bool,
    /// Number of parallel lanes that share one serial reorder memory word.
    ///
    /// This is 1 for the plain topologies.
    #[serde(default = "one")]
    pub samples_per_word: u32,
}

fn one() -> u32 {
    1
}

/// Reorder stage ordering.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    /// The serial (per-lane memory) stage comes before the parallel mux.
    SerialFirst,
    /// The parallel mux comes before the serial stage.
    ParallelFirst,
}

/// Oscillator bank (mixer) JSON schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mixer {
    /// Register name prefix of the block.
    pub prefix: String,
    /// Number of oscillator channels.
    pub n_chans: u32,
    /// Number of channels processed in parallel.
    pub n_parallel_chans: u32,
    /// Width of the phase increment.
    pub phase_bits: u32,
    /// Number of fractional bits of the phase increment (units of pi).
    pub phase_frac_bits: u32,
    /// Width of the phase offset.
    pub phase_offset_bits: u32,
    /// Number of fractional bits of the phase offset (units of pi).
    pub phase_offset_frac_bits: u32,
    /// Width of the amplitude scale.
    pub scale_bits: u32,
    /// Whether the bank also consumes a per-sample cos/sin rotation step.
    pub rotation: bool,
    /// Maximum number of steps of a phase switching pattern.
    pub switch_capacity: u32,
}

/// Tone JSON schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Tone {
    /// Tone frequency in Hz, or `None` to disable the slot.
    pub freq_hz: Option<f64>,
    /// Phase offset in radians. Defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_offset: Option<f64>,
    /// Linear amplitude between 0 and 1. Defaults to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amplitude: Option<f64>,
}

/// Tone file JSON schema.
///
/// Tone `i` of the list is loaded into slot `i`. Slots not listed are
/// disabled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ToneFile {
    /// Tones to load.
    pub tones: Vec<Tone>,
}

/// Register layout JSON schema.
///
/// This lists the named registers of a memory-mapped device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RegisterLayout {
    /// Registers of the device.
    pub registers: Vec<Register>,
}

/// Register entry of a [`RegisterLayout`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Register {
    /// Register name.
    pub name: String,
    /// Byte offset of the register from the start of the mapping.
    pub offset: u64,
    /// Size of the register in bytes.
    pub size: u64,
}

/// Phase switching pattern JSON schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwitchPattern {
    /// Invert bit of each step.
    pub bits: Vec<u8>,
    /// Number of spectra that each step lasts.
    pub dwell: u32,
    /// Number of spectra flagged as invalid around each transition.
    pub blank_guard: u32,
}

/// Oscillator buffer.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Buffer {
    /// Buffer 0.
    A,
    /// Buffer 1.
    B,
}

/// Readout state JSON schema.
///
/// This is a snapshot of the routing and oscillator state currently loaded
/// in the hardware.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToneState {
    /// Oscillator buffer read by the hardware.
    pub active_buffer: Buffer,
    /// Whether the oscillator bank is in power mode.
    pub power_mode: bool,
    /// Channelizer bin feeding each tone slot.
    pub rx_outmap: Vec<Option<u32>>,
    /// Tone slot feeding each bin of the centred synthesis bank.
    pub tx_outmap: Vec<Option<u32>>,
    /// Tone slot feeding each bin of the offset synthesis bank.
    pub tx_offset_outmap: Vec<Option<u32>>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reorder_defaults() {
        let reorder: Reorder = serde_json::from_str(
            r#"{"prefix": "p0_chan_select", "chans_in": 4096, "chans_out": 2048,
                "parallel_chans_in": 4, "ordering": "parallel_first",
                "support_zeroing": true}"#,
        )
        .unwrap();
        assert_eq!(reorder.samples_per_word, 1);
        assert_eq!(reorder.ordering, Ordering::ParallelFirst);
    }

    #[test]
    fn tone_file() {
        let file: ToneFile = serde_json::from_str(
            r#"{"tones": [{"freq_hz": 1.0e9}, {"freq_hz": null},
                          {"freq_hz": 1.1e9, "amplitude": 0.5}]}"#,
        )
        .unwrap();
        assert_eq!(file.tones.len(), 3);
        assert_eq!(file.tones[1].freq_hz, None);
        assert_eq!(file.tones[2].amplitude, Some(0.5));
        assert_eq!(file.tones[0].phase_offset, None);
    }
}
