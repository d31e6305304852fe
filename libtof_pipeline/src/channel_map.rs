use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_CHANNEL_MCP_1, DEFAULT_CHANNEL_X1, DEFAULT_CHANNEL_X2, DEFAULT_CHANNEL_Y1,
    DEFAULT_CHANNEL_Y2, DEFAULT_DETECTOR_COUNT,
};

/// ChannelMap holds the hardware channel assignment for one experimental setup.
///
/// The mapping macro takes the detector count followed by the DAQ channel of each detector
/// quadrant. Values are passed to ROOT without range checks.
///
/// The order of [`ChannelMap::as_args`] is fixed: detector count, MCP1, X1, X2, Y1, Y2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap {
    pub detector_count: u32,
    pub mcp: u32,
    pub x1: u32,
    pub x2: u32,
    pub y1: u32,
    pub y2: u32,
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            detector_count: DEFAULT_DETECTOR_COUNT,
            mcp: DEFAULT_CHANNEL_MCP_1,
            x1: DEFAULT_CHANNEL_X1,
            x2: DEFAULT_CHANNEL_X2,
            y1: DEFAULT_CHANNEL_Y1,
            y2: DEFAULT_CHANNEL_Y2,
        }
    }
}

impl ChannelMap {
    /// Positional parameters of the mapping macro
    pub fn as_args(&self) -> [u32; 6] {
        [
            self.detector_count,
            self.mcp,
            self.x1,
            self.x2,
            self.y1,
            self.y2,
        ]
    }

    /// Write the current assignment to the log
    pub fn log_values(&self) {
        spdlog::info!("Using channel map:");
        spdlog::info!("Number of detectors: {}", self.detector_count);
        spdlog::info!("Channel MCP_1: {}", self.mcp);
        spdlog::info!("Channel X1: {}", self.x1);
        spdlog::info!("Channel X2: {}", self.x2);
        spdlog::info!("Channel Y1: {}", self.y1);
        spdlog::info!("Channel Y2: {}", self.y2);
    }
}
