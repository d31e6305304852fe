pub const DEFAULT_SOURCE_EXTENSION: &str = "ade";
pub const DEFAULT_CONVERTED_EXTENSION: &str = "root";

pub const DEFAULT_RAW_ROOT_DIR: &str = "raw_root";
pub const DEFAULT_BY_CHANNELS_DIR: &str = "bychannels";

pub const DEFAULT_CONVERTER_PATH: &str = "~/abcd/convert/ade2root";
pub const DEFAULT_ROOT_EXECUTABLE: &str = "root";
pub const DEFAULT_CHANNEL_MACRO: &str = "Tree_generation_vectorized.C";
pub const DEFAULT_PLOT_MACRO: &str = "ToF_analysis_pos_sensitive_vectorized.C";

/// Substring of the converter's output name swapped out by the channel mapper
pub const EVENTS_TAG: &str = "events";
pub const BY_CHANNELS_TAG: &str = "by_channels";

// Channel layout of the single-detector time-of-flight setup
pub const DEFAULT_DETECTOR_COUNT: u32 = 23;
pub const DEFAULT_CHANNEL_MCP_1: u32 = 28;
pub const DEFAULT_CHANNEL_X1: u32 = 24;
pub const DEFAULT_CHANNEL_X2: u32 = 25;
pub const DEFAULT_CHANNEL_Y1: u32 = 26;
pub const DEFAULT_CHANNEL_Y2: u32 = 27;
