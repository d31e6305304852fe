//! # tof_pipeline
//!
//! tof_pipeline drives the offline time-of-flight analysis chain for a single acquisition
//! run. It takes a raw .ade file written by the data acquisition, converts it to a ROOT file
//! with the external `ade2root` converter, reorganizes the events per DAQ channel with a ROOT
//! macro, and opens the position-sensitive time-of-flight plots on the result.
//!
//! The converter and both macros are treated as black boxes. tof_pipeline only builds their
//! command lines, checks their exit status, and moves files between directories.
//!
//! ## Directory Layout
//!
//! Everything happens relative to a single root directory (by default the current
//! directory):
//!
//! ```text
//! <root>
//! |---- run_0001.ade              raw acquisition data
//! |---- raw_root/
//! |    |---- run_0001_events.root converter output, moved here
//! |---- bychannels/
//! |    |---- run_0001_by_channels.root channel mapper output
//! ```
//!
//! ## Stages
//!
//! 1. Locate: pick the .ade file with the greatest name, or one named by the operator
//! 2. Convert: `ade2root <source> <root>`
//! 3. Relocate: move the single new .root file in the root into `raw_root/`, replacing any
//! file with the same name
//! 4. Map: `root -l -q 'Tree_generation_vectorized.C("<in>", "<out>", n, mcp, x1, x2, y1, y2)'`
//! where `<out>` is the input name with `events` replaced by `by_channels`
//! 5. Plot: `root -l 'ToF_analysis_pos_sensitive_vectorized.C("<out>")'`
//!
//! A run stops at the first stage that fails, either because a tool exited with a non-zero
//! status or because the file the next stage needs is not there.
//!
//! ## Configuration
//!
//! All tool paths, directory names, and the channel map can be set with a YAML file. Missing
//! fields take the defaults shown here:
//!
//! ```yml
//! root_path: .
//! source_extension: ade
//! converted_extension: root
//! raw_root_dir: raw_root
//! by_channels_dir: bychannels
//! converter_path: ~/abcd/convert/ade2root
//! root_executable: root
//! channel_macro: Tree_generation_vectorized.C
//! plot_macro: ToF_analysis_pos_sensitive_vectorized.C
//! channel_map:
//!   detector_count: 23
//!   mcp: 28
//!   x1: 24
//!   x2: 25
//!   y1: 26
//!   y2: 27
//! check_exit_status: true
//! plot: true
//! ```
pub mod channel_map;
pub mod channel_mapper;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod layout;
pub mod locator;
pub mod plotter;
pub mod process;
pub mod stage_status;
pub mod tool;
