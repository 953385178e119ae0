// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLACK, BLUE, GREY, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Fixed word width of binary-dump capture channels.
pub const WORD_BITS: usize = 16;

// Leading elements of the derived sequences computed against the implicit
// zero predecessor. Rendering starts after them.
pub const FD_DEGENERATE_PREFIX: usize = 1;
pub const SD_DEGENERATE_PREFIX: usize = 2;

// Histogram binwidth optimization search range (upper bound exclusive).
pub const AUTO_BINS_MIN: usize = 2;
pub const AUTO_BINS_MAX: usize = 50;

// Automatic binning needs a spread distribution to optimize over.
pub const AUTO_BINS_MIN_DISTINCT: usize = 5;

// --- Plot Color Assignments ---
pub const COLOR_SAMPLES_MAIN: &RGBColor = &BLACK;
pub const COLOR_FIRST_DIFF: &RGBColor = &BLUE;
pub const COLOR_SECOND_DIFF: &RGBColor = &RED;
pub const COLOR_SAMPLES_HIST: &RGBColor = &GREY;
pub const COLOR_BIT_SERIES: &RGBColor = &BLACK;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_BIT_PLOT: u32 = 1;

// Marker radius for sample-dot plots.
pub const MARKER_RADIUS: u32 = 2;

// Font sizes
pub const FONT_SIZE_CHART_TITLE: u32 = 20;
pub const FONT_SIZE_AXIS_LABEL: u32 = 12;
pub const FONT_SIZE_MESSAGE: i32 = 24;

// src/constants.rs
