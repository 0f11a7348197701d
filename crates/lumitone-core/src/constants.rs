use std::time::Duration;

// Shared audio/visual tuning constants used by both web and native frontends.

// Oscillator
pub const INIT_FREQ: f32 = 3000.0; // Hz, tone before the first light reading
pub const MAX_FREQ: f32 = 6000.0; // Hz, tone when brightness sits at the ceiling
pub const DETUNE_CENTS: f32 = 100.0;

// Gain
pub const INIT_VOL: f32 = 0.001;
pub const MAX_VOL: f32 = 0.02; // gain at the bottom edge of the screen

// Ambient light smoothing (moving-average window)
pub const NUM_SMA_SAMPLE: usize = 10;

// Timing
pub const CALIBRATION_WINDOW: Duration = Duration::from_secs(10);
pub const RENDER_TICK: Duration = Duration::from_millis(66);

// Visual grid
pub const GRID_COLUMNS: u32 = 8; // circle diameter is width / GRID_COLUMNS
pub const GRID_ROWS: u32 = 14;
pub const GRID_ALPHA: f32 = 0.5;
pub const RED_BASE: u32 = 60;
pub const RED_STEP: u32 = 10; // per row
pub const GREEN_SPAN: f32 = 255.0;
pub const BLUE_SPAN: f32 = 192.0;
