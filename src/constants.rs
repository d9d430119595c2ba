// Grid defaults
pub const DEFAULT_WIDTH: i64 = 10;
pub const DEFAULT_DEPTH: i64 = 10;
pub const DEFAULT_CELL_SPACING: f32 = 4.0;

// Room placement
pub const DEFAULT_ROOM_COUNT: i64 = 5;
pub const MIN_START_DISTANCE: usize = 3; // Manhattan
pub const MIN_ROOM_SPACING: f32 = 4.0; // Euclidean

// Paced mode defaults (milliseconds)
pub const DEFAULT_STEP_DELAY_MS: u64 = 30;
pub const DEFAULT_START_DELAY_MS: u64 = 250;

// Standard room prototype
pub const DEFAULT_ROOM_NAME: &str = "chamber";
pub const DEFAULT_ROOM_ICON: char = 'R';
