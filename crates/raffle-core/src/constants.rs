// Shared tuning constants for the reel engine, used by both web and native frontends.

// Reel geometry
pub const PASSES_PER_ROTATION: usize = 4; // visible pages scrolled past per configured rotation
pub const DEFAULT_VISIBLE_ROWS: usize = 5;
pub const MIN_VISIBLE_ROWS: usize = 1;
pub const MAX_VISIBLE_ROWS: usize = 15;
pub const DEFAULT_ITEM_HEIGHT_PX: f64 = 64.0;
pub const MIN_ITEM_HEIGHT_PX: f64 = 8.0;
pub const MAX_ITEM_HEIGHT_PX: f64 = 512.0;
pub const DEFAULT_OVERSCAN_ROWS: usize = 1; // extra rows painted above/below for partial-row scrolling
pub const MAX_OVERSCAN_ROWS: usize = 4;

// Spin timing
pub const DEFAULT_MIN_SPIN_DURATION_SECS: f64 = 6.0;
pub const MIN_SPIN_DURATION_SECS: f64 = 0.5;
pub const MAX_SPIN_DURATION_SECS: f64 = 60.0;
pub const DEFAULT_SPIN_ROTATIONS: u32 = 5;
pub const MIN_SPIN_ROTATIONS: u32 = 1;
pub const MAX_SPIN_ROTATIONS: u32 = 50;

// Default deceleration: fast launch, long settle onto the pointer
pub const DEFAULT_BEZIER: [f64; 4] = [0.12, 0.8, 0.2, 1.0];

// Bezier solver budget
pub const BEZIER_EPSILON: f64 = 1e-6; // |Bx(u) - t| accepted as converged
pub const BEZIER_NEWTON_ITERATIONS: usize = 8;
pub const BEZIER_BISECTION_ITERATIONS: usize = 40; // halves [0,1] below f64 resolution of t
pub const BEZIER_MIN_SLOPE: f64 = 1e-6; // below this Newton steps are unstable

// Typography
pub const DEFAULT_FONT_SIZE_PX: f64 = 28.0;
pub const MIN_FONT_SIZE_PX: f64 = 8.0;
pub const MAX_FONT_SIZE_PX: f64 = 128.0;

// Default palette
pub const DEFAULT_BACKGROUND: &str = "#101820";
pub const DEFAULT_ROW_ALT_BACKGROUND: &str = "#16222c";
pub const DEFAULT_ROW_TEXT: &str = "#e8edf2";
pub const DEFAULT_HIGHLIGHT: &str = "#f2aa4c";
pub const DEFAULT_POINTER: &str = "#ff3366";
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

// Frame row buffer: covers the default layout without spilling to the heap
pub const INLINE_FRAME_ROWS: usize = 16;
