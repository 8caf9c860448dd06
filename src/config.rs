//! Application-level configuration constants.

// Synchronizer timing
pub const SETTLE_DELAY_MS: u32 = 200;
pub const REVEAL_STAGGER_MS: u32 = 150;

// Slider animation
pub const FRAME_INTERVAL_MS: u32 = 1000 / 60;
pub const EASING_FACTOR: f64 = 0.1;
pub const LABEL_SNAP_WINDOW: f64 = 1.0;
pub const HOVER_LINGER_MS: u32 = 500;

// Min/Max limits for range inputs
pub const MIN_KEY_DOWN_MS: u32 = 0;
pub const MAX_KEY_DOWN_MS: u32 = 1000;
pub const MIN_KEY_UP_MS: u32 = 0;
pub const MAX_KEY_UP_MS: u32 = 1000;
pub const MIN_MOUSE_RADIUS_PX: u32 = 0;
pub const MAX_MOUSE_RADIUS_PX: u32 = 200;
pub const MIN_MOUSE_MOVE_MS: u32 = 0;
pub const MAX_MOUSE_MOVE_MS: u32 = 1000;

// Credit pages understood by the host's `open_credit` command
pub const CREDIT_SITES: [&str; 2] = ["bilibili", "github"];
