pub const DEFAULT_INTERVAL_MS: u64 = 5000;    // Time between automatic advances
pub const HERO_INTERVAL_MS: u64 = 6000;       // The landing section rotates a little slower
pub const MIN_INTERVAL_MS: u64 = 1;           // Shortest period a timer may be armed with

pub const SLIDE_CLASS: &str = "carousel-slide";
pub const INDICATOR_CLASS: &str = "indicator";
pub const BUTTON_CLASS: &str = "carousel-btn";
pub const PREV_CLASS: &str = "prev";
pub const NEXT_CLASS: &str = "next";
pub const ACTIVE_CLASS: &str = "active";      // Presentation marker on the displayed slide/indicator

pub const RENDER_WIDTH: i32 = 1280;           // Default viewer window width
pub const RENDER_HEIGHT: i32 = 720;           // Default viewer window height
pub const FPS: u32 = 60;                      // Frames per second

pub const BUTTON_WIDTH: f32 = 48.0;           // Width of the prev/next hit areas
pub const INDICATOR_RADIUS: f32 = 7.0;        // Indicator dot radius
pub const INDICATOR_SPACING: f32 = 26.0;      // Distance between indicator centers
pub const INDICATOR_STRIP: f32 = 36.0;        // Height reserved under each slide for indicators
pub const BAND_GAP: f32 = 12.0;               // Vertical gap between carousels
