//! Viewport-dependent layout parameters.
//!
//! A single breakpoint check decides between the regular and the compact
//! parameter set. The width is read once per render, not tracked reactively;
//! [`LayoutParams::for_width`] is pure so the decision itself stays testable.

use std::env;

/// Widths at or below this get the compact layout.
pub const MOBILE_BREAKPOINT: u32 = 480;

/// Used when no viewport width is known; matches the container's maximum width.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub container_padding: u32,
    pub text_size: u32,
    pub button_padding: (u32, u32),
}

impl LayoutParams {
    pub fn for_width(width: u32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            Self {
                container_padding: 10,
                text_size: 14,
                button_padding: (8, 16),
            }
        } else {
            Self {
                container_padding: 20,
                text_size: 16,
                button_padding: (10, 20),
            }
        }
    }

    pub fn is_compact(&self) -> bool {
        self.container_padding <= 10
    }
}

/// Reads the current viewport width, falling back to the default. Queried at
/// render time by the terminal front end.
pub fn viewport_width() -> u32 {
    env::var("AMYGDALA_VIEWPORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_VIEWPORT_WIDTH)
}
