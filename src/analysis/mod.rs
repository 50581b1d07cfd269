//! The analysis view: state machine, session driver, derived rendering and
//! layout.

mod layout;
mod render;
mod session;
mod state;

pub use layout::{viewport_width, LayoutParams, DEFAULT_VIEWPORT_WIDTH, MOBILE_BREAKPOINT};
pub use render::{
    action_label, display_label, format_percentage, result_row, result_rows, status_line, verdict,
    Verdict,
};
pub use session::AnalysisSession;
pub use state::{AnalysisEvent, AnalysisPhase, AnalysisState};
