//! Progress reporting.
//!
//! - `style` - [`StyleOptions`] and [`ProgressBarOpts`]
//! - `display` - [`ProgressDisplay`] coordinating the bars during a run
//!
//! ```rust
//! use mixport::progress::{ProgressBarOpts, StyleOptions};
//!
//! // Keep the animation counter, hide the per-file download bars.
//! let style = StyleOptions::new(
//!     ProgressBarOpts::with_animation_style(),
//!     ProgressBarOpts::hidden(),
//! );
//! assert!(style.is_enabled());
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
