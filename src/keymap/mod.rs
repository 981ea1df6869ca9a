//! Key model for field input events
//!
//! Host key events arrive either as a key name or as a legacy numeric code;
//! both normalize to [`KeyCode`], and the state machine gates transitions on
//! the [`KeyFilter`] sets.
//!
//! ```text
//! host key event → KeyCode → KeyFilter::matches() → transition gate
//! ```

mod filters;
mod types;

pub use filters::{KeyFilter, FOCUS_KEYS, NAVIGATION_KEYS};
pub use types::KeyCode;
