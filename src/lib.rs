//! Fetch a user's recent GitHub activity through the `gh` CLI into a dated
//! snapshot directory, and render such a directory as a Markdown digest.
//!
//! The two halves only share the snapshot directory: `gh-activity-fetch`
//! writes it, `gh-activity-render` reads it.

pub mod category;
pub mod cli;
pub mod error;
pub mod ext;
pub mod fetch;
pub mod gh;
pub mod model;
pub mod render;
pub mod util;
pub mod window;

pub use category::Category;
pub use error::ActivityError;
pub use window::DateRange;
