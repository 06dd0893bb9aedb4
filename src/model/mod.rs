pub mod color;
pub mod entry;
pub mod frame;
pub mod led;

// Re-export commonly used types at the model level.
pub use color::{ColorKey, Rgba};
pub use entry::ColorEntry;
pub use frame::{build_frame, ColorGroup, FrameDocument};
pub use led::{Led, LedIndex, Position2D};
