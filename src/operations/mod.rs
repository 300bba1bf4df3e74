pub mod bake;
mod erode;
pub mod shrink;
mod simplify;
pub mod split;

pub use bake::{BakePhase, BakeSettings, Oven};
pub use erode::ErosionStep;
pub use shrink::ShrinkDirections;
pub use simplify::merge_close_points;
pub use split::SelfIntersectionSplitter;
