pub mod erodible;
pub mod generation;
pub mod shrink_point;

pub use erodible::ErodiblePolygon;
pub use generation::{BakedPolygon, Generation, GenerationState};
pub use shrink_point::{ShrinkCase, ShrinkPoint};
