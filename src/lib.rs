pub mod confine;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod table;

pub use confine::ConfinementRegion;
pub use error::{ConfinerError, Result};
pub use geometry::{BakedPolygon, Generation, GenerationState};
pub use operations::{BakeSettings, Oven};
pub use table::BakedTable;
