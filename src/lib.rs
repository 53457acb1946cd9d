pub mod errors;
pub mod model;
pub mod projection;
pub mod transform;
pub mod factory;
pub mod store;
pub mod coordinate;
pub mod commands;
pub mod utils;

pub use errors::{CrsError, CrsResult};
pub use model::{CoordinateSystem, CrsCode, CrsType};
pub use transform::Transformation;
pub use factory::TransformationFactory;
pub use store::{CrsManager, CrsStore};
pub use coordinate::{BoundingBox, Point, CoordinateTransformer};
