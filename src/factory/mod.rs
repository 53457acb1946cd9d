//! Path finding between coordinate systems

mod transformation_factory;

#[cfg(test)]
mod tests;

pub use self::transformation_factory::TransformationFactory;
