//! Common types shared across the CMIP6 regional cube crates.
//!
//! Every categorical axis of the cube (model, experiment, region, realm,
//! time) is described by a [`Registry`] that maps string labels to dense
//! integer coordinates. The five registries are bundled in a
//! [`CoordinateSystem`], built once at startup and handed to every component
//! that needs to resolve coordinates.

pub mod axis;
pub mod cmip6;
pub mod coordinates;
pub mod error;
pub mod registry;

pub use axis::Axis;
pub use coordinates::CoordinateSystem;
pub use error::{CoordinateError, CoordinateResult};
pub use registry::Registry;
