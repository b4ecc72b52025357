//! Chunked array store for the CMIP6 regional cube.
//!
//! A cube holds one 5-D `float32` array per climate variable over
//! `(model, experiment, region, realm, time)`, plus a 1-D label array per
//! axis. Arrays are stored in Zarr V3 format on the local filesystem.
//!
//! # Write pattern
//!
//! ```text
//! RegionalStore::create(path, coords, config)
//!      │
//!      ├─► root group + label arrays
//!      ├─► data arrays, chunked (1, 1, |region|, 1, 600)
//!      └─► fill pass: every cell = 9999
//!
//! RegionalStore::write_block(variable, hyperplane, block)
//!      │
//!      └─► one (model, experiment, realm) hyperplane,
//!          arbitrary (time, region) coordinates
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cmip_common::CoordinateSystem;
//! use cube_store::{Hyperplane, RegionalStore, SliceBlock, StoreConfig};
//!
//! let coords = CoordinateSystem::cmip6()?;
//! let store = RegionalStore::create("CMIP6.zarr", &coords, &StoreConfig::default())?;
//!
//! let block = SliceBlock::new(vec![1980], vec![0, 37], vec![12.3, 30.1])?;
//! store.write_block("tas", Hyperplane::new(6, 2, 0), &block)?;
//! ```

pub mod block;
pub mod config;
pub mod error;
pub mod labels;
pub mod schema;
pub mod store;

pub use block::{Hyperplane, SliceBlock};
pub use config::{StoreConfig, ZarrCompression};
pub use error::{Result, StoreError};
pub use schema::{CubeSchema, NDIM};
pub use store::RegionalStore;
