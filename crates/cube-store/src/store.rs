//! Zarr V3 backed regional cube.
//!
//! Layout of a store directory:
//!
//! ```text
//! CMIP6.zarr/
//! ├── zarr.json        root group, cube attributes
//! ├── model/           1-D fixed-width labels
//! ├── experiment/
//! ├── region/
//! ├── realm/
//! ├── time/
//! ├── tas/             5-D float32 (model, experiment, region, realm, time)
//! └── pr/
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zarrs::array::codec::bytes_to_bytes::blosc::{
    BloscCodec, BloscCompressionLevel, BloscCompressor, BloscShuffleMode,
};
use zarrs::array::codec::bytes_to_bytes::crc32c::Crc32cCodec;
use zarrs::array::codec::BytesToBytesCodecTraits;
use zarrs::array::{Array, ArrayBuilder, ArrayBytes, DataType, FillValue};
use zarrs::array_subset::ArraySubset;
use zarrs::group::{Group, GroupBuilder};
use zarrs_filesystem::FilesystemStore;

use cmip_common::{Axis, CoordinateSystem, Registry};

use crate::block::{Hyperplane, SliceBlock};
use crate::config::{StoreConfig, ZarrCompression};
use crate::error::{Result, StoreError};
use crate::labels::{decode_labels, encode_labels};
use crate::schema::{CubeSchema, NDIM};

/// Attributes of the root group.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CubeAttributes {
    title: String,
    dimensions: Vec<String>,
    variables: Vec<String>,
    chunk_shape: [u64; NDIM],
    fill_value: f32,
    label_width: usize,
    compression: String,
    time_coverage: Option<(String, String)>,
}

/// Handle to an on-disk regional cube.
pub struct RegionalStore {
    path: PathBuf,
    store: Arc<FilesystemStore>,
    schema: CubeSchema,
    label_width: usize,
    coords: CoordinateSystem,
    arrays: HashMap<String, Array<FilesystemStore>>,
}

impl std::fmt::Debug for RegionalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionalStore")
            .field("path", &self.path)
            .field("schema", &self.schema)
            .finish()
    }
}

impl RegionalStore {
    /// Create a new cube at `path`, replacing any existing store.
    ///
    /// Defines the coordinate-label arrays and one data array per configured
    /// variable, then writes the fill value over the full extent of every
    /// data array.
    pub fn create(
        path: impl AsRef<Path>,
        coords: &CoordinateSystem,
        config: &StoreConfig,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let schema = CubeSchema::new(coords, config)?;

        if path.exists() {
            warn!(path = %path.display(), "Replacing existing store");
            std::fs::remove_dir_all(&path)?;
        }
        std::fs::create_dir_all(&path)?;

        let store = Arc::new(FilesystemStore::new(&path).map_err(StoreError::storage)?);

        let attributes = CubeAttributes {
            title: "CMIP6 regional aggregates".to_string(),
            dimensions: CubeSchema::dimension_names()
                .iter()
                .map(|d| d.to_string())
                .collect(),
            variables: schema.variables.clone(),
            chunk_shape: schema.chunk_shape,
            fill_value: schema.fill_value,
            label_width: config.label_width,
            compression: config.compression.as_str().to_string(),
            time_coverage: coords
                .time
                .labels()
                .first()
                .zip(coords.time.labels().last())
                .map(|(first, last)| (first.clone(), last.clone())),
        };
        write_root_group(&store, &attributes)?;

        for axis in Axis::ALL {
            write_label_array(&store, axis, coords.axis_labels(axis), config.label_width)?;
        }

        let mut arrays = HashMap::new();
        for variable in &schema.variables {
            let array = build_data_array(&store, &schema, config, variable)?;
            array.store_metadata().map_err(StoreError::zarr)?;
            let cells = initialize_fill(&array, &schema)?;
            debug!(variable = %variable, cells = cells, "Initialized data array");
            arrays.insert(variable.clone(), array);
        }

        info!(
            path = %path.display(),
            shape = ?schema.shape,
            chunk_shape = ?schema.chunk_shape,
            variables = ?schema.variables,
            "Created regional store"
        );

        Ok(Self {
            path,
            store,
            schema,
            label_width: config.label_width,
            coords: coords.clone(),
            arrays,
        })
    }

    /// Open an existing cube for reading and appending.
    ///
    /// The coordinate registries are rebuilt from the persisted label arrays.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let store = Arc::new(FilesystemStore::new(&path).map_err(StoreError::storage)?);

        let group = Group::open(store.clone(), "/").map_err(StoreError::zarr)?;
        let attributes: CubeAttributes =
            serde_json::from_value(serde_json::Value::Object(group.attributes().clone()))?;

        let mut registries = Vec::with_capacity(NDIM);
        for axis in Axis::ALL {
            let labels = read_label_array(&store, axis, attributes.label_width)?;
            registries.push(Registry::new(axis, labels)?);
        }
        let [model, experiment, region, realm, time]: [Registry; NDIM] = registries
            .try_into()
            .map_err(|_| StoreError::InvalidMetadata("expected five axes".to_string()))?;
        let coords = CoordinateSystem::new(model, experiment, region, realm, time);

        let schema = CubeSchema {
            shape: coords.shape(),
            chunk_shape: attributes.chunk_shape,
            fill_value: attributes.fill_value,
            variables: attributes.variables.clone(),
        };

        let mut arrays = HashMap::new();
        for variable in &schema.variables {
            let array = Array::open(store.clone(), &array_path(variable))
                .map_err(StoreError::zarr)?;
            if array.shape() != schema.shape.as_slice() {
                return Err(StoreError::InvalidMetadata(format!(
                    "array '{}' has shape {:?}, labels imply {:?}",
                    variable,
                    array.shape(),
                    schema.shape
                )));
            }
            arrays.insert(variable.clone(), array);
        }

        debug!(path = %path.display(), variables = ?schema.variables, "Opened regional store");

        Ok(Self {
            path,
            store,
            schema,
            label_width: attributes.label_width,
            coords,
            arrays,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &CubeSchema {
        &self.schema
    }

    /// Registries describing the store's axes.
    pub fn coordinates(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn has_variable(&self, variable: &str) -> bool {
        self.arrays.contains_key(variable)
    }

    /// Write `block` into the `hyperplane` of `variable`.
    ///
    /// Only the addressed cells change. Cells already holding a value are
    /// overwritten. Returns the number of cells written.
    pub fn write_block(
        &self,
        variable: &str,
        hyperplane: Hyperplane,
        block: &SliceBlock,
    ) -> Result<u64> {
        let array = self.array(variable)?;
        let Some((times, regions)) = block.bounds() else {
            return Ok(0);
        };

        self.check_hyperplane(hyperplane)?;
        self.check_bound(Axis::Time, times.end - 1)?;
        self.check_bound(Axis::Region, regions.end - 1)?;

        let time_len = times.end - times.start;
        let region_len = regions.end - regions.start;
        let subset = ArraySubset::new_with_start_shape(
            vec![
                hyperplane.model,
                hyperplane.experiment,
                regions.start,
                hyperplane.realm,
                times.start,
            ],
            vec![1, 1, region_len, 1, time_len],
        )
        .map_err(StoreError::zarr)?;

        // Sparse blocks keep the cells between their coordinates intact
        let mut buffer: Vec<f32> = if block.is_dense() {
            vec![self.schema.fill_value; (region_len * time_len) as usize]
        } else {
            array
                .retrieve_array_subset_elements(&subset)
                .map_err(StoreError::zarr)?
        };
        block.scatter_into(&mut buffer, regions.start, times.start, time_len);

        array
            .store_array_subset_elements(&subset, &buffer)
            .map_err(StoreError::zarr)?;

        debug!(
            variable = variable,
            hyperplane = ?hyperplane,
            times = ?times,
            regions = ?regions,
            dense = block.is_dense(),
            "Wrote block"
        );

        Ok(block.len() as u64)
    }

    /// Read a single cell at `(model, experiment, region, realm, time)`.
    pub fn read_cell(&self, variable: &str, index: [u64; NDIM]) -> Result<f32> {
        let array = self.array(variable)?;
        for (axis, coordinate) in Axis::ALL.into_iter().zip(index) {
            self.check_bound(axis, coordinate)?;
        }

        let subset = ArraySubset::new_with_start_shape(index.to_vec(), vec![1; NDIM])
            .map_err(StoreError::zarr)?;
        let values: Vec<f32> = array
            .retrieve_array_subset_elements(&subset)
            .map_err(StoreError::zarr)?;

        values
            .first()
            .copied()
            .ok_or_else(|| StoreError::zarr("empty read"))
    }

    /// Read a cell by its labels.
    pub fn read_labeled(
        &self,
        variable: &str,
        model: &str,
        experiment: &str,
        region: &str,
        realm: &str,
        time: &str,
    ) -> Result<f32> {
        let index = [
            self.coords.lookup(Axis::Model, model)?,
            self.coords.lookup(Axis::Experiment, experiment)?,
            self.coords.lookup(Axis::Region, region)?,
            self.coords.lookup(Axis::Realm, realm)?,
            self.coords.lookup(Axis::Time, time)?,
        ]
        .map(|i| i as u64);

        self.read_cell(variable, index)
    }

    /// Read a full `(region, time)` hyperplane, region-major.
    pub fn read_hyperplane(&self, variable: &str, hyperplane: Hyperplane) -> Result<Vec<f32>> {
        let array = self.array(variable)?;
        self.check_hyperplane(hyperplane)?;

        let subset = ArraySubset::new_with_start_shape(
            vec![hyperplane.model, hyperplane.experiment, 0, hyperplane.realm, 0],
            vec![
                1,
                1,
                self.schema.extent(Axis::Region),
                1,
                self.schema.extent(Axis::Time),
            ],
        )
        .map_err(StoreError::zarr)?;

        array
            .retrieve_array_subset_elements(&subset)
            .map_err(StoreError::zarr)
    }

    /// Read an entire data array in C order.
    pub fn read_variable(&self, variable: &str) -> Result<Vec<f32>> {
        let array = self.array(variable)?;
        let subset = ArraySubset::new_with_shape(self.schema.shape.to_vec());

        array
            .retrieve_array_subset_elements(&subset)
            .map_err(StoreError::zarr)
    }

    /// Labels persisted in the coordinate array of `axis`.
    pub fn coordinate_labels(&self, axis: Axis) -> Result<Vec<String>> {
        read_label_array(&self.store, axis, self.label_width)
    }

    fn array(&self, variable: &str) -> Result<&Array<FilesystemStore>> {
        self.arrays
            .get(variable)
            .ok_or_else(|| StoreError::UnknownVariable(variable.to_string()))
    }

    fn check_hyperplane(&self, hyperplane: Hyperplane) -> Result<()> {
        self.check_bound(Axis::Model, hyperplane.model)?;
        self.check_bound(Axis::Experiment, hyperplane.experiment)?;
        self.check_bound(Axis::Realm, hyperplane.realm)
    }

    fn check_bound(&self, axis: Axis, coordinate: u64) -> Result<()> {
        let extent = self.schema.extent(axis);
        if coordinate >= extent {
            return Err(StoreError::OutOfBounds {
                dimension: axis.as_str(),
                coordinate,
                extent,
            });
        }
        Ok(())
    }
}

fn array_path(name: &str) -> String {
    format!("/{name}")
}

fn write_root_group(store: &Arc<FilesystemStore>, attributes: &CubeAttributes) -> Result<()> {
    let attrs = match serde_json::to_value(attributes)? {
        serde_json::Value::Object(map) => map,
        _ => return Err(StoreError::InvalidMetadata("attributes must be an object".into())),
    };

    let group = GroupBuilder::new()
        .attributes(attrs)
        .build(store.clone(), "/")
        .map_err(StoreError::zarr)?;

    group.store_metadata().map_err(StoreError::zarr)
}

/// Write the labels of `axis` as a 1-D array of fixed-width strings.
fn write_label_array(
    store: &Arc<FilesystemStore>,
    axis: Axis,
    labels: &[String],
    width: usize,
) -> Result<()> {
    let bytes = encode_labels(labels, width)?;
    let len = labels.len() as u64;

    let chunk_grid: zarrs::array::ChunkGrid = vec![len.max(1)]
        .try_into()
        .map_err(|e| StoreError::Config(format!("{:?}", e)))?;

    let array = ArrayBuilder::new(
        vec![len],
        DataType::RawBits(width),
        chunk_grid,
        FillValue::new(vec![0u8; width]),
    )
    .dimension_names(Some([axis.as_str()]))
    .build(store.clone(), &array_path(axis.as_str()))
    .map_err(StoreError::zarr)?;

    array.store_metadata().map_err(StoreError::zarr)?;

    let subset = ArraySubset::new_with_shape(vec![len]);
    array
        .store_array_subset(&subset, ArrayBytes::new_flen(bytes))
        .map_err(StoreError::zarr)
}

fn read_label_array(store: &Arc<FilesystemStore>, axis: Axis, width: usize) -> Result<Vec<String>> {
    let array = Array::open(store.clone(), &array_path(axis.as_str())).map_err(StoreError::zarr)?;

    let subset = ArraySubset::new_with_shape(array.shape().to_vec());
    let bytes = array
        .retrieve_array_subset(&subset)
        .map_err(StoreError::zarr)?
        .into_fixed()
        .map_err(StoreError::zarr)?;

    decode_labels(&bytes, width)
}

fn build_data_array(
    store: &Arc<FilesystemStore>,
    schema: &CubeSchema,
    config: &StoreConfig,
    variable: &str,
) -> Result<Array<FilesystemStore>> {
    let mut attrs = serde_json::Map::new();
    attrs.insert("variable".to_string(), serde_json::json!(variable));
    attrs.insert("missing_value".to_string(), serde_json::json!(schema.fill_value));

    let chunk_grid: zarrs::array::ChunkGrid = schema
        .chunk_shape
        .to_vec()
        .try_into()
        .map_err(|e| StoreError::Config(format!("{:?}", e)))?;

    let mut binding = ArrayBuilder::new(
        schema.shape.to_vec(),
        DataType::Float32,
        chunk_grid,
        FillValue::from(schema.fill_value),
    );
    let mut builder = binding
        .dimension_names(Some(CubeSchema::dimension_names()))
        .attributes(attrs);

    let codecs = create_codecs(config)?;
    if !codecs.is_empty() {
        builder = builder.bytes_to_bytes_codecs(codecs);
    }

    builder
        .build(store.clone(), &array_path(variable))
        .map_err(StoreError::zarr)
}

/// Compression followed by an optional checksum.
fn create_codecs(config: &StoreConfig) -> Result<Vec<Arc<dyn BytesToBytesCodecTraits>>> {
    let mut codecs: Vec<Arc<dyn BytesToBytesCodecTraits>> = Vec::new();

    let compressor = match config.compression {
        ZarrCompression::None => None,
        ZarrCompression::BloscLz4 => Some(BloscCompressor::LZ4),
        ZarrCompression::BloscZstd => Some(BloscCompressor::Zstd),
    };

    if let Some(compressor) = compressor {
        let level = BloscCompressionLevel::try_from(config.compression_level)
            .map_err(|_| StoreError::Config("Invalid compression level".to_string()))?;

        let shuffle = if config.shuffle {
            BloscShuffleMode::Shuffle
        } else {
            BloscShuffleMode::NoShuffle
        };

        // typesize is required when shuffle is enabled
        let typesize = if config.shuffle {
            Some(std::mem::size_of::<f32>())
        } else {
            None
        };

        let codec = BloscCodec::new(compressor, level, None, shuffle, typesize)
            .map_err(|e| StoreError::Config(e.to_string()))?;
        codecs.push(Arc::new(codec));
    }

    if config.checksum {
        codecs.push(Arc::new(Crc32cCodec::new()));
    }

    Ok(codecs)
}

/// Write the fill value over every chunk-aligned block of the array.
///
/// Iterates the array's declared extent, so every cell holds the sentinel
/// before any observation arrives. Returns the number of cells written.
fn initialize_fill(array: &Array<FilesystemStore>, schema: &CubeSchema) -> Result<u64> {
    let chunk_len: u64 = schema.chunk_shape.iter().product();
    let fill = vec![schema.fill_value; chunk_len as usize];
    let mut cells = 0;

    for (start, shape) in schema.chunk_blocks() {
        let n: u64 = shape.iter().product();
        let subset = ArraySubset::new_with_start_shape(start.to_vec(), shape.to_vec())
            .map_err(StoreError::zarr)?;
        array
            .store_array_subset_elements(&subset, &fill[..n as usize])
            .map_err(StoreError::zarr)?;
        cells += n;
    }

    Ok(cells)
}
