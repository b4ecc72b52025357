//! Common coordinate fixtures.

use cmip_common::{Axis, CoordinateSystem, Registry};

/// Models of [`small_coordinates`].
pub const SMALL_MODELS: [&str; 2] = ["CESM2", "MIROC6"];

/// Experiments of [`small_coordinates`].
pub const SMALL_EXPERIMENTS: [&str; 2] = ["historical", "ssp245"];

/// Regions of [`small_coordinates`].
pub const SMALL_REGIONS: [&str; 3] = ["world", "SAH", "MED"];

/// Realms of [`small_coordinates`].
pub const SMALL_REALMS: [&str; 2] = ["land", "sea"];

/// Time range of [`small_coordinates`].
pub const SMALL_YEARS: (i32, i32) = (2014, 2016);

/// A coordinate system small enough to read back in full:
/// 2 models x 2 experiments x 3 regions x 2 realms x 36 months.
pub fn small_coordinates() -> CoordinateSystem {
    CoordinateSystem::new(
        Registry::new(Axis::Model, SMALL_MODELS).expect("unique models"),
        Registry::new(Axis::Experiment, SMALL_EXPERIMENTS).expect("unique experiments"),
        Registry::new(Axis::Region, SMALL_REGIONS).expect("unique regions"),
        Registry::new(Axis::Realm, SMALL_REALMS).expect("unique realms"),
        Registry::monthly(SMALL_YEARS.0, SMALL_YEARS.1).expect("valid years"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_coordinates_shape() {
        assert_eq!(small_coordinates().shape(), [2, 2, 3, 2, 36]);
    }
}
