//! The full set of cube registries.

use crate::axis::Axis;
use crate::cmip6;
use crate::error::CoordinateResult;
use crate::registry::Registry;

/// One registry per cube axis, in dimension order.
#[derive(Debug, Clone)]
pub struct CoordinateSystem {
    pub model: Registry,
    pub experiment: Registry,
    pub region: Registry,
    pub realm: Registry,
    pub time: Registry,
}

impl CoordinateSystem {
    /// Assemble a coordinate system from already-built registries.
    ///
    /// Each registry must describe the axis of the field it is placed in.
    pub fn new(
        model: Registry,
        experiment: Registry,
        region: Registry,
        realm: Registry,
        time: Registry,
    ) -> Self {
        debug_assert_eq!(model.axis(), Axis::Model);
        debug_assert_eq!(experiment.axis(), Axis::Experiment);
        debug_assert_eq!(region.axis(), Axis::Region);
        debug_assert_eq!(realm.axis(), Axis::Realm);
        debug_assert_eq!(time.axis(), Axis::Time);

        Self {
            model,
            experiment,
            region,
            realm,
            time,
        }
    }

    /// The CMIP6 regional aggregate axes, 1850-01 through 2100-12.
    pub fn cmip6() -> CoordinateResult<Self> {
        Ok(Self::new(
            Registry::new(Axis::Model, cmip6::MODELS)?,
            Registry::new(Axis::Experiment, cmip6::EXPERIMENTS)?,
            Registry::new(Axis::Region, cmip6::REGIONS)?,
            Registry::new(Axis::Realm, cmip6::REALMS)?,
            Registry::monthly(cmip6::FIRST_YEAR, cmip6::LAST_YEAR)?,
        ))
    }

    pub fn registry(&self, axis: Axis) -> &Registry {
        match axis {
            Axis::Model => &self.model,
            Axis::Experiment => &self.experiment,
            Axis::Region => &self.region,
            Axis::Realm => &self.realm,
            Axis::Time => &self.time,
        }
    }

    /// Coordinate of `label` on `axis`.
    pub fn lookup(&self, axis: Axis, label: &str) -> CoordinateResult<usize> {
        self.registry(axis).lookup(label)
    }

    /// Labels of `axis` in coordinate order.
    pub fn axis_labels(&self, axis: Axis) -> &[String] {
        self.registry(axis).labels()
    }

    /// Array shape `(model, experiment, region, realm, time)`.
    pub fn shape(&self) -> [u64; 5] {
        Axis::ALL.map(|axis| self.registry(axis).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmip6_shape() {
        let coords = CoordinateSystem::cmip6().unwrap();
        assert_eq!(coords.shape(), [35, 5, 59, 3, 3012]);
    }

    #[test]
    fn test_cmip6_known_coordinates() {
        let coords = CoordinateSystem::cmip6().unwrap();

        assert_eq!(coords.lookup(Axis::Model, "CESM2").unwrap(), 6);
        assert_eq!(coords.lookup(Axis::Model, "UKESM1-0-LL").unwrap(), 34);
        assert_eq!(coords.lookup(Axis::Region, "world").unwrap(), 0);
        assert_eq!(coords.lookup(Axis::Region, "SAH").unwrap(), 37);
        assert_eq!(coords.lookup(Axis::Region, "WSB").unwrap(), 58);
        assert_eq!(coords.lookup(Axis::Experiment, "ssp245").unwrap(), 2);
        assert_eq!(coords.lookup(Axis::Realm, "landsea").unwrap(), 2);
        assert_eq!(coords.lookup(Axis::Time, "2015-01").unwrap(), (2015 - 1850) * 12);
    }

    #[test]
    fn test_every_axis_round_trips() {
        let coords = CoordinateSystem::cmip6().unwrap();

        for axis in Axis::ALL {
            for (i, label) in coords.axis_labels(axis).iter().enumerate() {
                assert_eq!(coords.lookup(axis, label).unwrap(), i, "{axis}/{label}");
            }
        }
    }

    #[test]
    fn test_out_of_range_date_is_unknown() {
        let coords = CoordinateSystem::cmip6().unwrap();
        assert!(coords.lookup(Axis::Time, "1849-12").is_err());
        assert!(coords.lookup(Axis::Time, "2101-01").is_err());
    }
}
