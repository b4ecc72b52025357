//! Fixed axis definitions for the CMIP6 regional aggregates.
//!
//! The order of each list is its coordinate order and must never change
//! once a cube has been written.

/// Sentinel stored in cells that have no observation.
pub const FILL_VALUE: f32 = 9999.0;

/// First year of the monthly time axis (inclusive).
pub const FIRST_YEAR: i32 = 1850;

/// Last year of the monthly time axis (inclusive).
pub const LAST_YEAR: i32 = 2100;

/// Default name of the cube written by the ingester.
pub const DATASET_NAME: &str = "CMIP6.zarr";

/// Variables that get a data array in the cube.
pub const VARIABLES: [&str; 2] = ["tas", "pr"];

/// Climate models.
pub const MODELS: [&str; 35] = [
    "ACCESS-CM2",
    "ACCESS-ESM1-5",
    "AWI-CM-1-1-MR",
    "BCC-CSM2-MR",
    "CAMS-CSM1-0",
    "CanESM5",
    "CESM2",
    "CESM2-WACCM",
    "CMCC-CM2-SR5",
    "CNRM-CM6-1",
    "CNRM-CM6-1-HR",
    "CNRM-ESM2-1",
    "EC-Earth3",
    "EC-Earth3-Veg",
    "EC-Earth3-Veg-LR",
    "FGOALS-g3",
    "GFDL-CM4",
    "GFDL-ESM4",
    "HadGEM3-GC31-LL",
    "IITM-ESM",
    "INM-CM4-8",
    "INM-CM5-0",
    "IPSL-CM6A-LR",
    "KACE-1-0-G",
    "KIOST-ESM",
    "MIROC6",
    "MIROC-ES2L",
    "MPI-ESM1-2-HR",
    "MPI-ESM1-2-LR",
    "MRI-ESM2-0",
    "NESM3",
    "NorESM2-LM",
    "NorESM2-MM",
    "TaiESM1",
    "UKESM1-0-LL",
];

/// `world` plus the IPCC AR6 reference regions.
pub const REGIONS: [&str; 59] = [
    "world", "ARO", "ARP", "ARS", "BOB", "CAF", "CAR", "CAU", "CNA", "EAN", "EAO", "EAS", "EAU",
    "ECA", "EEU", "EIO", "ENA", "EPO", "ESAF", "ESB", "GIC", "MDG", "MED", "NAO", "NAU", "NCA",
    "NEAF", "NEN", "NES", "NEU", "NPO", "NSA", "NWN", "NWS", "NZ", "RAR", "RFE", "SAH", "SAM",
    "SAO", "SAS", "SAU", "SCA", "SEA", "SEAF", "SES", "SIO", "SOO", "SPO", "SSA", "SWS", "TIB",
    "WAF", "WAN", "WCA", "WCE", "WNA", "WSAF", "WSB",
];

/// Scenario experiments.
pub const EXPERIMENTS: [&str; 5] = ["historical", "ssp126", "ssp245", "ssp370", "ssp585"];

/// Aggregation masks.
pub const REALMS: [&str; 3] = ["land", "sea", "landsea"];
