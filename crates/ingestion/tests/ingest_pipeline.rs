//! Integration tests: write DRS-named CSV files, ingest them, read the cube.

use std::io::Cursor;
use std::path::Path;

use cmip_common::{Axis, CoordinateSystem};
use cube_store::{Hyperplane, RegionalStore, StoreConfig};
use ingestion::{Ingester, IngestionError};
use test_utils::{assert_all_fill, pattern_value, small_coordinates, RegionalCsv};

const FILL: f32 = 9999.0;

fn small_ingester(dir: &Path) -> Ingester {
    let store = RegionalStore::create(
        dir.join("CMIP6.zarr"),
        &small_coordinates(),
        &StoreConfig::default(),
    )
    .expect("Failed to create store");
    Ingester::new(store)
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn count_non_fill(values: &[f32]) -> usize {
    values.iter().filter(|v| **v != FILL).count()
}

#[test]
fn test_end_to_end_cmip6_cube() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let coords = CoordinateSystem::cmip6().unwrap();
    let store = RegionalStore::create(dir.path().join("CMIP6.zarr"), &coords, &StoreConfig::default())
        .unwrap();
    let ingester = Ingester::new(store);

    let file = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .ensemble("r1")
        .regions(&["world", "SAH"])
        .row("2015-01", &[12.3, 30.1])
        .row("2015-02", &[12.9, 31.0])
        .write_to(dir.path())
        .unwrap();

    let result = ingester.ingest_file(path_str(&file)).unwrap();
    assert_eq!(result.cells_written, 4);
    assert_eq!(result.times, 2);
    assert_eq!(result.regions, 2);

    let store = ingester.into_store();
    assert_eq!(
        store
            .read_labeled("tas", "CESM2", "ssp245", "world", "land", "2015-01")
            .unwrap(),
        12.3
    );
    assert_eq!(
        store
            .read_labeled("tas", "CESM2", "ssp245", "SAH", "land", "2015-02")
            .unwrap(),
        31.0
    );

    let model = coords.lookup(Axis::Model, "CESM2").unwrap() as u64;
    let experiment = coords.lookup(Axis::Experiment, "ssp245").unwrap() as u64;
    let land = coords.lookup(Axis::Realm, "land").unwrap() as u64;
    let sea = coords.lookup(Axis::Realm, "sea").unwrap() as u64;

    let plane = store
        .read_hyperplane("tas", Hyperplane::new(model, experiment, land))
        .unwrap();
    assert_eq!(count_non_fill(&plane), 4);

    let neighbour = store
        .read_hyperplane("tas", Hyperplane::new(model, experiment, sea))
        .unwrap();
    assert_all_fill!(neighbour, FILL);

    let other_variable = store
        .read_hyperplane("pr", Hyperplane::new(model, experiment, land))
        .unwrap();
    assert_all_fill!(other_variable, FILL);
}

#[test]
fn test_only_table_cells_are_written() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let months = ["2014-06", "2014-07", "2014-08"];
    let mut csv = RegionalCsv::new("pr", "sea", "MIROC6", "historical").regions(&["MED", "world"]);
    for (t, month) in months.iter().enumerate() {
        csv = csv.row(month, &[pattern_value(t, 0), pattern_value(t, 1)]);
    }
    let file = csv.write_to(dir.path()).unwrap();

    ingester.ingest_file(path_str(&file)).unwrap();
    let store = ingester.into_store();

    assert_eq!(count_non_fill(&store.read_variable("pr").unwrap()), 6);
    assert_all_fill!(store.read_variable("tas").unwrap(), FILL);

    for (t, month) in months.iter().enumerate() {
        assert_eq!(
            store
                .read_labeled("pr", "MIROC6", "historical", "MED", "sea", month)
                .unwrap(),
            pattern_value(t, 0)
        );
        assert_eq!(
            store
                .read_labeled("pr", "MIROC6", "historical", "world", "sea", month)
                .unwrap(),
            pattern_value(t, 1)
        );
        assert_eq!(
            store
                .read_labeled("pr", "MIROC6", "historical", "SAH", "sea", month)
                .unwrap(),
            FILL
        );
    }
}

#[test]
fn test_column_order_does_not_matter() {
    let first = tempfile::tempdir().expect("Failed to create temp dir");
    let second = tempfile::tempdir().expect("Failed to create temp dir");

    let build = |dir: &Path, regions: &[&str], date_at: usize, rows: &[(&str, [f32; 3])]| {
        let mut csv = RegionalCsv::new("tas", "land", "CESM2", "historical")
            .regions(regions)
            .date_column_at(date_at);
        for (date, values) in rows {
            csv = csv.row(date, values);
        }
        csv.write_to(dir).unwrap()
    };

    let a = build(
        first.path(),
        &["world", "SAH", "MED"],
        0,
        &[("2016-01", [1.0, 2.0, 3.0]), ("2016-02", [4.0, 5.0, 6.0])],
    );
    let b = build(
        second.path(),
        &["MED", "world", "SAH"],
        2,
        &[("2016-02", [6.0, 4.0, 5.0]), ("2016-01", [3.0, 1.0, 2.0])],
    );

    let ingester_a = small_ingester(first.path());
    let ingester_b = small_ingester(second.path());
    ingester_a.ingest_file(path_str(&a)).unwrap();
    ingester_b.ingest_file(path_str(&b)).unwrap();

    assert_eq!(
        ingester_a.store().read_variable("tas").unwrap(),
        ingester_b.store().read_variable("tas").unwrap()
    );
    assert_eq!(
        ingester_b
            .store()
            .read_labeled("tas", "CESM2", "historical", "SAH", "land", "2016-02")
            .unwrap(),
        5.0
    );
}

#[test]
fn test_non_rectangular_table_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let file = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .regions(&["world", "SAH"])
        .row("2015-01", &[1.0, 2.0])
        .raw_row("2015-02", &["3.0"])
        .write_to(dir.path())
        .unwrap();

    assert!(matches!(
        ingester.ingest_file(path_str(&file)),
        Err(IngestionError::NonRectangularInput {
            expected: 4,
            found: 3,
            ..
        })
    ));
    assert_all_fill!(ingester.store().read_variable("tas").unwrap(), FILL);
}

#[test]
fn test_missing_values_are_stored_as_nan() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let file = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .regions(&["world", "SAH"])
        .raw_row("2015-01", &["", "NaN"])
        .write_to(dir.path())
        .unwrap();

    ingester.ingest_file(path_str(&file)).unwrap();

    let value = ingester
        .store()
        .read_labeled("tas", "CESM2", "ssp245", "world", "land", "2015-01")
        .unwrap();
    assert!(value.is_nan());
}

#[test]
fn test_malformed_path_writes_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let path = dir.path().join("CMIP6_tas/CMIP6_CESM2_ssp245_r1i1p1f1.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .regions(&["world"])
        .row("2015-01", &[1.0]);
    std::fs::write(&path, file.render()).unwrap();

    assert!(matches!(
        ingester.ingest_file(path_str(&path)),
        Err(IngestionError::MalformedPath(_))
    ));
    assert_all_fill!(ingester.store().read_variable("tas").unwrap(), FILL);
}

#[test]
fn test_unknown_labels_abort_the_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let unknown_region = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .regions(&["world", "ARO"])
        .row("2015-01", &[1.0, 2.0])
        .write_to(dir.path())
        .unwrap();
    assert!(matches!(
        ingester.ingest_file(path_str(&unknown_region)),
        Err(IngestionError::UnknownLabel(_))
    ));

    let out_of_range = RegionalCsv::new("tas", "sea", "CESM2", "ssp245")
        .regions(&["world"])
        .row("2017-01", &[1.0])
        .write_to(dir.path())
        .unwrap();
    assert!(matches!(
        ingester.ingest_file(path_str(&out_of_range)),
        Err(IngestionError::UnknownLabel(_))
    ));

    let unknown_model = RegionalCsv::new("tas", "land", "NoSuchModel", "ssp245")
        .regions(&["world"])
        .row("2015-01", &[1.0])
        .write_to(dir.path())
        .unwrap();
    assert!(matches!(
        ingester.ingest_file(path_str(&unknown_model)),
        Err(IngestionError::UnknownLabel(_))
    ));

    assert_all_fill!(ingester.store().read_variable("tas").unwrap(), FILL);
}

#[test]
fn test_later_file_overwrites_overlap() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let first = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .ensemble("r1i1p1f1")
        .regions(&["world", "SAH"])
        .row("2015-01", &[1.0, 2.0])
        .row("2015-02", &[3.0, 4.0])
        .write_to(dir.path())
        .unwrap();
    let second = RegionalCsv::new("tas", "land", "CESM2", "ssp245")
        .ensemble("r2i1p1f1")
        .regions(&["SAH"])
        .row("2015-02", &[-4.0])
        .row("2015-03", &[-5.0])
        .write_to(dir.path())
        .unwrap();

    let list = format!("{}\n\n{}\n", path_str(&first), path_str(&second));
    let summary = ingester.ingest_list(Cursor::new(list)).unwrap();
    assert_eq!(summary.files, 2);
    assert_eq!(summary.cells_written, 6);

    let store = ingester.store();
    let read = |region: &str, month: &str| {
        store
            .read_labeled("tas", "CESM2", "ssp245", region, "land", month)
            .unwrap()
    };
    assert_eq!(read("world", "2015-01"), 1.0);
    assert_eq!(read("SAH", "2015-01"), 2.0);
    assert_eq!(read("world", "2015-02"), 3.0);
    assert_eq!(read("SAH", "2015-02"), -4.0);
    assert_eq!(read("SAH", "2015-03"), -5.0);
    assert_eq!(read("world", "2015-03"), FILL);
}

#[test]
fn test_ingest_list_stops_at_first_failure() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ingester = small_ingester(dir.path());

    let good = RegionalCsv::new("pr", "land", "CESM2", "historical")
        .regions(&["world"])
        .row("2014-01", &[1.0])
        .write_to(dir.path())
        .unwrap();
    let after = RegionalCsv::new("pr", "sea", "CESM2", "historical")
        .regions(&["world"])
        .row("2014-01", &[2.0])
        .write_to(dir.path())
        .unwrap();
    let missing = dir.path().join("CMIP6_pr_land/CMIP6_CESM2_ssp245_missing.csv");

    let list = format!(
        "{}\n{}\n{}\n",
        path_str(&good),
        path_str(&missing),
        path_str(&after)
    );
    assert!(matches!(
        ingester.ingest_list(Cursor::new(list)),
        Err(IngestionError::FileRead(_))
    ));

    let store = ingester.store();
    assert_eq!(
        store
            .read_labeled("pr", "CESM2", "historical", "world", "land", "2014-01")
            .unwrap(),
        1.0
    );
    assert_eq!(
        store
            .read_labeled("pr", "CESM2", "historical", "world", "sea", "2014-01")
            .unwrap(),
        FILL
    );
}

#[test]
fn test_reopened_store_accepts_more_files() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("CMIP6.zarr");
    RegionalStore::create(&path, &small_coordinates(), &StoreConfig::default()).unwrap();

    let ingester = Ingester::new(RegionalStore::open(&path).unwrap());
    let file = RegionalCsv::new("tas", "sea", "MIROC6", "ssp245")
        .regions(&["MED"])
        .row("2016-12", &[7.5])
        .write_to(dir.path())
        .unwrap();
    ingester.ingest_file(path_str(&file)).unwrap();
    drop(ingester);

    let store = RegionalStore::open(&path).unwrap();
    assert_eq!(
        store
            .read_labeled("tas", "MIROC6", "ssp245", "MED", "sea", "2016-12")
            .unwrap(),
        7.5
    );
}
