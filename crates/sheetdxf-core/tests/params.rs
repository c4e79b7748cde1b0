use sheetdxf_core::params::{
    component_name, flat_dxf_name, flat_dxf_path, DesignDims, ExportTargets, ParamsError,
};
use std::fs;
use std::path::Path;

#[test]
fn defaults_match_the_host_template() {
    let dims = DesignDims::default();
    assert_eq!(4, dims.length_screws);
    assert_eq!(4, dims.width_screws);
    assert_eq!(200.0, dims.length);
    assert_eq!(400.0, dims.width);
    assert_eq!(100.0, dims.height);
    dims.validate().expect("defaults validate");
}

#[test]
fn rejects_short_panels_and_zero_counts() {
    let dims = DesignDims {
        length: 99.9,
        ..Default::default()
    };
    assert!(matches!(
        dims.validate(),
        Err(ParamsError::Invalid { name: "Length", .. })
    ));

    let dims = DesignDims {
        height: f64::NAN,
        ..Default::default()
    };
    assert!(matches!(
        dims.validate(),
        Err(ParamsError::Invalid { name: "Height", .. })
    ));

    let dims = DesignDims {
        width_screws: 0,
        ..Default::default()
    };
    assert!(matches!(
        dims.validate(),
        Err(ParamsError::Invalid { name: "Width_Screws", .. })
    ));

    let edge = DesignDims {
        length: 100.0,
        width: 100.0,
        height: 100.0,
        ..Default::default()
    };
    edge.validate().expect("100 mm is allowed");
}

#[test]
fn expressions_carry_units_on_lengths_only() {
    let dims = DesignDims {
        length: 250.5,
        ..Default::default()
    };
    let exprs = dims.expressions();
    assert_eq!(("Length_Screws", "4".to_string()), exprs[0]);
    assert_eq!(("Length", "250.5 mm".to_string()), exprs[2]);
    assert_eq!(("Height", "100 mm".to_string()), exprs[4]);
}

#[test]
fn dims_file_uses_host_key_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("drop").join("dims.json");
    let dims = DesignDims {
        length: 300.0,
        width_screws: 6,
        ..Default::default()
    };

    dims.write_dims_file(&path).expect("write");
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(300.0, raw["Length"]);
    assert_eq!(6, raw["Width_Screws"]);

    assert_eq!(dims, DesignDims::load_or_default(&path).expect("load"));
}

#[test]
fn invalid_dims_are_never_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dims.json");
    let dims = DesignDims {
        width: 10.0,
        ..Default::default()
    };
    assert!(dims.write_dims_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dims.json");
    fs::write(&path, r#"{ "Length": 500 }"#).expect("write");

    let dims = DesignDims::load_or_default(&path).expect("load");
    assert_eq!(500.0, dims.length);
    assert_eq!(400.0, dims.width);

    let absent = DesignDims::load_or_default(&dir.path().join("none.json")).expect("load");
    assert_eq!(DesignDims::default(), absent);

    fs::write(&path, "{ not json").expect("write");
    assert!(matches!(
        DesignDims::load_or_default(&path),
        Err(ParamsError::Parse { .. })
    ));
}

#[test]
fn export_selection_is_prefix_based_and_skips_mirrors() {
    let targets = ExportTargets::default();
    assert!(targets.selects("Top:1"));
    assert!(targets.selects("SIDE1:2"));
    assert!(targets.selects("side2_bracket:1"));
    assert!(!targets.selects("Side1_Mirror:1"));
    assert!(!targets.selects("Bottom:1"));
    assert!(!targets.selects("Side3:1"));
}

#[test]
fn flat_file_names_follow_the_component() {
    assert_eq!("Top", component_name("Top:1"));
    assert_eq!("Side1", component_name("Side1:12"));
    assert_eq!("Bracket", component_name("Bracket"));
    assert_eq!("Odd:name", component_name("Odd:name"));
    assert_eq!("Top_flat.dxf", flat_dxf_name("Top"));
    assert_eq!(
        Path::new("out").join("Side2_flat.dxf"),
        flat_dxf_path(Path::new("out"), "Side2:1")
    );
}
