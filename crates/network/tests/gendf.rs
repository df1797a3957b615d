//! Integration tests for networks built from GENDF tapes
#![cfg(feature = "gendf")]

use actnet_network::{
    network_to_writer, run_gendf_batch, CrossSectionSource, Error, Options, Radionuclides,
    Taxonomy,
};
use actnet_gendf::Tape;
use rstest::{fixture, rstest};

#[fixture]
fn options() -> Options {
    let mut options = Options::default();
    options.set_group_count(4);
    options.disable_progress();
    options
}

#[test]
fn tape_as_source() {
    let tape = Tape::from_file("../gendf/data/fe56.gendf").unwrap();
    assert_eq!(CrossSectionSource::material_id(&tape), 2631);
    assert_eq!(tape.parent().unwrap().value(), 260560);
    assert!(matches!(
        CrossSectionSource::cross_sections(&tape, 107),
        Err(Error::SectionNotFound { mt: 107, .. })
    ));
}

#[rstest]
fn fe56_network(options: Options) {
    let (network, failures) = run_gendf_batch(
        &["../gendf/data/fe56.gendf"],
        Taxonomy::endf().unwrap(),
        Radionuclides::default(),
        options,
    )
    .unwrap();

    let mut buffer = Vec::new();
    network_to_writer(&network, &mut buffer).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        [
            "4",
            "260560 10010 x 0.25 0 0 0",
            "260560 260550 2n 0.5 1.5 0 0",
            "260560 260570 γ 0.0002 0 0 0.001",
            "-1\n",
        ]
        .join("\n")
    );
    assert!(failures.is_empty());
}

#[rstest]
fn missing_tape_recorded(options: Options) {
    let (network, failures) = run_gendf_batch(
        &["../gendf/data/fe56.gendf", "./data/not_a_tape.gendf"],
        Taxonomy::endf().unwrap(),
        Radionuclides::default(),
        options,
    )
    .unwrap();

    assert_eq!(network.parents().count(), 1);
    assert_eq!(
        failures.failed_isotopes().collect::<Vec<&str>>(),
        vec!["./data/not_a_tape.gendf"]
    );
}
