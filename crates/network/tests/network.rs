//! Integration tests for building and writing networks

use actnet_network::{
    amalgamate, network_to_writer, run_batch, Batch, DaughterKey, Fallback, FailureLog,
    GasPolicy, InMemorySource, Options, Radionuclides, ReactionKey, ReactionNetwork, Taxonomy,
};
use actnet_nuclide::Kza;
use rstest::{fixture, rstest};

const FE56: Kza = Kza::from_raw(260560);
const ALPHA: DaughterKey = DaughterKey::Nuclide(Kza::from_raw(20040));

#[fixture]
fn taxonomy() -> Taxonomy {
    Taxonomy::endf().unwrap()
}

fn options(group_count: usize) -> Options {
    let mut options = Options::default();
    options.set_group_count(group_count);
    options.disable_progress();
    options
}

fn build(
    source: InMemorySource,
    taxonomy: Taxonomy,
    options: Options,
) -> (ReactionNetwork, FailureLog) {
    let mut batch = Batch::new(taxonomy, Radionuclides::default(), options);
    batch.add("Fe56", &source);
    batch.finish()
}

fn text(network: &ReactionNetwork) -> String {
    let mut buffer = Vec::new();
    network_to_writer(network, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[rstest]
fn fe56_n2n_line(taxonomy: Taxonomy) {
    let mut xs = vec![0.0; 175];
    xs[2] = 1.5;
    let source = InMemorySource::new(2631, FE56).with_section(16, xs);

    let (network, _) = build(source, taxonomy, options(175));
    let output = text(&network);
    let lines: Vec<&str> = output.lines().collect();

    let expected = format!("260560 260550 2n 0 0 1.5{}", " 0".repeat(172));
    assert_eq!(lines, vec!["175", expected.as_str(), "-1"]);
}

#[rstest]
fn alpha_total_removed(taxonomy: Taxonomy) {
    let source = InMemorySource::new(2631, FE56)
        .with_section(207, vec![1.0, 2.0])
        .with_section(22, vec![0.25, 0.5]);

    let mut options = options(2);
    options.set_gas_policy(GasPolicy::Remove);
    let (network, _) = build(source, taxonomy, options);

    assert_eq!(
        text(&network),
        "2\n260560 20040 x 1 2\n260560 240520 nα 0.25 0.5\n-1\n"
    );
}

#[rstest]
fn alpha_total_subtracted(taxonomy: Taxonomy) {
    let source = InMemorySource::new(2631, FE56)
        .with_section(207, vec![1.0, 2.0])
        .with_section(22, vec![0.25, 0.5]);

    let (network, _) = build(source, taxonomy, options(2));

    assert_eq!(
        text(&network),
        "2\n260560 20040 nα 0.25 0.5\n260560 20040 x 0.75 1.5\n260560 240520 nα 0.25 0.5\n-1\n"
    );
}

#[rstest]
fn gas_conservation(taxonomy: Taxonomy) {
    let total = vec![4.0, 2.0, 1.0];
    let source = InMemorySource::new(2631, FE56)
        .with_section(207, total.clone())
        .with_section(22, vec![0.5, 0.25, 0.125])
        .with_section(107, vec![1.0, 0.5, 0.25])
        .with_section(108, vec![0.25, 0.25, 0.0]);

    let (network, _) = build(source, taxonomy, options(3));
    let alpha = network.reactions(FE56, ALPHA).unwrap();

    let mut recovered = vec![0.0; 3];
    for entry in alpha.values() {
        recovered
            .iter_mut()
            .zip(&entry.cross_sections)
            .for_each(|(r, xs)| *r += xs);
    }

    assert_eq!(recovered, total);
    // (n,2α) counts twice
    assert_eq!(alpha[&ReactionKey::Mt(108)].cross_sections, vec![0.5, 0.5, 0.0]);
}

#[rstest]
fn all_zero_network(taxonomy: Taxonomy) {
    let source = InMemorySource::new(2631, FE56)
        .with_section(16, vec![0.0; 4])
        .with_section(102, vec![0.0; 4]);

    let (network, _) = build(source, taxonomy, options(4));
    assert_eq!(network.len(), 2);
    assert_eq!(text(&network), "4\n-1\n");
}

#[rstest]
fn amalgamation_idempotent(taxonomy: Taxonomy) {
    let source = InMemorySource::new(2631, FE56)
        .with_section(4, vec![1.0, 0.0])
        .with_section(51, vec![0.5, 0.5])
        .with_section(52, vec![0.0, 0.25])
        .with_section(103, vec![0.125, 0.0]);

    let mut options = options(2);
    options.set_amalgamate(true);
    let (mut network, _) = build(source, taxonomy, options);

    let once = network.clone();
    amalgamate(&mut network);
    assert_eq!(network, once);
}

#[rstest]
#[case(Fallback::DecayToGround, "260560 260560 n 1 0\n")]
#[case(Fallback::AmalgamateUnknown, "260560 260560* n 1 0\n")]
fn unresolved_isomers(taxonomy: Taxonomy, #[case] fallback: Fallback, #[case] line: &str) {
    // MT51 leaves Fe56 in a level the decay library does not know
    let source = InMemorySource::new(2631, FE56).with_section(51, vec![1.0]);

    let mut options = options(2);
    options.set_fallback(fallback);
    let (network, _) = build(source, taxonomy, options);

    assert_eq!(text(&network), format!("2\n{line}-1\n"));
}

#[rstest]
fn partial_failure(taxonomy: Taxonomy) {
    let inputs = vec![
        (
            "Fe56".to_string(),
            Ok(InMemorySource::new(2631, FE56).with_section(16, vec![1.0])),
        ),
        (
            "Pu239".to_string(),
            Err(actnet_network::Error::ParseError("unreadable tape".into())),
        ),
        (
            "Fe54".to_string(),
            Ok(InMemorySource::new(2625, Kza::from_raw(260540))
                .with_section(16, vec![1.0; 3])
                .with_section(102, vec![1.0])),
        ),
    ];

    let (network, failures) =
        run_batch(inputs, taxonomy, Radionuclides::default(), options(2)).unwrap();

    assert_eq!(
        network.parents().map(|k| k.value()).collect::<Vec<u32>>(),
        vec![260540, 260560]
    );
    assert_eq!(
        failures.failed_isotopes().collect::<Vec<&str>>(),
        vec!["Pu239"]
    );
    assert_eq!(failures.for_isotope("Fe54").count(), 1);
}

#[rstest]
#[case(16, -10)] // (n,2n)
#[case(17, -20)] // (n,3n)
#[case(22, -20040)] // (n,nα)
#[case(28, -10010)] // (n,np)
#[case(32, -10020)] // (n,nd)
#[case(51, 1)] // (n,n1)
#[case(102, 10)] // (n,γ)
#[case(103, -10000)] // (n,p)
#[case(104, -10010)] // (n,d)
#[case(105, -10020)] // (n,t)
#[case(106, -20020)] // (n,3He)
#[case(107, -20030)] // (n,α)
#[case(111, -20010)] // (n,2p)
#[case(600, -10000)] // (n,p0)
#[case(801, -20029)] // (n,α1)
fn del_kza(taxonomy: Taxonomy, #[case] mt: u16, #[case] expected: i64) {
    assert_eq!(taxonomy.get(mt).unwrap().del_kza(), Some(expected));
}
