//! Command line tool for building activation reaction networks

// actnet crates
use actnet::gendf::Tape;
use actnet::network::{
    run_gendf_batch, write_network, Fallback, FailureLog, GasPolicy, Options, Radionuclides,
    Taxonomy,
};
use actnet::njoy::{search_for_files, split_isotope, Njoy};

// standard library
use std::path::{Path, PathBuf};

// external crates
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, error, info, warn};

/// Build activation reaction networks from evaluated nuclear data
///
/// The usual workflow is to prepare PENDF tapes, convert the ENDF/PENDF pairs
/// to groupwise GENDF tapes with NJOY/GROUPR, and then build the network.
/// The `run` command does the last two in one go.
#[derive(Parser, Debug)]
#[command(version, about, long_about, arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce PENDF tapes from ENDF files with NJOY
    Pendf(PendfArgs),
    /// Convert every ENDF/PENDF pair in a directory to GENDF tapes
    Groupr(GrouprArgs),
    /// Build a reaction network from GENDF tapes
    Build(BuildArgs),
    /// Run GROUPR over a directory and build the network from the results
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct PendfArgs {
    /// ENDF files named <element><A>.<ext>, e.g. Fe56.tendl
    #[arg(required = true)]
    endf: Vec<PathBuf>,

    /// Directory for the PENDF tapes
    #[arg(short, long, value_name = "dir", default_value = ".")]
    output: PathBuf,

    #[command(flatten)]
    njoy: NjoyArgs,
}

#[derive(Args, Debug)]
struct GrouprArgs {
    /// Directory of <element><A>.tendl/.endf files with matching .pendf files
    dir: PathBuf,

    /// Directory for the GENDF tapes
    #[arg(short, long, value_name = "dir", default_value = "gendf")]
    output: PathBuf,

    /// Reaction table CSV with "MT" and "Reaction" columns
    #[arg(short, long, value_name = "path")]
    table: Option<PathBuf>,

    /// Write skipped isotopes and reactions to a file
    #[arg(long, value_name = "path")]
    failures: Option<PathBuf>,

    #[command(flatten)]
    njoy: NjoyArgs,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// GENDF tapes
    #[arg(required = true)]
    gendf: Vec<PathBuf>,

    #[command(flatten)]
    network: NetworkArgs,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    groupr: GrouprArgs,

    #[command(flatten)]
    network: NetworkArgs,
}

#[derive(Args, Debug)]
struct NjoyArgs {
    /// NJOY executable
    #[arg(long, value_name = "path", default_value = "njoy")]
    njoy: PathBuf,

    /// Temperature for Doppler broadening (K)
    #[arg(long, value_name = "kelvin", default_value_t = 293.6)]
    temperature: f64,

    /// Directory NJOY runs in
    #[arg(long, value_name = "dir", default_value = "njoy_work")]
    work_dir: PathBuf,

    /// Keep the NJOY input deck and intermediate tapes
    #[arg(long)]
    keep: bool,
}

#[derive(Args, Debug)]
struct NetworkArgs {
    /// Output network file
    #[arg(short = 'n', long, value_name = "path", default_value = "network.txt")]
    network: PathBuf,

    /// Reaction table CSV, the ENDF-6 table is used if not given
    #[arg(long = "mt-table", value_name = "path")]
    mt_table: Option<PathBuf>,

    /// Nuclides with decay data, as KZA values or names
    #[arg(short, long, value_name = "path")]
    radionuclides: Option<PathBuf>,

    /// Number of energy groups
    #[arg(short, long, value_name = "n", default_value_t = 175)]
    groups: usize,

    /// Handling of isomers without decay data
    #[arg(long, value_enum, default_value_t = IsomerArg::Ground)]
    isomers: IsomerArg,

    /// Handling of light gas production totals
    #[arg(long, value_enum, default_value_t = GasArg::Subtract)]
    gas: GasArg,

    /// Collapse every pathway between a parent and daughter into one
    #[arg(short, long)]
    amalgamate: bool,

    /// Write skipped isotopes and reactions to a file
    #[arg(long = "failure-log", value_name = "path")]
    failure_log: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IsomerArg {
    /// Decay to the ground state
    Ground,
    /// Collect in an unresolved isomer bucket
    Unknown,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GasArg {
    /// Keep only the aggregate gas totals
    Remove,
    /// Subtract individual pathways from the gas totals
    Subtract,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging_init(&cli);

    match cli.command {
        Command::Pendf(args) => pendf(&args),
        Command::Groupr(args) => groupr(&args).map(|_| ()),
        Command::Build(args) => build(&args.gendf, &args.network, FailureLog::default()),
        Command::Run(args) => {
            let (tapes, failures) = groupr(&args.groupr)?;
            build(&tapes, &args.network, failures)
        }
    }
}

fn pendf(args: &PendfArgs) -> Result<()> {
    let njoy = init_njoy(&args.njoy);

    for endf in &args.endf {
        let Some((element, mass)) = endf
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(split_isotope)
        else {
            warn!("Unable to infer isotope from {}", endf.display());
            continue;
        };

        let result = Tape::from_file(endf)
            .map_err(|e| anyhow!(e))
            .and_then(|tape| {
                njoy.make_pendf(
                    endf,
                    element,
                    mass,
                    tape.material_id(),
                    args.njoy.temperature,
                    &args.output,
                )
                .map_err(|e| anyhow!(e))
            });

        match result {
            Ok(path) => info!("Wrote {}", path.display()),
            Err(e) => error!("{element}{mass}: {e}"),
        }
    }

    Ok(())
}

fn groupr(args: &GrouprArgs) -> Result<(Vec<PathBuf>, FailureLog)> {
    let njoy = init_njoy(&args.njoy);
    let taxonomy = load_taxonomy(args.table.as_deref())?;
    let mut failures = FailureLog::default();
    let mut tapes = Vec::new();

    let files = search_for_files(&args.dir)?;
    info!("Found {} ENDF/PENDF pairs in {}", files.len(), args.dir.display());

    for isotope in files {
        let name = isotope.name();

        let Some(target) = isotope.kza() else {
            warn!("{name}: file name is not a known nuclide");
            failures.record(&name, None, "file name is not a known nuclide");
            continue;
        };
        debug!("{name}: target KZA {target}");

        // the material and reaction list come straight from the ENDF file
        let endf = match Tape::from_file(&isotope.endf) {
            Ok(tape) => tape,
            Err(e) => {
                warn!("{name}: {e}");
                failures.record(&name, None, e.to_string());
                continue;
            }
        };

        let reactions = taxonomy.groupr_reactions(endf.reaction_codes());
        match njoy.groupr(
            &isotope,
            endf.material_id(),
            &reactions,
            args.njoy.temperature,
            &args.output,
        ) {
            Ok(path) => tapes.push(path),
            Err(e) => {
                warn!("{name}: {e}");
                failures.record(&name, None, e.to_string());
            }
        }
    }

    if let Some(path) = &args.failures {
        failures.write(path)?;
    }

    Ok((tapes, failures))
}

fn build(tapes: &[PathBuf], args: &NetworkArgs, mut failures: FailureLog) -> Result<()> {
    let taxonomy = load_taxonomy(args.mt_table.as_deref())?;

    let radionuclides = match &args.radionuclides {
        Some(path) => Radionuclides::from_file(path)?,
        None => {
            warn!("No radionuclide list, every isomer is unresolved");
            Radionuclides::default()
        }
    };

    let (network, batch_failures) =
        run_gendf_batch(tapes, taxonomy, radionuclides, network_options(args))?;
    failures.extend(batch_failures);

    write_network(&network, &args.network)?;
    info!("Wrote {}", args.network.display());

    if let Some(path) = &args.failure_log {
        failures.write(path)?;
        info!("Wrote {} failures to {}", failures.len(), path.display());
    } else if !failures.is_empty() {
        warn!("{} isotopes or reactions skipped", failures.len());
    }

    Ok(())
}

fn network_options(args: &NetworkArgs) -> Options {
    let mut options = Options::new();
    options.set_group_count(args.groups);
    options.set_amalgamate(args.amalgamate);

    options.set_fallback(match args.isomers {
        IsomerArg::Ground => Fallback::DecayToGround,
        IsomerArg::Unknown => Fallback::AmalgamateUnknown,
    });

    options.set_gas_policy(match args.gas {
        GasArg::Remove => GasPolicy::Remove,
        GasArg::Subtract => GasPolicy::Subtract,
    });

    if args.no_progress {
        options.disable_progress();
    }

    options
}

fn load_taxonomy(path: Option<&Path>) -> Result<Taxonomy> {
    Ok(match path {
        Some(path) => Taxonomy::from_file(path)?,
        None => Taxonomy::endf()?,
    })
}

fn init_njoy(args: &NjoyArgs) -> Njoy {
    let mut njoy = Njoy::new(&args.work_dir);
    njoy.set_executable(&args.njoy);
    if args.keep {
        njoy.keep_files();
    }
    njoy
}

fn logging_init(cli: &Cli) {
    // -v => info, -vv => debug, -vvv => trace
    let result = stderrlog::new()
        .modules([
            module_path!(),
            "actnet_gendf",
            "actnet_network",
            "actnet_njoy",
        ])
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 1)
        .show_level(true)
        .color(stderrlog::ColorChoice::Auto)
        .init();

    if let Err(e) = result {
        eprintln!("Unable to initialise logging: {e}");
    }
}
