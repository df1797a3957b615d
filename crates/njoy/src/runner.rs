//! Execution of NJOY runs

// internal modules
use crate::deck::{fill_input_template, RunType, NENDF, NGOUT2, NIN_MODER, NPEND};
use crate::discovery::IsotopeFiles;
use crate::error::{Error, Result};
use crate::markers::ensure_gendf_markers;

// actnet modules
use actnet_utils::f;

// standard library
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// external crates
use log::{debug, info, trace};

/// Name of the input deck written alongside the tapes
const INPUT_DECK: &str = "njoy.inp";

/// Driver for NJOY runs in a working directory
///
/// NJOY reads and writes `tape<unit>` files in its current directory, so the
/// input tapes are staged into the working directory before a run and the
/// result is moved out afterwards.
///
/// ```rust, no_run
/// # use actnet_njoy::{search_for_files, Njoy};
/// let mut njoy = Njoy::new("/tmp/njoy");
/// njoy.set_executable("/opt/njoy/bin/njoy");
///
/// for files in search_for_files("./tendl").unwrap() {
///     let reactions = [(16, "(z,2n)"), (102, "(z,g)")];
///     match njoy.groupr(&files, 2631, &reactions, 293.6, "./gendf") {
///         Ok(path) => println!("wrote {}", path.display()),
///         Err(e) => println!("{e}"),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Njoy {
    /// NJOY executable, looked up on `PATH` if not a full path
    executable: PathBuf,
    /// Directory NJOY runs in
    work_dir: PathBuf,
    /// Keep the intermediate tapes and input deck after a run
    keep_files: bool,
}

impl Default for Njoy {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("njoy"),
            work_dir: PathBuf::from("."),
            keep_files: false,
        }
    }
}

impl Njoy {
    /// Run NJOY inside `work_dir`
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self {
            work_dir: work_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Setter for the NJOY executable
    pub fn set_executable<P: AsRef<Path>>(&mut self, executable: P) {
        self.executable = executable.as_ref().to_path_buf();
    }

    /// Do not remove the intermediate tapes after a run
    pub fn keep_files(&mut self) {
        self.keep_files = true;
    }

    /// Run NJOY on an input deck
    ///
    /// The deck is written to `njoy.inp` in the working directory and passed
    /// to NJOY on stdin. Anything written to stderr or a non-zero exit status
    /// counts as failure, with the NJOY message kept in the error.
    pub fn run(&self, deck: &str, isotope: &str) -> Result<String> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::write(self.work_dir.join(INPUT_DECK), deck)?;

        debug!("Running {} for {isotope}", self.executable.display());
        let mut child = Command::new(&self.executable)
            .current_dir(&self.work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // njoy may exit before reading everything, the exit status says more
            if let Err(e) = stdin.write_all(deck.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !stderr.is_empty() {
            return Err(Error::NjoyFailed {
                isotope: isotope.to_string(),
                message: stderr,
            });
        }

        if !output.status.success() {
            return Err(Error::NjoyFailed {
                isotope: isotope.to_string(),
                message: f!("exited with {}", output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Produce a PENDF tape from an ENDF file
    ///
    /// Returns the path to `tendl_2017_<element><A>.pendf` in `output_dir`.
    pub fn make_pendf<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        endf: P,
        element: &str,
        mass: &str,
        material_id: u32,
        temperature: f64,
        output_dir: Q,
    ) -> Result<PathBuf> {
        let isotope = f!("{element}{mass}");
        let deck = fill_input_template(
            material_id,
            &[],
            element,
            mass,
            temperature,
            RunType::Prep,
        )?;

        self.stage(endf.as_ref(), NIN_MODER)?;
        let name = output_name(element, mass, "pendf");
        let result = self
            .run(&deck, &isotope)
            .and_then(|_| self.collect(NPEND, output_dir.as_ref(), &name));
        self.cleanup();

        let path = result?;
        info!("Finished PENDF for {isotope}");
        Ok(path)
    }

    /// Convert an ENDF/PENDF pair into a groupwise GENDF tape
    ///
    /// Only the listed reactions are processed. Returns the path to
    /// `tendl_2017_<element><A>.gendf` in `output_dir`, with any missing end
    /// records already inserted.
    pub fn groupr<P: AsRef<Path>>(
        &self,
        files: &IsotopeFiles,
        material_id: u32,
        reactions: &[(u16, &str)],
        temperature: f64,
        output_dir: P,
    ) -> Result<PathBuf> {
        let isotope = files.name();
        let deck = fill_input_template(
            material_id,
            reactions,
            &files.element,
            &files.mass,
            temperature,
            RunType::Groupr,
        )?;

        self.stage(&files.endf, NENDF)?;
        self.stage(&files.pendf, NPEND)?;

        let name = output_name(&files.element, &files.mass, "gendf");
        let result = self
            .run(&deck, &isotope)
            .and_then(|_| self.collect(NGOUT2, output_dir.as_ref(), &name))
            .and_then(|path| {
                ensure_gendf_markers(&path, material_id)?;
                Ok(path)
            });
        self.cleanup();

        let path = result?;
        info!("Finished GENDF for {isotope}");
        Ok(path)
    }

    /// Copy an input file to the tape NJOY expects for a unit
    fn stage(&self, source: &Path, unit: u32) -> Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        let tape = self.tape(unit);
        trace!("Staging {} as {}", source.display(), tape.display());
        std::fs::copy(source, tape)?;
        Ok(())
    }

    /// Move an output tape out of the working directory
    fn collect(&self, unit: u32, output_dir: &Path, name: &str) -> Result<PathBuf> {
        let tape = self.tape(unit);
        if !tape.is_file() {
            return Err(Error::MissingTape(tape));
        }

        std::fs::create_dir_all(output_dir)?;
        let destination = output_dir.join(name);

        // rename fails across file systems
        if std::fs::rename(&tape, &destination).is_err() {
            std::fs::copy(&tape, &destination)?;
        }

        Ok(destination)
    }

    /// Remove the intermediate tapes and input deck
    fn cleanup(&self) {
        if self.keep_files {
            return;
        }

        let mut files: Vec<PathBuf> = (NIN_MODER..=NPEND).map(|u| self.tape(u)).collect();
        files.push(self.tape(NGOUT2));
        files.push(self.work_dir.join(INPUT_DECK));

        for file in files.iter().filter(|f| f.is_file()) {
            if let Err(e) = std::fs::remove_file(file) {
                debug!("Unable to remove {}: {e}", file.display());
            }
        }
    }

    fn tape(&self, unit: u32) -> PathBuf {
        self.work_dir.join(f!("tape{unit}"))
    }
}

/// Output file name, e.g. `tendl_2017_Fe056.gendf`
fn output_name(element: &str, mass: &str, extension: &str) -> String {
    f!("tendl_2017_{element}{mass:0>3}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        assert_eq!(output_name("Fe", "56", "gendf"), "tendl_2017_Fe056.gendf");
        assert_eq!(output_name("Ag", "116m", "pendf"), "tendl_2017_Ag116m.pendf");
        assert_eq!(output_name("H", "1", "gendf"), "tendl_2017_H001.gendf");
    }

    #[test]
    fn missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let mut njoy = Njoy::new(dir.path());
        njoy.set_executable(dir.path().join("not-njoy"));
        assert!(matches!(
            njoy.run("stop\n", "Fe56"),
            Err(Error::IOError(_))
        ));
    }
}
