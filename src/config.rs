//! Crate `config` provides solver's configuration.
use std::path::PathBuf;

/// Solver configuration. Nothing is read from a command line; build it in code.
#[derive(Clone, Debug)]
pub struct Config {
    //
    //## I/O configuration
    //
    /// Writes a DRUP UNSAT certification file
    pub use_certification: bool,

    /// Keeps certification records on memory instead of writing a file
    pub cert_on_memory: bool,

    /// Output directory
    pub io_odir: PathBuf,

    /// Cert. file in DRUP format
    pub io_pfile: PathBuf,

    //
    //## equivalent literal substitution
    //
    /// Moves the activity of a replaced var onto its representative
    pub rpl_transfer_activity: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            use_certification: false,
            cert_on_memory: false,
            io_odir: PathBuf::from("."),
            io_pfile: PathBuf::from("proof.out"),
            rpl_transfer_activity: true,
        }
    }
}

impl Config {
    /// return a config which keeps a DRUP certificate on memory.
    ///
    /// ```
    /// use splr_replacer::config::Config;
    /// let config = Config::default().with_memory_certification();
    /// assert!(config.use_certification && config.cert_on_memory);
    /// ```
    pub fn with_memory_certification(self) -> Config {
        Config {
            use_certification: true,
            cert_on_memory: true,
            ..self
        }
    }
}
