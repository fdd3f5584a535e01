use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::star::{StarCommand, StarConfig};

// ---------------------------------------------------------------------------
// Aligner choice
// ---------------------------------------------------------------------------

/// Value of `--aligner`.
///
/// `tophat` is accepted on the command line but has no implementation;
/// [`Parameters::validate`] rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aligner {
    Star,
    Tophat,
}

impl std::str::FromStr for Aligner {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "star" => Ok(Self::Star),
            "tophat" => Ok(Self::Tophat),
            _ => Err(format!("unknown aligner '{s}'; expected 'star' or 'tophat'")),
        }
    }
}

impl std::fmt::Display for Aligner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Star => write!(f, "star"),
            Self::Tophat => write!(f, "tophat"),
        }
    }
}

// ---------------------------------------------------------------------------
// Endedness
// ---------------------------------------------------------------------------

/// Value of `--endedness`: one FASTQ (single) or two mated FASTQs (paired).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endedness {
    Single,
    Paired,
}

impl Endedness {
    /// Number of FASTQ files this endedness consumes.
    pub fn n_fastqs(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Paired => 2,
        }
    }
}

impl std::str::FromStr for Endedness {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "paired" => Ok(Self::Paired),
            _ => Err(format!(
                "unknown endedness '{s}'; expected 'paired' or 'single'"
            )),
        }
    }
}

impl std::fmt::Display for Endedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Paired => write!(f, "paired"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parameters struct
// ---------------------------------------------------------------------------

/// Command-line parameters for the mapping step.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rnaseq-align",
    about = "Run the alignment (mapping) step of the RNA-seq pipeline",
    version
)]
pub struct Parameters {
    /// Input gzipped fastq(s); the second file is mate 2 for paired-end
    #[arg(long = "fastqs", num_args = 1..=2, required = true)]
    pub fastqs: Vec<PathBuf>,

    /// star or tophat
    #[arg(long = "aligner")]
    pub aligner: Aligner,

    /// Path to aligner index tar.gz archive
    #[arg(long = "index")]
    pub index: PathBuf,

    /// Directory to extract index to
    #[arg(long = "indexdir", default_value = "out")]
    pub indexdir: PathBuf,

    /// paired or single
    #[arg(long = "endedness")]
    pub endedness: Endedness,

    /// Library identifier which will be added to bam header
    #[arg(long = "libraryid", default_value = "libraryID")]
    pub libraryid: String,

    /// Root name for output bams, e.g. out_bam gives out_bam_genome.bam and out_bam_anno.bam
    #[arg(long = "bamroot", default_value = "out_bam")]
    pub bamroot: String,

    /// Number of cpus available
    #[arg(long = "ncpus", default_value_t = 4)]
    pub ncpus: u32,

    /// Amount of RAM available in GB
    #[arg(long = "ramGB", default_value_t = 8)]
    pub ram_gb: u32,
}

impl Parameters {
    /// Validate parameter combinations that clap alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        if self.aligner == Aligner::Tophat {
            return Err(Error::Unimplemented(
                "--aligner tophat has no implementation; use --aligner star".into(),
            ));
        }

        let expected = self.endedness.n_fastqs();
        if self.fastqs.len() != expected {
            return Err(Error::Parameter(format!(
                "--endedness {} needs {} fastq file(s) in --fastqs, got {}",
                self.endedness,
                expected,
                self.fastqs.len()
            )));
        }

        if self.ncpus == 0 {
            return Err(Error::Parameter("--ncpus must be >= 1".into()));
        }
        if self.ram_gb == 0 {
            return Err(Error::Parameter("--ramGB must be >= 1".into()));
        }

        Ok(())
    }

    /// Resource and index settings shared by both STAR command variants.
    pub fn star_config(&self) -> StarConfig {
        StarConfig {
            index_dir: self.indexdir.clone(),
            ncpus: self.ncpus,
            ram_gb: self.ram_gb,
        }
    }

    /// Pick the STAR command variant for this run's endedness.
    ///
    /// Call [`Parameters::validate`] first; the FASTQ count is checked there.
    pub fn star_command(&self) -> Result<StarCommand, Error> {
        match (self.endedness, self.fastqs.as_slice()) {
            (Endedness::Single, [fastq]) => Ok(StarCommand::SingleEnd {
                fastq: fastq.clone(),
            }),
            (Endedness::Paired, [read1, read2]) => Ok(StarCommand::PairedEnd {
                read1: read1.clone(),
                read2: read2.clone(),
            }),
            (endedness, fastqs) => Err(Error::Parameter(format!(
                "{} fastq file(s) given for {endedness}-end alignment",
                fastqs.len()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
