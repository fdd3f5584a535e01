/// STAR command construction for single- and paired-end runs
use std::path::{Path, PathBuf};

use crate::params::Endedness;

/// Name of the STAR executable, resolved through `PATH`.
pub const STAR_PROGRAM: &str = "STAR";

/// File STAR reads `@CO` header lines from.
pub const HEADER_COMMENT_FILE: &str = "COfile.txt";

const BYTES_PER_GB: u64 = 1_000_000_000;

/// Settings shared by both command variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarConfig {
    /// Directory the genome index was extracted to (`--genomeDir`).
    pub index_dir: PathBuf,
    /// Thread count (`--runThreadN`).
    pub ncpus: u32,
    /// RAM for BAM sorting in GB (`--limitBAMsortRAM`, passed in bytes).
    pub ram_gb: u32,
}

/// The two STAR invocations, distinguished by read count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarCommand {
    SingleEnd { fastq: PathBuf },
    PairedEnd { read1: PathBuf, read2: PathBuf },
}

impl StarCommand {
    /// Endedness implied by the number of FASTQs this variant carries.
    pub fn endedness(&self) -> Endedness {
        match self {
            Self::SingleEnd { .. } => Endedness::Single,
            Self::PairedEnd { .. } => Endedness::Paired,
        }
    }

    /// Build the full argument vector, program name first.
    pub fn build(&self, cfg: &StarConfig) -> Vec<String> {
        let mut cmd = vec![STAR_PROGRAM.to_string()];
        push_flag(&mut cmd, "--genomeDir", [path_arg(&cfg.index_dir)]);

        match self {
            Self::SingleEnd { fastq } => {
                push_flag(&mut cmd, "--readFilesIn", [path_arg(fastq)]);
            }
            Self::PairedEnd { read1, read2 } => {
                push_flag(
                    &mut cmd,
                    "--readFilesIn",
                    [path_arg(read1), path_arg(read2)],
                );
            }
        }

        push_flag(&mut cmd, "--readFilesCommand", ["zcat".to_string()]);
        push_flag(&mut cmd, "--runThreadN", [cfg.ncpus.to_string()]);
        push_fixed(&mut cmd, "--genomeLoad", &["NoSharedMemory"]);
        push_fixed(&mut cmd, "--outFilterMultimapNmax", &["20"]);
        push_fixed(&mut cmd, "--alignSJoverhangMin", &["8"]);
        push_fixed(&mut cmd, "--alignSJDBoverhangMin", &["1"]);
        push_fixed(&mut cmd, "--outFilterMismatchNmax", &["999"]);
        push_fixed(&mut cmd, "--outFilterMismatchNoverReadLmax", &["0.04"]);
        push_fixed(&mut cmd, "--alignIntronMin", &["20"]);
        push_fixed(&mut cmd, "--alignIntronMax", &["1000000"]);
        push_fixed(&mut cmd, "--alignMatesGapMax", &["1000000"]);
        push_fixed(&mut cmd, "--outSAMheaderCommentFile", &[HEADER_COMMENT_FILE]);
        push_fixed(&mut cmd, "--outSAMheaderHD", &["@HD", "VN:1.4", "SO:coordinate"]);
        push_fixed(&mut cmd, "--outSAMunmapped", &["Within"]);
        push_fixed(&mut cmd, "--outFilterType", &["BySJout"]);
        push_fixed(&mut cmd, "--outSAMattributes", &["NH", "HI", "AS", "NM", "MD"]);

        // Paired-end runs keep STAR's default strand field.
        if let Self::SingleEnd { .. } = self {
            push_fixed(&mut cmd, "--outSAMstrandField", &["intronMotif"]);
        }

        push_fixed(&mut cmd, "--outSAMtype", &["BAM", "SortedByCoordinate"]);
        push_fixed(&mut cmd, "--quantMode", &["TranscriptomeSAM"]);
        push_fixed(&mut cmd, "--sjdbScore", &["1"]);
        push_flag(
            &mut cmd,
            "--limitBAMsortRAM",
            [(u64::from(cfg.ram_gb) * BYTES_PER_GB).to_string()],
        );

        cmd
    }
}

fn push_flag<const N: usize>(cmd: &mut Vec<String>, flag: &str, values: [String; N]) {
    cmd.push(flag.to_string());
    cmd.extend(values);
}

fn push_fixed(cmd: &mut Vec<String>, flag: &str, values: &[&str]) {
    cmd.push(flag.to_string());
    cmd.extend(values.iter().map(|v| v.to_string()));
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Render a command vector as one shell-quoted line for logging.
pub fn render(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| match shlex::try_quote(t) {
            Ok(quoted) => quoted.into_owned(),
            Err(_) => format!("{t:?}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(ncpus: u32, ram_gb: u32) -> StarConfig {
        StarConfig {
            index_dir: PathBuf::from("out"),
            ncpus,
            ram_gb,
        }
    }

    fn single() -> StarCommand {
        StarCommand::SingleEnd {
            fastq: PathBuf::from("reads.fastq.gz"),
        }
    }

    fn paired() -> StarCommand {
        StarCommand::PairedEnd {
            read1: PathBuf::from("R1.fastq.gz"),
            read2: PathBuf::from("R2.fastq.gz"),
        }
    }

    /// Values following `flag` up to the next `--` token.
    fn values_of<'a>(cmd: &'a [String], flag: &str) -> Vec<&'a str> {
        let pos = cmd
            .iter()
            .position(|t| t == flag)
            .unwrap_or_else(|| panic!("{flag} missing from {cmd:?}"));
        cmd[pos + 1..]
            .iter()
            .take_while(|t| !t.starts_with("--"))
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn resource_flags_are_contiguous() {
        let cmd = single().build(&cfg(8, 16));
        assert!(cmd.windows(2).any(|w| w[0] == "--runThreadN" && w[1] == "8"));
        assert!(cmd
            .windows(2)
            .any(|w| w[0] == "--limitBAMsortRAM" && w[1] == "16000000000"));

        let cmd = paired().build(&cfg(8, 16));
        assert!(cmd.windows(2).any(|w| w[0] == "--runThreadN" && w[1] == "8"));
        assert!(cmd
            .windows(2)
            .any(|w| w[0] == "--limitBAMsortRAM" && w[1] == "16000000000"));
    }

    #[test]
    fn single_end_command() {
        let cmd = single().build(&cfg(4, 8));
        assert_eq!(cmd[0], "STAR");
        assert_eq!(values_of(&cmd, "--genomeDir"), ["out"]);
        assert_eq!(values_of(&cmd, "--readFilesIn"), ["reads.fastq.gz"]);
        assert_eq!(values_of(&cmd, "--outSAMstrandField"), ["intronMotif"]);
        assert_eq!(values_of(&cmd, "--limitBAMsortRAM"), ["8000000000"]);
        assert_eq!(cmd.len(), 54);
    }

    #[test]
    fn paired_end_command() {
        let cmd = paired().build(&cfg(4, 8));
        assert_eq!(
            values_of(&cmd, "--readFilesIn"),
            ["R1.fastq.gz", "R2.fastq.gz"]
        );
        assert!(!cmd.iter().any(|t| t == "--outSAMstrandField"));
        assert_eq!(cmd.len(), 53);
    }

    #[test]
    fn variants_never_cross() {
        let s = single().build(&cfg(4, 8));
        let p = paired().build(&cfg(4, 8));
        assert_ne!(s, p);
        assert_eq!(single().endedness(), Endedness::Single);
        assert_eq!(paired().endedness(), Endedness::Paired);
        assert!(!p.iter().any(|t| t == "reads.fastq.gz"));
        assert!(!s.iter().any(|t| t == "R2.fastq.gz"));
    }

    #[test]
    fn multi_token_flags() {
        let cmd = single().build(&cfg(4, 8));
        assert_eq!(
            values_of(&cmd, "--outSAMheaderHD"),
            ["@HD", "VN:1.4", "SO:coordinate"]
        );
        assert_eq!(
            values_of(&cmd, "--outSAMattributes"),
            ["NH", "HI", "AS", "NM", "MD"]
        );
        assert_eq!(
            values_of(&cmd, "--outSAMtype"),
            ["BAM", "SortedByCoordinate"]
        );
        assert_eq!(values_of(&cmd, "--quantMode"), ["TranscriptomeSAM"]);
        assert_eq!(values_of(&cmd, "--readFilesCommand"), ["zcat"]);
        assert_eq!(
            values_of(&cmd, "--outSAMheaderCommentFile"),
            [HEADER_COMMENT_FILE]
        );
    }

    #[test]
    fn paths_with_spaces_stay_whole() {
        let cmd = StarCommand::SingleEnd {
            fastq: PathBuf::from("my reads/r1.fastq.gz"),
        }
        .build(&StarConfig {
            index_dir: PathBuf::from("genome index"),
            ncpus: 2,
            ram_gb: 4,
        });
        assert_eq!(values_of(&cmd, "--genomeDir"), ["genome index"]);
        assert_eq!(values_of(&cmd, "--readFilesIn"), ["my reads/r1.fastq.gz"]);

        let line = render(&cmd);
        assert_eq!(shlex::split(&line).unwrap(), cmd);
    }

    #[test]
    fn large_ram_does_not_overflow() {
        let cmd = single().build(&cfg(1, u32::MAX));
        assert_eq!(
            values_of(&cmd, "--limitBAMsortRAM"),
            ["4294967295000000000"]
        );
    }
}
