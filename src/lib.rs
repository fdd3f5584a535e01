pub mod error;
pub mod params;

pub mod index;
pub mod runner;
pub mod star;

use anyhow::Context;
use log::info;

use crate::params::Parameters;

/// Top-level driver. Called from `main()` after CLI parsing.
///
/// Returns the aligner's exit code; `main` exits with it unchanged.
pub fn run(params: &Parameters) -> anyhow::Result<i32> {
    params.validate()?;

    info!("rnaseq-align v{}", env!("CARGO_PKG_VERSION"));

    let aligner = params.star_command()?;
    info!("running {}-end {} aligner", aligner.endedness(), params.aligner);

    index::extract_index(&params.index, &params.indexdir)
        .with_context(|| format!("failed to extract genome index {}", params.index.display()))?;

    let command = aligner.build(&params.star_config());
    info!("running command:");
    info!("{}", star::render(&command));

    let code = runner::run_command(&command)?;
    Ok(code)
}
