use clap::Parser;

use rnaseq_align::params::Parameters;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = Parameters::parse();
    let code = rnaseq_align::run(&params)?;
    std::process::exit(code)
}
