use std::process::ExitCode;

use clap::Parser;

use pypi_docs_url::config::ResolverConfig;

const NOT_FOUND_MESSAGE: &str = "No objects.inv discovered or parse failed.";

#[derive(Parser)]
#[command(name = "pypi-docs-url")]
#[command(about = "Print the Intersphinx objects.inv URL of a PyPI package")]
struct Cli {
    /// Package name as published on PyPI
    package_name: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    pypi_docs_url::logging::init()?;

    let config = ResolverConfig::from_env();

    let found = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(pypi_docs_url::get_intersphinx_url_with(
            &config,
            &cli.package_name,
        ));

    match found {
        Some(url) => {
            println!("{}", url);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{}", NOT_FOUND_MESSAGE);
            Ok(ExitCode::FAILURE)
        }
    }
}
