use color_eyre::eyre::{Context, Result};
use log::LevelFilter;
use zepnb::cli::Cli;
use zepnb_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .init();

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;
  cli.merge_into(&mut config);

  let written = zepnb::run(&cli.input, cli.output.as_deref(), &config)
    .wrap_err_with(|| format!("Failed to convert {}", cli.input.display()))?;

  #[allow(clippy::print_stdout, reason = "Final report for the user")]
  {
    println!(
      "Converted '{}' to '{}'",
      cli.input.display(),
      written.display()
    );
  }

  Ok(())
}
