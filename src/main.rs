use clap::Parser;
use page_testgen::cli::commands::{cmd_elements, cmd_parse_cases, cmd_parse_scripts, cmd_run};
use page_testgen::cli::config::{Cli, Commands, load_config};
use page_testgen::cli::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve generator settings: CLI > config > defaults
    let generator_config = config.generator.clone().with_overrides(
        cli.backend,
        cli.endpoint.as_deref(),
        cli.model.as_deref(),
    );

    match cli.command {
        Commands::Run {
            url,
            output_dir,
            format,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
            let format = format.unwrap_or(config.output.format);
            cmd_run(&url, &output_dir, format, &config, &generator_config)?;
        }
        Commands::Elements { url, output_dir } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
            cmd_elements(&url, &output_dir, &config)?;
        }
        Commands::ParseCases { input, json } => {
            cmd_parse_cases(&input, json)?;
        }
        Commands::ParseScripts { input, json } => {
            cmd_parse_scripts(&input, json)?;
        }
    }

    Ok(())
}
