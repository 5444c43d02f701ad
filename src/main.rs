use clap::Parser;
use form_grid::cli::commands::{cmd_fetch, cmd_sections, cmd_show};
use form_grid::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve service endpoint: CLI > config > default
    let endpoint = cli.endpoint.as_deref().or(config.service.endpoint.as_deref());

    match cli.command {
        Commands::Show {
            file,
            format,
            output,
        } => {
            let format = format.as_deref().unwrap_or(&config.show.format);
            let output = output.as_deref().or(config.show.output.as_deref());
            cmd_show(&file, format, output, cli.verbose)?;
        }
        Commands::Fetch { id, format, output } => {
            let format = format.as_deref().unwrap_or(&config.show.format);
            let output = output.as_deref().or(config.show.output.as_deref());
            cmd_fetch(
                &id,
                endpoint,
                format,
                output,
                cli.verbose,
                cli.trace.as_deref(),
            )?;
        }
        Commands::Sections { file } => {
            cmd_sections(&file, cli.verbose)?;
        }
    }

    Ok(())
}
