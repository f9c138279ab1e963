use clap::Parser;
use std::process;
use vks_disk_audit::{
    cli::{Cli, Commands},
    config,
    handlers::{self, AuditOptions},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> vks_disk_audit::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Audit {
            namespace,
            format,
            output,
            kubectl_bin,
            govc_bin,
        } => handlers::handle_audit(
            AuditOptions {
                namespace,
                format,
                output,
                kubectl_bin,
                govc_bin,
            },
            &config,
        ),
        Commands::Check => handlers::handle_check(&config),
    }
}
