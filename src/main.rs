//! nicotine-setup - Main entry point
//!
//! A small, fail-fast installer: build the release binary if needed, copy
//! it into the local bin directory, make that directory reachable from
//! PATH, and smoke-test the result.

use log::{debug, error, info};
use std::path::PathBuf;
use std::process;

use nicotine_setup::cli::{Cli, Commands};
use nicotine_setup::config_file::SetupConfig;
use nicotine_setup::installer::{self, Installer};
use nicotine_setup::process_guard;
use nicotine_setup::types::Shell;

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

/// Main application entry point
fn main() {
    init_logger();
    info!("nicotine-setup starting up");

    // Terminate a running cargo build cleanly if we receive SIGINT/SIGTERM
    if let Err(e) = process_guard::init_signal_handlers() {
        log::warn!("Failed to initialize signal handlers: {}", e);
        // Continue anyway - an interrupted build just won't be reaped early
    }
    debug!("Signal handlers initialized");

    let cli = Cli::parse_args();
    let dry_run = cli.dry_run;

    match cli.command {
        None => run_install(
            None, None, false, false, None, false, None, None, dry_run,
        ),
        Some(Commands::Install {
            bin_dir,
            project_root,
            force_build,
            no_modify_path,
            shell,
            no_smoke_test,
            config,
            save_config,
        }) => run_install(
            bin_dir,
            project_root,
            force_build,
            no_modify_path,
            shell,
            no_smoke_test,
            config,
            save_config,
            dry_run,
        ),
        Some(Commands::Uninstall { bin_dir }) => {
            let binary_name = SetupConfig::default().binary_name;
            if let Err(e) = installer::uninstall(bin_dir, &binary_name, dry_run) {
                error!("Uninstall failed: {}", e);
                eprintln!("✗ Uninstall failed: {}", e);
                process::exit(1);
            }
        }
        Some(Commands::Doctor) => {
            let config = SetupConfig::default();
            if installer::run_doctor(&config).is_err() {
                process::exit(1);
            }
        }
        Some(Commands::Validate { config }) => {
            info!("Validating configuration file: {:?}", config);
            match SetupConfig::load_from_file(&config) {
                Ok(loaded) => match loaded.validate() {
                    Ok(_) => {
                        println!("✓ Configuration file is valid: {:?}", config);
                    }
                    Err(e) => {
                        error!("Configuration validation failed: {}", e);
                        eprintln!("✗ Configuration validation failed: {}", e);
                        process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load configuration file: {}", e);
                    eprintln!("✗ Failed to load configuration file: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

/// Build the effective configuration from file + flags and run the install
#[allow(clippy::too_many_arguments)] // Mirrors the CLI surface one-to-one
fn run_install(
    bin_dir: Option<PathBuf>,
    project_root: Option<PathBuf>,
    force_build: bool,
    no_modify_path: bool,
    shell: Option<String>,
    no_smoke_test: bool,
    config_path: Option<PathBuf>,
    save_config: Option<PathBuf>,
    dry_run: bool,
) {
    let mut config = match config_path {
        Some(path) => match SetupConfig::load_from_file(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("Failed to load configuration file: {}", e);
                eprintln!("✗ Failed to load configuration file: {}", e);
                process::exit(1);
            }
        },
        None => SetupConfig::default(),
    };

    // Explicit flags win over file values
    if let Some(dir) = bin_dir {
        config.bin_dir = Some(dir);
    }
    if let Some(root) = project_root {
        config.project_root = root;
    }
    if no_modify_path {
        config.modify_path = false;
    }
    if no_smoke_test {
        config.smoke_test = false;
    }
    if let Some(name) = shell {
        let parsed: Shell = name.parse().unwrap_or_else(|_| {
            eprintln!("✗ Unknown shell {:?}", name);
            eprintln!("   Valid shells: bash, zsh");
            process::exit(1);
        });
        config.shell = Some(parsed);
    }

    if let Some(path) = save_config {
        if let Err(e) = config.save_to_file(&path) {
            error!("Failed to save configuration: {}", e);
            eprintln!("✗ Failed to save configuration: {}", e);
            process::exit(1);
        }
        println!("✓ Saved configuration to {}", path.display());
    }

    let installer = Installer::new(config, force_build, dry_run);
    match installer.run() {
        Ok(_report) => {
            println!("\n✓ Installation completed successfully!");
        }
        Err(e) => {
            error!("Installation failed: {}", e);
            eprintln!("\n✗ Installation failed: {}", e);
            process::exit(1);
        }
    }
}
