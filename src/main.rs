use clap::Parser;
use vault_scripts::utils::error::{ErrorSeverity, Result, ScriptError};
use vault_scripts::utils::{logger, validation::Validate};
use vault_scripts::{
    Cli, CommandOutput, EnvConfig, ProfileConfig, ScriptApp, ScriptConfig, SuiClient,
};

async fn run(cli: &Cli) -> Result<CommandOutput> {
    let env = EnvConfig::load();
    let profile = match &cli.config {
        Some(path) => {
            tracing::info!("Loading profile from {}", path.display());
            Some(ProfileConfig::from_file(path)?)
        }
        None => None,
    };

    let config = ScriptConfig::resolve(&cli.overrides(), env, profile)?;
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);
    tracing::info!("Using {} fullnode at {}", config.network, config.rpc_url);

    if cli.command.announces_signer() {
        let address = config.keypair()?.address();
        eprintln!("Signer address: {}", address);
    }

    let client = SuiClient::new(config.rpc_url.clone());
    let app = ScriptApp::new(client, config).with_dry_run(cli.dry_run);
    app.run(&cli.command).await
}

fn exit_code(e: &ScriptError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match run(&cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Could not render output: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(
                "Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }
}
