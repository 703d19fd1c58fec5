use clap::Parser;
use helper_scripts::{
    chain::AlloyClient, cli::Cli, errors::ScriptError, provisioner::Provisioner,
};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let settings = cli.settings()?;
    let client = AlloyClient::new(&settings.rpc_url, cli.artifacts_dir.clone())?;
    let provisioner = Provisioner::new(client);

    cli.command.run(&provisioner, &settings).await
}
