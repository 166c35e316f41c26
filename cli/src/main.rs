//! Meridian wallet CLI entry point.

mod output;
mod prompt;

use clap::Parser;
use meridian_crypto::{address_from_public_key, generate_mnemonic, keypair_from_mnemonic};
use meridian_types::NetworkProfile;
use meridian_wallet::{
    BridgeDevice, ConnectedContext, IdentitySource, SecondSecret, UnvotePipeline, WalletError,
};

use output::OutputFormat;
use prompt::StdinPrompt;

#[derive(Parser)]
#[command(name = "meridian", about = "Meridian wallet command-line interface")]
struct Cli {
    /// Network to target: "mainnet" or "devnet".
    #[arg(long, default_value = "mainnet", env = "MERIDIAN_NETWORK")]
    network: String,

    /// Explicit node URL. When given, the node's autoconfiguration
    /// overrides the static network profile.
    #[arg(long, env = "MERIDIAN_NODE")]
    node: Option<String>,

    /// Output format: "json" or "table".
    #[arg(long, default_value = "json")]
    format: String,

    /// Verbose progress logging.
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Wallet operations.
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
}

#[derive(clap::Subcommand)]
enum WalletAction {
    /// Remove the vote for the currently voted delegate.
    Unvote {
        /// Signing passphrase; prompted for when omitted.
        #[arg(long)]
        passphrase: Option<String>,

        /// Second secret. Pass the flag without a value to be prompted.
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        second_secret: Option<String>,

        /// Sign with a hardware device instead of a passphrase.
        #[arg(long)]
        device: bool,

        /// URL of the local device signing bridge.
        #[arg(long, default_value = meridian_wallet::device::DEFAULT_BRIDGE_URL, env = "MERIDIAN_BRIDGE_URL")]
        bridge_url: String,

        /// Ask for confirmation before signing.
        #[arg(long)]
        interactive: bool,
    },
    /// Generate a new wallet: seed phrase, address, and public key.
    Create,
}

#[tokio::main]
async fn main() {
    meridian_utils::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::show_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = OutputFormat::parse(&cli.format)?;
    let sink = meridian_utils::sink_for_verbosity(cli.verbose);

    // Unknown networks are rejected here, before any network or device
    // call is possible.
    let profile = NetworkProfile::resolve(&cli.network).map_err(WalletError::from)?;

    match cli.command {
        Command::Wallet {
            action: WalletAction::Create,
        } => {
            let seed = generate_mnemonic()?;
            let keys = keypair_from_mnemonic(&seed, profile.slip44, 0)?;
            let address = address_from_public_key(&keys.public, profile.version_byte);
            let result = serde_json::json!({
                "seed": seed,
                "address": address.as_str(),
                "publicKey": keys.public.to_hex(),
            });
            output::show_output(format, "Meridian Create wallet", &result);
        }
        Command::Wallet {
            action:
                WalletAction::Unvote {
                    passphrase,
                    second_secret,
                    device,
                    bridge_url,
                    interactive,
                },
        } => {
            let context =
                ConnectedContext::connect(profile, cli.node.as_deref(), sink.clone()).await?;
            let stdin_prompt = StdinPrompt;
            let pipeline = UnvotePipeline {
                node: &context,
                prompt: &stdin_prompt,
            };

            let bridge;
            let source = if device {
                bridge = BridgeDevice::new(bridge_url, sink)?;
                IdentitySource::Device(&bridge)
            } else {
                IdentitySource::Passphrase {
                    passphrase,
                    second_secret: match second_secret {
                        None => SecondSecret::None,
                        Some(value) if value.is_empty() => SecondSecret::PromptOperator,
                        Some(value) => SecondSecret::Value(value),
                    },
                }
            };

            let outcome = pipeline.run(source, interactive).await?;
            output::show_output(
                format,
                "Meridian Unvote delegate",
                &serde_json::to_value(&outcome)?,
            );
        }
    }
    Ok(())
}
