//! Command-line client for the lottery chaincode peer.
//!
//! Sends one `init` or `invoke` to the peer, prints the payload on success
//! and the chaincode's error message on failure.

use anyhow::{Context, Result};
use lc_client::{api_client::PeerClient, commands::parse_command};
use lottery_chaincode::Status;
use pico_args::Arguments;

const HELP: &str = "\
Talk to a lottery chaincode peer

USAGE:
  lc_client [OPTIONS] init <sum>
  lc_client [OPTIONS] invoke <function> [args...]

FUNCTIONS:
  query                 Report whether the pool is healthy
  query <uid>           Show an account balance
  create_user <uid>     Open an account
  lottery <uid> <wager> Play one round

OPTIONS:
  --peer URL            Peer URL  [default: env LC_PEER_URL or http://127.0.0.1:7051]

FLAGS:
  -h, --help            Print help information
";

const DEFAULT_PEER_URL: &str = "http://127.0.0.1:7051";

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let peer_url: String = match pargs.opt_value_from_str("--peer")? {
        Some(url) => url,
        None => std::env::var("LC_PEER_URL").unwrap_or_else(|_| DEFAULT_PEER_URL.to_string()),
    };

    let words = pargs
        .finish()
        .into_iter()
        .map(|word| {
            word.into_string()
                .map_err(|word| anyhow::anyhow!("Argument is not valid UTF-8: {:?}", word))
        })
        .collect::<Result<Vec<_>>>()?;

    let command = match parse_command(&words) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let client = PeerClient::new(peer_url.clone());
    let result = client
        .execute(&command)
        .await
        .with_context(|| format!("Failed to reach peer at {}", peer_url))?;

    match result.status {
        Status::Ok => {
            if let Some(payload) = result.payload {
                println!("{payload}");
            }
            Ok(())
        }
        Status::Error => {
            eprintln!("{}", result.message);
            std::process::exit(1);
        }
    }
}
