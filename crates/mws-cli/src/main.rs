/*
[INPUT]:  CLI arguments and YAML configuration file
[OUTPUT]: Signed request (dry run) or parsed MWS response as JSON on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the request flow
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mws_adapter::{MwsClient, ResponseFormat};
use mws_cli::{CliConfig, parse_key_value};

#[derive(Parser, Debug)]
#[command(name = "mws-cli", version, about = "Send one signed MWS request")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    /// Request path, overrides the configured default
    #[arg(long = "path", value_name = "PATH")]
    path: Option<String>,
    /// Query parameter, repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
    /// Extra request header, repeatable
    #[arg(long = "header", value_name = "NAME=VALUE")]
    headers: Vec<String>,
    /// File whose content is sent as the feed body
    #[arg(long = "feed", value_name = "FILE")]
    feed: Option<PathBuf>,
    /// Expected response format hint (xml or table)
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<ResponseFormat>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    /// Print the signed request instead of sending it
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting mws-cli"
    );

    let config = load_config(&args.config_path)?;
    let mut spec = config.request_spec();
    if let Some(path) = &args.path {
        spec.path = Some(path.clone());
    }
    for param in &args.params {
        let (key, value) = parse_key_value(param)?;
        spec.query.insert(key, value);
    }
    for header in &args.headers {
        let (name, value) = parse_key_value(header)?;
        spec.headers.insert(name, value);
    }
    if let Some(feed) = &args.feed {
        let content = std::fs::read_to_string(feed)
            .with_context(|| format!("read feed {}", feed.display()))?;
        spec.feed_content = Some(content);
    }
    spec.response_format = args.format;

    let client = MwsClient::new(config.client).context("create MWS client")?;

    if args.dry_run {
        let signed = client.build(&spec).context("sign request")?;
        info!(params = signed.query.len(), "dry-run requested; request signed");
        println!("{}", serde_json::to_string_pretty(&signed)?);
        return Ok(());
    }

    let parsed = client.request(&spec).await.context("MWS request")?;
    info!(format = %parsed.format(), "response parsed");
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<CliConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}
