pub mod alias;
pub mod config;
pub mod error;
pub mod gateway;
pub mod input;
pub mod logging;
pub mod providers;

use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

use config::Config;
use error::Error;
use gateway::{HttpChatGateway, send_prompt};

const BASH_ALIAS_FLAG: &str = "--bash-alias";

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let cfg = Config::load()?;
    info!(prompt_count = cfg.prompts.len(), model = cfg.model(), "loaded runtime configuration");

    if args.get(1).is_some_and(|arg| arg == BASH_ALIAS_FLAG) {
        let exe = env::current_exe().context("Failed to resolve executable path")?;
        for line in alias::alias_lines(&exe, &cfg.prompts) {
            println!("{line}");
        }
        return Ok(());
    }

    let name = invocation_name(&args);
    debug!(prompt_name = %name, "resolving prompt");
    let template = cfg
        .find_prompt(&name)
        .ok_or_else(|| Error::PromptNotFound(name.clone()))?
        .to_string();

    let piped = input::read_input(&mut input::Stdin).context("Failed to read stdin")?;

    let client = Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs()))
        .build()
        .context("Failed to initialize HTTP client")?;
    let gateway = HttpChatGateway::new(&client, &cfg);
    let reply = send_prompt(&gateway, cfg.model(), &template, &piped).await?;

    println!("{reply}");
    Ok(())
}

/// The effective prompt name: an explicit first argument wins; otherwise the
/// base name of the invoked executable, so symlinked names select prompts.
fn invocation_name(args: &[String]) -> String {
    if let Some(arg) = args.get(1) {
        return arg.clone();
    }
    args.first()
        .map(|argv0| {
            Path::new(argv0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| argv0.clone())
        })
        .unwrap_or_default()
}
