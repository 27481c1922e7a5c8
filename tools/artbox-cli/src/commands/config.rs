//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.text("");
    ctx.output.text("[catalog]");
    ctx.output.kv("url", &catalog.url);
    ctx.output.kv("timeout_secs", &catalog.timeout_secs.to_string());

    let assistant = &ctx.config.assistant;
    ctx.output.text("");
    ctx.output.text("[assistant]");
    ctx.output.kv("api_url", &assistant.api_url);
    let key_state = if assistant.api_key().is_some() { "set" } else { "not set" };
    ctx.output
        .kv("api_key_env", &format!("{} ({})", assistant.api_key_env, key_state));
    ctx.output
        .kv("cache_ttl", &format!("{}s", assistant.cache_ttl().as_secs_f64()));
    ctx.output.kv("temperature", &assistant.temperature.to_string());
    ctx.output.kv("top_k", &assistant.top_k.to_string());
    ctx.output.kv("top_p", &assistant.top_p.to_string());
    ctx.output
        .kv("max_output_tokens", &assistant.max_output_tokens.to_string());

    ctx.output.text("");
    ctx.output.text("[storage]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("artbox.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
