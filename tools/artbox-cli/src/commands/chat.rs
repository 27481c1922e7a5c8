//! Chat with the catalog assistant.

use anyhow::{bail, Result};
use artbox_assistant::{
    Assistant, AssistantError, AssistantReply, CatalogSource, ChatModel, GREETING,
};
use artbox_catalog::format::format_price;
use console::style;
use dialoguer::Input;
use tracing::warn;

use super::ChatArgs;
use crate::context::Context;

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let assistant = ctx.assistant()?;

    match args.message {
        Some(message) => match ask(&assistant, &message, ctx).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "chat request failed");
                bail!(e.user_message())
            }
        },
        None => interactive(&assistant, ctx).await,
    }
}

async fn ask<C, M>(assistant: &Assistant<C, M>, message: &str, ctx: &Context) -> Result<(), AssistantError>
where
    C: CatalogSource,
    M: ChatModel,
{
    let spinner = ctx.output.spinner("Thinking...");
    let reply = assistant.send_message(message).await;
    spinner.finish_and_clear();

    let reply = reply?;
    if ctx.output.is_json() {
        ctx.output.json(&reply);
    } else {
        print_reply(ctx, &reply);
    }
    Ok(())
}

fn print_reply(ctx: &Context, reply: &AssistantReply) {
    ctx.output
        .text(&format!("{} {}", style("Assistant:").cyan().bold(), reply.message));
    if reply.products.is_empty() {
        return;
    }

    ctx.output.text("");
    for product in &reply.products {
        ctx.output.list_item(&format!(
            "[{}] {} · {} · {}",
            product.id,
            product.name,
            product.brand,
            format_price(product.price)
        ));
    }
    ctx.output
        .text(&style("  View details with `artbox show <ID>`").dim().to_string());
}

async fn interactive<C, M>(assistant: &Assistant<C, M>, ctx: &Context) -> Result<()>
where
    C: CatalogSource,
    M: ChatModel,
{
    ctx.output
        .text(&format!("{} {}", style("Assistant:").cyan().bold(), GREETING));
    ctx.output.text(&style("Type `exit` to leave.").dim().to_string());

    loop {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        if let Err(e) = ask(assistant, line, ctx).await {
            warn!(error = %e, "chat turn failed");
            ctx.output.error(e.user_message());
        }
    }

    Ok(())
}
