//! Built-in chat commands: `ping` and `help`.

use async_trait::async_trait;

use super::core::{ChatContext, CommandHandler};
use crate::app::App;
use crate::commands::{Args, Command, Param, close_matches};
use crate::error::{CommandError, HandlerResult, SetupError};

/// Handler for `ping [reply]`.
pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn call(&self, ctx: &mut ChatContext<'_>, args: Args) -> HandlerResult {
        let reply = args.str(0).unwrap_or("Pong!");
        ctx.reply(reply).await
    }
}

/// Handler for `help [command]`.
pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn call(&self, ctx: &mut ChatContext<'_>, args: Args) -> HandlerResult {
        let wanted = args.str(0).unwrap_or_default();

        if wanted.is_empty() {
            let lines: Vec<String> = ctx
                .registry()
                .iter()
                .filter(|c| c.is_enabled())
                .map(|c| match c.description() {
                    "" => c.name().to_string(),
                    description => format!("{} - {description}", c.name()),
                })
                .collect();
            for line in lines {
                ctx.reply(&line).await?;
            }
            return Ok(());
        }

        let text = match ctx.registry().find(wanted) {
            Some(command) => {
                let body = [command.help(), command.description()]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .unwrap_or("no help available");
                format!("{}: {body}", command.name())
            }
            None => {
                return Err(CommandError::UnknownCommand {
                    name: wanted.to_string(),
                    suggestions: close_matches(wanted, ctx.registry().names()),
                }
                .into());
            }
        };
        ctx.reply(&text).await
    }
}

/// Register `ping` and `help` on `app`.
pub fn register_builtins(app: &mut App) -> Result<(), SetupError> {
    app.add_command(
        Command::new("ping", PingCommand)
            .with_param(Param::new("reply").with_default("Pong!"))
            .with_description("Check that the server is alive"),
    )?;
    app.add_command(
        Command::new("help", HelpCommand)
            .with_param(Param::new("command").with_default(""))
            .with_description("List commands or show help for one")
            .with_help("help [command]"),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;
    use crate::handlers::core::{Context, Outbound};
    use crate::queue::RequestQueue;
    use bedrock_proto::{ChatMessage, Message};
    use serde_json::json;

    fn command_line(message: &Message) -> String {
        message.body["commandLine"].as_str().unwrap().to_string()
    }

    fn app() -> App {
        let mut app = App::new(Settings::default().with_prefix("!"));
        register_builtins(&mut app).unwrap();
        app
    }

    #[tokio::test]
    async fn test_ping_default_reply() {
        let app = app();
        let (outbound, mut rx) = Outbound::channel(8);
        let mut queue = RequestQueue::default();
        let data = json!({ "message": "!ping", "sender": "Steve" });
        let chat = ChatMessage::from_body(&data).unwrap();
        let mut ctx =
            ChatContext::new(Context::new(&outbound, &mut queue, app.registry(), &data), chat);

        PingCommand
            .call(&mut ctx, Args::from(vec!["Pong!".into()]))
            .await
            .unwrap();
        assert_eq!(command_line(&rx.recv().await.unwrap()), "tell Steve Pong!");
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let app = app();
        let (outbound, mut rx) = Outbound::channel(8);
        let mut queue = RequestQueue::default();
        let data = json!({ "message": "!help", "sender": "Steve" });
        let chat = ChatMessage::from_body(&data).unwrap();
        let mut ctx =
            ChatContext::new(Context::new(&outbound, &mut queue, app.registry(), &data), chat);

        HelpCommand.call(&mut ctx, Args::from(vec!["".into()])).await.unwrap();
        assert_eq!(
            command_line(&rx.recv().await.unwrap()),
            "tell Steve ping - Check that the server is alive"
        );
        assert_eq!(
            command_line(&rx.recv().await.unwrap()),
            "tell Steve help - List commands or show help for one"
        );
    }

    #[tokio::test]
    async fn test_help_unknown_command_suggests() {
        let app = app();
        let (outbound, _rx) = Outbound::channel(8);
        let mut queue = RequestQueue::default();
        let data = json!({ "message": "!help pimg", "sender": "Steve" });
        let chat = ChatMessage::from_body(&data).unwrap();
        let mut ctx =
            ChatContext::new(Context::new(&outbound, &mut queue, app.registry(), &data), chat);

        let err = HelpCommand
            .call(&mut ctx, Args::from(vec!["pimg".into()]))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "command 'pimg' does not exist; perhaps you meant 'ping'?"
        );
    }
}
