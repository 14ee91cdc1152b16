use std::sync::Arc;

use clap::{Parser, Subcommand};
use qa_dashboard::chat::prompts::QuickReply;
use qa_dashboard::chat::{Message, MessageKind, MessageStatus};
use qa_dashboard::conversation::{Conversation, HttpChatTransport, SendOutcome, TransportError};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("unknown quick reply `{0}`; expected one of: {1}")]
    UnknownQuickReply(String, String),
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "qa-chat", about = "Chat with the QA dashboard assistant")]
struct Cli {
    #[arg(long, env = "QA_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the chat endpoint is up.
    Ping,
    /// Send one message and print the reply.
    Send { text: String },
    /// Send a quick reply by intent code (e.g. `failed_tests`).
    Quick { code: String },
    /// Interactive session on stdin. `/quick <code>` sends a quick reply, `/quit` exits.
    Chat,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let transport = Arc::new(HttpChatTransport::new(cli.base_url)?);

    match cli.command {
        Command::Ping => run_ping(&transport).await,
        Command::Send { text } => run_once(transport, Input::Text(text)).await,
        Command::Quick { code } => run_once(transport, Input::Quick(parse_quick(&code)?)).await,
        Command::Chat => run_chat(transport).await,
    }
}

enum Input {
    Text(String),
    Quick(QuickReply),
}

async fn run_ping(transport: &HttpChatTransport) -> Result<(), CliError> {
    let status = transport.ping().await?;
    println!("{}", status.status);
    Ok(())
}

async fn run_once(transport: Arc<HttpChatTransport>, input: Input) -> Result<(), CliError> {
    let conversation = Conversation::new(transport);
    let outcome = match input {
        Input::Text(text) => conversation.send(&text).await,
        Input::Quick(quick) => conversation.send_quick_reply(quick).await,
    };

    let last = conversation.messages().pop();
    match (outcome, last) {
        (SendOutcome::Replied, Some(reply)) => {
            println!("{}", reply.content);
            Ok(())
        }
        (SendOutcome::Failed, Some(reply)) => Err(CliError::SendFailed(reply.content)),
        _ => Ok(()),
    }
}

async fn run_chat(transport: Arc<HttpChatTransport>) -> Result<(), CliError> {
    let conversation = Conversation::new(transport);
    conversation.hydrate();
    for message in conversation.messages() {
        print_message(&message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let seen = conversation.messages().len();

        let outcome = if line == "/quit" {
            break;
        } else if let Some(code) = line.strip_prefix("/quick") {
            match parse_quick(code) {
                Ok(quick) => conversation.send_quick_reply(quick).await,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            }
        } else {
            conversation.send(line).await
        };

        if outcome == SendOutcome::Ignored {
            continue;
        }
        // The user line is already on screen; print only the new replies.
        for message in conversation.messages().iter().skip(seen).filter(|m| m.kind == MessageKind::Ai) {
            print_message(message);
        }
    }
    Ok(())
}

fn parse_quick(code: &str) -> Result<QuickReply, CliError> {
    let code = code.trim();
    QuickReply::from_code(code)
        .or_else(|| QuickReply::from_phrase(code))
        .ok_or_else(|| {
            let known: Vec<&str> = QuickReply::ALL.iter().map(|q| q.code()).collect();
            CliError::UnknownQuickReply(code.to_string(), known.join(", "))
        })
}

fn print_message(message: &Message) {
    let who = match message.kind {
        MessageKind::User => "أنت",
        MessageKind::Ai => "المساعد",
    };
    let marker = if message.status == Some(MessageStatus::Failed) { " (!)" } else { "" };
    println!("[{}] {who}{marker}: {}", message.timestamp.format("%H:%M"), message.content);
}
