//! Terminal chat for a UIOLLAMA proxy.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uiollama_common::{format_size, DEFAULT_MODEL};

mod client;
mod command;
mod conversation;

use client::ProxyClient;
use command::Command;
use conversation::Conversation;

#[derive(Parser, Debug)]
#[command(name = "uiollama-chat", version, about = "Chat with Ollama through a UIOLLAMA proxy")]
struct Cli {
    /// Base URL of the UIOLLAMA backend.
    #[arg(long, env = "UIOLLAMA_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// API token sent as `Authorization: Bearer <token>`.
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Model to chat with.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

const HELP: &str = "\
Comandos:
  /models         lista los modelos instalados
  /model <name>   cambia el modelo activo
  /pull <name>    descarga un modelo
  /clear          limpia la conversación
  /help           muestra esta ayuda
  /quit           sale";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the transcript.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ProxyClient::new(&cli.server, cli.token);
    let mut conversation = Conversation::new(cli.model);

    println!("UIOLLAMA - {} (modelo: {})", cli.server, conversation.model());
    println!("¿En qué puedo ayudarte? Escribe /help para ver los comandos.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Clear if conversation.is_empty() => println!("La conversación ya está vacía."),
            Command::Clear => {
                let count = conversation.messages().len();
                conversation.clear();
                println!("Conversación limpiada ({} mensajes).", count);
            }
            Command::SetModel(model) => {
                conversation.set_model(model);
                println!("Modelo activo: {}", conversation.model());
            }
            Command::ListModels => match client.list_models().await {
                Ok(models) if models.is_empty() => println!("No hay modelos disponibles"),
                Ok(models) => {
                    for model in models {
                        let marker = if model.name == conversation.model() { "*" } else { " " };
                        let size = model.size.map(format_size).unwrap_or_default();
                        println!("{} {:<32} {}", marker, model.name, size);
                    }
                }
                Err(e) => eprintln!("Error al cargar modelos: {}", e),
            },
            Command::Pull(model) => {
                println!("Instalando {}...", model);
                match client.pull(&model).await {
                    Ok(result) => {
                        println!(
                            "Modelo instalado ({}).",
                            result.status.as_deref().unwrap_or("ok")
                        );
                        conversation.set_model(model);
                        println!("Modelo activo: {}", conversation.model());
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
            Command::Usage(usage) => eprintln!("Uso: {}", usage),
            Command::Unknown(name) => eprintln!("Comando desconocido: /{} (prueba /help)", name),
            Command::Message(text) => {
                if let Some(reply) = conversation.submit(&client, &text).await {
                    println!("\n{}", reply.content);
                }
            }
        }
    }

    Ok(())
}
