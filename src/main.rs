use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use pangool::{
    serve, ConsultState, ConsultUseCase, Container, ContainerConfig, HttpDivinationSource,
    Section, DEFAULT_PROMPT,
};

#[derive(Parser)]
#[command(name = "pangool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the divination API
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,

        /// Serve canned divinations without calling an upstream model
        #[arg(long)]
        mock: bool,

        /// Upstream model endpoint (overrides MODEL_API_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,

        /// Bearer credential for the upstream (overrides MODEL_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Request a divination and render it
    Divine {
        /// Divination endpoint to consult
        #[arg(long, default_value = "http://localhost:8080/divination")]
        endpoint: String,

        /// Prompt to divine on (defaults to the standard four-section request)
        #[arg(short, long)]
        prompt: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            port,
            public,
            mock,
            endpoint,
            api_key,
        } => {
            let mut config = ContainerConfig::from_env();
            config.mock = mock;
            if endpoint.is_some() {
                config.endpoint = endpoint;
            }
            if api_key.is_some() {
                config.api_key = api_key;
            }

            if !mock && config.endpoint.is_none() {
                warn!("MODEL_API_ENDPOINT is not set; divination requests will fail until it is configured");
            }

            let host = if public { "0.0.0.0" } else { "127.0.0.1" };
            let container = Arc::new(Container::new(config));
            serve(container, &format!("{host}:{port}")).await
        }

        Commands::Divine { endpoint, prompt } => {
            let prompt = prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
            let source = Arc::new(HttpDivinationSource::new(endpoint));
            let mut consult = ConsultUseCase::new(source);

            print!("{}", render(&ConsultState::Loading));
            consult.execute(&prompt).await;
            print!("{}", render(consult.state()));

            if consult.state().is_error() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Render a display state for the terminal. The single place presentation
/// happens; states never toggle output directly.
fn render(state: &ConsultState) -> String {
    match state {
        ConsultState::Idle => String::new(),
        ConsultState::Loading => "Consulting the spirits...\n\n".to_string(),
        ConsultState::Result(divination) => {
            let mut output = String::new();
            for section in Section::ALL {
                let name = section.name().to_uppercase();
                output.push_str(&format!(
                    "{}\n{}\n{}\n\n",
                    name,
                    "=".repeat(name.len()),
                    divination.section(section)
                ));
            }
            output
        }
        ConsultState::Error(message) => format!("{message}\n"),
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use pangool::Divination;

    #[test]
    fn divine_parses_without_arguments() {
        let res = Cli::try_parse_from(["pangool", "divine"]);
        assert!(res.is_ok());
    }

    #[test]
    fn serve_rejects_non_numeric_port() {
        let res = Cli::try_parse_from(["pangool", "serve", "--port", "many"]);
        assert!(res.is_err());
    }

    #[test]
    fn render_result_shows_every_section() {
        let divination = Divination::new("h1", "h2", "s1", "f1").unwrap();
        let output = render(&ConsultState::Result(divination));

        for heading in ["HEART", "HEAD", "SOUL", "FLESH"] {
            assert!(output.contains(heading));
        }
        assert!(output.contains("f1"));
    }

    #[test]
    fn render_error_is_the_plain_message() {
        let output = render(&ConsultState::Error("Network error.".to_string()));
        assert_eq!(output, "Network error.\n");
    }
}
