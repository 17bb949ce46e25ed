//! One-shot command-line front end: `ask "<prompt>"` prints the model's reply to stdout.

use anyhow::Context;
use clap::Parser;

use serenio_chatbot::{
    config::Config,
    logging,
    services::{
        chatbot::ChatService,
        decoding::{DecodingOverrides, Variant},
    },
};

#[derive(Parser, Debug)]
#[command(name = "ask", version, about = "Generate a single chatbot reply for a prompt")]
struct Args {
    /// Prompt text sent to the model
    prompt: String,

    /// Model family and decoding preset (defaults to CHAT_VARIANT)
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Also classify the prompt and print label and confidence
    #[arg(long)]
    sentiment: bool,

    /// Maximum new tokens
    #[arg(long)]
    max_new_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    // stdout is reserved for the reply
    logging::init(logging::CLI_FILTER, std::io::stderr);

    let mut config = Config::from_env().context("reading configuration")?;
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    config.sentiment_enabled = Some(args.sentiment);

    let service = ChatService::from_config(&config)?;
    let overrides = DecodingOverrides {
        max_new_tokens: args.max_new_tokens,
        temperature: args.temperature,
        ..Default::default()
    };

    let reply = service
        .generate_reply(&args.prompt, Some(&overrides))
        .await
        .with_context(|| format!("generating a reply with {}", config.generation_model()))?;

    println!("{reply}");

    Ok(())
}
