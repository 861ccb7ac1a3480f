use anyhow::Context as _;
use args::{Args, Command};
use clap::Parser;
use config::Config;
use gemini::GeminiAdapter;
use prompt::{ChatCompletionParameters, ChatMessage, ChatPrompt, Completion, TextPrompt};

mod args;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args.log)?;

    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            log::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    match args.command {
        Command::Models => {
            for model in gemini::available_models() {
                println!("{model}");
            }
        }
        Command::Complete { text, generation } => {
            let adapter = GeminiAdapter::from_config(&config.google)?;
            let prompt = TextPrompt::new(text).with_context(generation.context());

            match adapter.complete(prompt.into(), generation.parameters().into()).await? {
                Completion::Text(completion) => println!("{}", completion.text),
                Completion::Chat(completion) => println!("{}", completion.message.content),
            }
        }
        Command::Chat {
            system,
            code_execution,
            text,
            generation,
        } => {
            let adapter = GeminiAdapter::from_config(&config.google)?;

            let mut messages = Vec::with_capacity(2);
            messages.extend(system.map(ChatMessage::system));
            messages.push(ChatMessage::user(text));

            let prompt = ChatPrompt::new(messages).with_context(generation.context());
            let parameters = ChatCompletionParameters::from(generation.parameters());

            let completion = adapter
                .complete_with_code_execution(prompt, parameters, code_execution)
                .await?;

            log::info!("Stop reason: {}", completion.stop_reason);
            println!("{}", completion.message.content);
        }
    }

    Ok(())
}
