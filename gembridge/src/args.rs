use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prompt::{CompletionParameters, Context, ContextKey, Sampling, TokenLimit};

/// Send prompts to Google Gemini from the command line.
#[derive(Debug, Parser)]
#[command(name = "gembridge", version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "GEMBRIDGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `gemini=debug`.
    #[arg(long, env = "GEMBRIDGE_LOG", default_value = "info", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Continue a piece of text.
    Complete {
        text: String,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Ask a single chat question.
    Chat {
        /// Instructions sent as the system message.
        #[arg(long)]
        system: Option<String>,

        /// Let the model write and run Python to answer.
        #[arg(long)]
        code_execution: bool,

        text: String,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// List the models that can be passed to `--model`.
    Models,
}

#[derive(Debug, clap::Args)]
pub struct GenerationArgs {
    /// Model to use instead of the default.
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, conflicts_with = "top_p")]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub top_p: Option<f32>,

    /// Upper bound on generated tokens. Unbounded when omitted.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sequence that ends generation. Can be repeated.
    #[arg(long = "stop", value_name = "SEQUENCE")]
    pub stop_sequences: Vec<String>,
}

impl GenerationArgs {
    pub fn context(&self) -> Context {
        match &self.model {
            Some(model) => Context::new().with(ContextKey::ModelIdentifier, model.as_str()),
            None => Context::new(),
        }
    }

    pub fn parameters(&self) -> CompletionParameters {
        let sampling = match (self.temperature, self.top_p) {
            (Some(temperature), _) => Some(Sampling::Temperature(temperature)),
            (None, Some(top_p)) => Some(Sampling::TopP(top_p)),
            (None, None) => None,
        };

        CompletionParameters {
            sampling,
            token_limit: self.max_tokens.map(TokenLimit::Bounded).unwrap_or_default(),
            stop_sequences: self.stop_sequences.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn builds_parameters_from_flags() {
        let args = Args::try_parse_from([
            "gembridge",
            "complete",
            "Once upon a time",
            "--top-p",
            "0.9",
            "--max-tokens",
            "64",
            "--stop",
            "END",
            "--stop",
            "THE END",
            "--model",
            "gemini-2.0-flash",
        ])
        .unwrap();

        let Command::Complete { generation, .. } = args.command else {
            unreachable!("parsed a complete command");
        };

        insta::assert_debug_snapshot!(generation.parameters(), @r#"
        CompletionParameters {
            sampling: Some(
                TopP(
                    0.9,
                ),
            ),
            token_limit: Bounded(
                64,
            ),
            stop_sequences: {
                "END",
                "THE END",
            },
        }
        "#);

        assert_eq!(
            generation.context().get(ContextKey::ModelIdentifier),
            Some(&["gemini-2.0-flash".to_string()][..])
        );
    }

    #[test]
    fn sampling_flags_conflict() {
        let result = Args::try_parse_from([
            "gembridge",
            "chat",
            "hi",
            "--temperature",
            "0.2",
            "--top-p",
            "0.9",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let args = Args::try_parse_from(["gembridge", "chat", "--system", "Be terse", "2+2?"]).unwrap();

        let Command::Chat {
            system,
            code_execution,
            generation,
            ..
        } = args.command
        else {
            unreachable!("parsed a chat command");
        };

        assert_eq!(system.as_deref(), Some("Be terse"));
        assert!(!code_execution);
        assert_eq!(generation.parameters(), CompletionParameters::default());
        assert!(generation.context().is_empty());
    }
}
