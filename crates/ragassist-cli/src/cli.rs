use clap::{Args, Parser, Subcommand};
use ragassist_core::config::CliConfigOverrides;
use std::path::PathBuf;

/// rag-assistant - Ask questions about your documents
#[derive(Parser, Debug)]
#[command(name = "rag-assistant")]
#[command(about = "Retrieval-augmented assistant for local document collections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Application configuration file
    #[arg(long, global = true, default_value = "config/config.yaml")]
    pub config: PathBuf,

    /// Prompt configuration file
    #[arg(long, global = true, default_value = "config/prompt_config.yaml")]
    pub prompt_config: PathBuf,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags layered over the config file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Maximum cosine distance of a retrieved document (exclusive)
    #[arg(long, global = true)]
    pub threshold: Option<f32>,

    /// Number of nearest documents requested from the store
    #[arg(long, short = 'k', global = true)]
    pub top_k: Option<usize>,

    /// Collection to search or fill
    #[arg(long, global = true)]
    pub collection: Option<String>,

    /// LLM provider (openai, ollama, google, groq)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Embedding model as provider:model (e.g., "ollama:nomic-embed-text")
    #[arg(long, global = true)]
    pub embedder: Option<String>,
}

impl From<OverrideArgs> for CliConfigOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            threshold: args.threshold,
            top_k: args.top_k,
            collection: args.collection,
            provider: args.provider,
            embedder: args.embedder,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a JSON publication dump into Markdown files
    Convert(ConvertArgs),

    /// Embed the documents of the data directory into a collection
    Ingest(IngestArgs),

    /// Show the documents retrieved for a query
    Retrieve(RetrieveArgs),

    /// Answer a single question
    Ask(AskArgs),

    /// Start an interactive question-answering session
    Chat(ChatArgs),

    /// List the supported LLM providers
    Providers,

    /// List the collections in the vector store
    Collections,

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// JSON file with an array of publications
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Number of entries to convert
    #[arg(long)]
    pub entries: Option<usize>,

    /// Directory for the Markdown files (defaults to the data directory)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Interactive mode - prompt for the file and entry count
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(Parser, Debug)]
pub struct IngestArgs {
    /// Directory with the documents to ingest (defaults to the data directory)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Delete the collection before ingesting
    #[arg(long)]
    pub reset: bool,
}

#[derive(Parser, Debug)]
pub struct RetrieveArgs {
    /// The query text
    pub query: String,
}

/// Model selection shared by `ask` and `chat`
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Model name (defaults to the provider's configured model)
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question
    pub query: String,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}
