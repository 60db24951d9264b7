//! Command implementations

mod ask;
mod chat;
mod collections;
mod config;
mod convert;
mod ingest;
mod providers;
mod retrieve;

use crate::cli::Commands;
use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use ragassist_llm::{create_embedder, Embedder, LlmClientAdapter, LlmFactory, ProviderOptions};
use ragassist_retrieval::{load_prompt_config, PromptConfig, Retriever};
use ragassist_store::StoreHandle;
use std::sync::Arc;

/// Key of the assistant prompt inside the prompt configuration file
const PROMPT_KEY: &str = "rag_assistant_prompt";

/// Execute a CLI command
pub fn execute(command: Commands, ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    match command {
        Commands::Convert(args) => convert::execute(args, ctx, output),
        Commands::Ingest(args) => ingest::execute(args, ctx, output),
        Commands::Retrieve(args) => retrieve::execute(args, ctx, output),
        Commands::Ask(args) => ask::execute(args, ctx, output),
        Commands::Chat(args) => chat::execute(args, ctx, output),
        Commands::Providers => providers::execute(ctx, output),
        Commands::Collections => collections::execute(ctx, output),
        Commands::Config => config::execute(ctx, output),
    }
}

/// Lazily-opened handle over the configured vector store directory
fn open_store(ctx: &AppContext) -> Arc<StoreHandle> {
    Arc::new(StoreHandle::persistent(&ctx.app.paths.vector_db_dir))
}

fn build_embedder(ctx: &AppContext) -> Result<Arc<dyn Embedder>> {
    create_embedder(ctx.embedder(), ctx.app.embedding.dimensions)
        .with_context(|| format!("Failed to create embedder '{}'", ctx.embedder()))
}

fn build_retriever(ctx: &AppContext, store: Arc<StoreHandle>) -> Result<Retriever> {
    Ok(Retriever::new(store, build_embedder(ctx)?, ctx.collection()))
}

fn load_prompt(ctx: &AppContext) -> Result<PromptConfig> {
    load_prompt_config(&ctx.prompt_config_path, PROMPT_KEY).with_context(|| {
        format!("Failed to load prompt configuration from {}", ctx.prompt_config_path.display())
    })
}

/// Instantiate a provider's client; the model defaults to the configured one
fn create_llm(
    factory: &LlmFactory,
    ctx: &AppContext,
    provider_name: &str,
    model_name: Option<&str>,
    temperature: f32,
) -> Result<LlmClientAdapter> {
    let provider = factory.get_llm_provider(provider_name)?;
    let model_name = model_name.or_else(|| ctx.app.default_model_for(provider.name()));

    let llm = provider
        .create_llm(model_name, temperature, ProviderOptions::new())
        .with_context(|| format!("Failed to create {} LLM", provider.name()))?;

    tracing::info!(
        "Instantiated '{}' LLM with model '{}' and temperature {}",
        provider.name(),
        llm.model_name(),
        temperature
    );
    Ok(llm)
}
