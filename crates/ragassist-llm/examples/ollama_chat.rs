//! Embed two sentences and ask a question through a local Ollama server
//!
//! Requires Ollama running locally with `nomic-embed-text` and `llama3` pulled.
//! To run: cargo run -p ragassist-llm --example ollama_chat

use ragassist_llm::{Embedder, InvokeOptions, LlmFactory, OllamaEmbedder, ProviderOptions};

fn main() {
    println!("RAG Assistant LLM - Ollama Example");
    println!("==================================\n");

    let embedder = OllamaEmbedder::from_env("nomic-embed-text", 768);
    let texts = ["Retrieval finds relevant passages", "Generation writes the answer"];

    match embedder.embed(&texts) {
        Ok(embeddings) => {
            println!("✓ Generated {} embeddings", embeddings.len());
            for (i, embedding) in embeddings.iter().enumerate() {
                println!("  Embedding {}: {} dimensions", i + 1, embedding.len());
            }
        }
        Err(e) => {
            println!("✗ Failed to generate embeddings:\n  {}", e);
            println!("\nTo run this example successfully:");
            println!("  1. Start Ollama: ollama serve");
            println!("  2. Pull the models: ollama pull nomic-embed-text && ollama pull llama3");
            return;
        }
    }

    let factory = LlmFactory::with_default_providers();
    let llm = match factory
        .get_llm_provider("ollama")
        .and_then(|provider| provider.create_llm(None, 0.0, ProviderOptions::new()))
    {
        Ok(llm) => llm,
        Err(e) => {
            println!("✗ {}", e);
            return;
        }
    };

    // The Ollama client only takes a named argument, so this goes through the fallback
    match llm.invoke("In one sentence, what is retrieval-augmented generation?", &InvokeOptions::new()) {
        Ok(response) => println!("\n{} says:\n{}", response.model, response.content),
        Err(e) => println!("✗ {}", e),
    }
}
