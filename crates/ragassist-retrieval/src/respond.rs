use ragassist_core::error::Result;
use ragassist_llm::{InvokeOptions, LlmClientAdapter};

use crate::prompt::{build_prompt, build_rag_input, PromptConfig};
use crate::retriever::Retriever;

/// Answer `query` from the documents `retriever` finds for it
///
/// An empty retrieval is still sent to the model with an empty document list.
pub fn respond_to_query(
    retriever: &Retriever,
    prompt_config: &PromptConfig,
    query: &str,
    llm: &LlmClientAdapter,
    top_k: usize,
    threshold: f32,
) -> Result<String> {
    let documents = retriever.retrieve(query, top_k, threshold)?;
    let rule = "-".repeat(100);

    tracing::debug!("{}", rule);
    tracing::debug!("Relevant documents:");
    for doc in &documents {
        tracing::debug!("{}", doc);
        tracing::debug!("{}", rule);
    }
    tracing::debug!("User's question: {}", query);
    tracing::debug!("{}", rule);

    let input_data = build_rag_input(&documents, query);
    let prompt = build_prompt(prompt_config, &input_data)?;
    tracing::debug!("RAG assistant prompt: {}", prompt);

    let response = llm.invoke(&prompt, &InvokeOptions::new())?;
    tracing::info!(
        provider = %llm.provider(),
        model = %response.model,
        "Received response ({} chars)",
        response.content.len()
    );
    Ok(response.content)
}
