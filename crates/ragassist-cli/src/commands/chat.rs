//! Interactive question-answering loop
//!
//! `exit` quits, `config` changes the retrieval parameters, `llm` switches the model.
//! Any other input is answered from the collection. Errors are reported and the
//! session continues.

use crate::cli::ChatArgs;
use crate::config_loader::AppContext;
use crate::errors;
use crate::interactive;
use crate::output::OutputWriter;
use crate::output_types::AskOutput;
use crate::progress::create_spinner;
use anyhow::Result;
use ragassist_llm::{LlmClientAdapter, LlmFactory};
use ragassist_retrieval::respond_to_query;

use super::{build_retriever, create_llm, load_prompt, open_store};

pub fn execute(args: ChatArgs, ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let factory = LlmFactory::with_default_providers();
    let prompt_config = load_prompt(ctx)?;
    let handle = open_store(ctx);
    let retriever = build_retriever(ctx, handle.clone())?;

    let mut threshold = ctx.threshold();
    let mut top_k = ctx.top_k();

    let temperature = args.model.temperature.unwrap_or(ctx.app.llm.temperature);
    let mut llm = match create_llm(&factory, ctx, ctx.provider(), args.model.model.as_deref(), temperature) {
        Ok(llm) => Some(llm),
        Err(err) => {
            errors::report(&err, output);
            output.info("Enter 'llm' to choose another provider.");
            None
        }
    };

    output.success(format!(
        "Chatting with collection '{}' (top_k={}, threshold={})",
        retriever.collection_name(),
        top_k,
        threshold
    ));

    loop {
        let query = interactive::prompt_question()?;

        match query.trim() {
            "exit" => break,
            "" => continue,
            "config" => {
                match interactive::prompt_retrieval_params(threshold, top_k) {
                    Ok((new_threshold, new_top_k)) => {
                        threshold = new_threshold;
                        top_k = new_top_k;
                        output.success(format!(
                            "Retrieval parameters set: top_k={}, threshold={}",
                            top_k, threshold
                        ));
                    }
                    Err(err) => errors::report(&err, output),
                }
                continue;
            }
            "llm" => {
                match select_llm(&factory, ctx) {
                    Ok(selected) => llm = Some(selected),
                    Err(err) => errors::report(&err, output),
                }
                continue;
            }
            _ => {}
        }

        let Some(active) = llm.as_ref() else {
            output.warning("No LLM is configured. Enter 'llm' to choose a provider.");
            continue;
        };

        let spinner = create_spinner("Thinking...");
        let response = respond_to_query(&retriever, &prompt_config, &query, active, top_k, threshold);
        spinner.finish_and_clear();

        match response {
            Ok(answer) => {
                tracing::debug!("LLM response: {}", answer);
                if output.is_json() {
                    output.result(AskOutput {
                        query,
                        provider: active.provider().to_string(),
                        model: active.model_name().to_string(),
                        answer,
                    })?;
                } else {
                    output.rule();
                    output.section("LLM response");
                    println!("{}\n", answer);
                    output.rule();
                }
            }
            Err(err) => errors::report(&err.into(), output),
        }
    }

    handle.shutdown();
    output.info("Goodbye!");
    Ok(())
}

/// Provider menu followed by model and temperature prompts
fn select_llm(factory: &LlmFactory, ctx: &AppContext) -> Result<LlmClientAdapter> {
    tracing::info!("Let us initialize the LLM.");
    let provider = interactive::choose_provider(&factory.get_supported_providers(), ctx.provider())?;
    tracing::info!("Selected provider: {}", provider);

    let default_model = match ctx.app.default_model_for(&provider) {
        Some(model) => model.to_string(),
        None => factory.get_llm_provider(&provider)?.default_model_name().to_string(),
    };
    let (model, temperature) = interactive::prompt_model_params(&provider, &default_model)?;

    create_llm(factory, ctx, &provider, Some(&model), temperature)
}
