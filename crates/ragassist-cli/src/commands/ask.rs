use crate::cli::AskArgs;
use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use crate::output_types::AskOutput;
use crate::progress::create_spinner;
use anyhow::Result;
use ragassist_llm::LlmFactory;
use ragassist_retrieval::respond_to_query;

use super::{build_retriever, create_llm, load_prompt, open_store};

pub fn execute(args: AskArgs, ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let factory = LlmFactory::with_default_providers();
    let temperature = args.model.temperature.unwrap_or(ctx.app.llm.temperature);
    let llm = create_llm(&factory, ctx, ctx.provider(), args.model.model.as_deref(), temperature)?;

    let prompt_config = load_prompt(ctx)?;
    let handle = open_store(ctx);
    let retriever = build_retriever(ctx, handle.clone())?;

    let spinner = if output.is_json() {
        indicatif::ProgressBar::hidden()
    } else {
        create_spinner("Thinking...")
    };
    let answer = respond_to_query(
        &retriever,
        &prompt_config,
        &args.query,
        &llm,
        ctx.top_k(),
        ctx.threshold(),
    );
    spinner.finish_and_clear();
    handle.shutdown();
    let answer = answer?;

    if output.is_json() {
        output.result(AskOutput {
            query: args.query,
            provider: llm.provider().to_string(),
            model: llm.model_name().to_string(),
            answer,
        })?;
    } else {
        output.section("LLM response");
        println!("{}\n", answer);
    }

    Ok(())
}
