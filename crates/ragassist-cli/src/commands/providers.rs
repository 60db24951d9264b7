use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use crate::output_types::ProviderRow;
use anyhow::Result;
use ragassist_llm::LlmFactory;

pub fn execute(ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let factory = LlmFactory::with_default_providers();

    let rows: Vec<ProviderRow> = factory
        .providers()
        .map(|provider| ProviderRow {
            name: provider.name().to_string(),
            default_model: ctx
                .app
                .default_model_for(provider.name())
                .unwrap_or(provider.default_model_name())
                .to_string(),
            credential_variable: provider.credential_variable().unwrap_or("-").to_string(),
            credential_present: provider.has_credential(),
        })
        .collect();

    if !output.is_json() {
        output.section("Supported LLM Providers");
    }
    output.table(rows)?;

    if !output.is_json() {
        output.kv("Default provider", ctx.provider());
    }
    Ok(())
}
