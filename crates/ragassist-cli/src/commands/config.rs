use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;

pub fn execute(ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = ctx
        .settings
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    if !output.is_json() {
        output.section("Effective Configuration");
        output.kv("Config file", ctx.config_path.display());
        output.kv("Prompt config", ctx.prompt_config_path.display());
    }
    output.table(rows)
}
