use crate::cli::ConvertArgs;
use crate::config_loader::AppContext;
use crate::interactive;
use crate::output::OutputWriter;
use crate::output_types::ConvertOutput;
use anyhow::{Context, Result};
use ragassist_core::processing::{json_to_markdown, DEFAULT_NUM_ENTRIES};

/// Source file converted when none is given
const DEFAULT_SOURCE_FILE: &str = "project_1_publications.json";

pub fn execute(args: ConvertArgs, ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let source_dir = &ctx.app.paths.source_data_dir;
    let default_input = args.input.clone().unwrap_or_else(|| source_dir.join(DEFAULT_SOURCE_FILE));

    let (input, entries) = if args.interactive {
        let (file, entries) =
            interactive::prompt_convert(args.entries.unwrap_or(DEFAULT_NUM_ENTRIES))?;
        (file.map(|f| source_dir.join(f)).unwrap_or(default_input), entries)
    } else {
        let entries = match args.entries {
            Some(0) => {
                output.warning("Number must be positive. Using default.");
                DEFAULT_NUM_ENTRIES
            }
            Some(n) => n,
            None => DEFAULT_NUM_ENTRIES,
        };
        (default_input, entries)
    };

    let output_dir = args.output.unwrap_or_else(|| ctx.app.paths.data_dir.clone());

    let files = json_to_markdown(&input, &output_dir, entries)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if output.is_json() {
        output.result(ConvertOutput { input, output_dir, files })?;
    } else {
        for file in &files {
            output.info(format!("Created markdown file: {}", file.display()));
        }
        output.success(format!(
            "Converted {} entries from {} into {}",
            files.len(),
            input.display(),
            output_dir.display()
        ));
    }

    Ok(())
}
