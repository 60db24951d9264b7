use crate::cli::RetrieveArgs;
use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use crate::output_types::{RetrieveOutput, RetrievedRow};
use anyhow::Result;

use super::{build_retriever, open_store};

const PREVIEW_CHARS: usize = 80;

pub fn execute(args: RetrieveArgs, ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let handle = open_store(ctx);
    let retriever = build_retriever(ctx, handle.clone())?;

    let documents = retriever.retrieve_scored(&args.query, ctx.top_k(), ctx.threshold())?;
    handle.shutdown();

    if output.is_json() {
        return output.result(RetrieveOutput {
            query: args.query,
            collection: ctx.collection().to_string(),
            threshold: ctx.threshold(),
            top_k: ctx.top_k(),
            documents,
        });
    }

    output.section("Query");
    output.kv("Query", &args.query);
    output.kv("Collection", ctx.collection());
    output.kv("Top K", ctx.top_k());
    output.kv("Threshold", ctx.threshold());

    output.section("Relevant Documents");
    let rows = documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| RetrievedRow {
            rank: idx + 1,
            id: doc.id.clone(),
            distance: format!("{:.4}", doc.distance),
            preview: preview(&doc.text),
        })
        .collect();
    output.table(rows)
}

/// First line of `text`, cut to a fixed number of characters
fn preview(text: &str) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if line.chars().count() > PREVIEW_CHARS {
        format!("{}...", line.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("\n# Title\nbody"), "# Title");
        let long = "x".repeat(100);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 3);
    }
}
