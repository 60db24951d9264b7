use crate::cli::IngestArgs;
use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use crate::output_types::IngestOutput;
use crate::progress::IngestProgressDisplay;
use anyhow::{Context, Result};
use ragassist_core::processing::TextSplitter;
use ragassist_retrieval::IngestPipeline;

use super::{build_embedder, open_store};

pub fn execute(args: IngestArgs, ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let data_dir = args.data_dir.unwrap_or_else(|| ctx.app.paths.data_dir.clone());
    let collection_name = ctx.collection();

    let handle = open_store(ctx);
    let store = handle.get().context("Failed to open the vector store")?;

    if args.reset && store.delete_collection(collection_name)? {
        output.info(format!("Deleted collection '{}'", collection_name));
    }
    let collection = store.get_or_create_collection(collection_name)?;

    let splitter = TextSplitter::new(ctx.app.chunking.chunk_size, ctx.app.chunking.chunk_overlap)?;
    let pipeline = IngestPipeline::new(build_embedder(ctx)?, splitter, ctx.app.embedding.batch_size);

    let mut display = IngestProgressDisplay::new(output.is_json());
    let result = pipeline.ingest_directory_with_progress(&data_dir, collection.as_ref(), |progress| {
        display.update(progress)
    });

    let report = match result {
        Ok(report) => {
            display.finish("Ingestion complete");
            report
        }
        Err(err) => {
            display.fail("Ingestion failed");
            return Err(err)
                .with_context(|| format!("Failed to ingest {}", data_dir.display()));
        }
    };

    for skipped in &report.skipped {
        output.warning(format!("Skipped unsupported file: {}", skipped.display()));
    }

    let total_records = collection.count()?;
    handle.shutdown();

    if output.is_json() {
        output.result(IngestOutput {
            collection: collection_name.to_string(),
            data_dir,
            files: report.files,
            chunks: report.chunks,
            skipped: report.skipped,
            total_records,
        })?;
    } else {
        output.success(format!(
            "Ingested {} chunks from {} files into '{}'",
            report.chunks, report.files, collection_name
        ));
        output.kv("Records in collection", total_records);
    }

    Ok(())
}
