use crate::config_loader::AppContext;
use crate::output::OutputWriter;
use crate::output_types::CollectionRow;
use anyhow::{Context, Result};

use super::open_store;

pub fn execute(ctx: &AppContext, output: &OutputWriter) -> Result<()> {
    let handle = open_store(ctx);
    let store = handle.get().context("Failed to open the vector store")?;

    let mut rows = Vec::new();
    for name in store.list_collections()? {
        let Some(collection) = store.get_collection(&name)? else {
            continue;
        };
        rows.push(CollectionRow {
            records: collection.count()?,
            dimensions: collection
                .dimensions()?
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            name,
        });
    }
    handle.shutdown();

    if !output.is_json() {
        output.section(format!("Collections in {}", ctx.app.paths.vector_db_dir.display()));
    }
    output.table(rows)
}
