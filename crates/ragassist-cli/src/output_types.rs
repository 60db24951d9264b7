use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Output for convert command
#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Output for ingest command
#[derive(Debug, Serialize)]
pub struct IngestOutput {
    pub collection: String,
    pub data_dir: PathBuf,
    pub files: usize,
    pub chunks: usize,
    pub skipped: Vec<PathBuf>,
    pub total_records: usize,
}

/// One row of the retrieve command
#[derive(Debug, Serialize, Tabled)]
pub struct RetrievedRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Distance")]
    pub distance: String,
    #[tabled(rename = "Text")]
    pub preview: String,
}

/// Output for retrieve command
#[derive(Debug, Serialize)]
pub struct RetrieveOutput {
    pub query: String,
    pub collection: String,
    pub threshold: f32,
    pub top_k: usize,
    pub documents: Vec<ragassist_core::models::RetrievedDocument>,
}

/// Output for ask command
#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub query: String,
    pub provider: String,
    pub model: String,
    pub answer: String,
}

/// One row of the providers command
#[derive(Debug, Serialize, Tabled)]
pub struct ProviderRow {
    #[tabled(rename = "Provider")]
    pub name: String,
    #[tabled(rename = "Default Model")]
    pub default_model: String,
    #[tabled(rename = "Credential")]
    pub credential_variable: String,
    #[tabled(rename = "Configured")]
    pub credential_present: bool,
}

/// One row of the collections command
#[derive(Debug, Serialize, Tabled)]
pub struct CollectionRow {
    #[tabled(rename = "Collection")]
    pub name: String,
    #[tabled(rename = "Records")]
    pub records: usize,
    #[tabled(rename = "Dimensions")]
    pub dimensions: String,
}

/// One row of the config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
