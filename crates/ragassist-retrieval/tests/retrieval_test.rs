//! Retrieval behaviour against a scripted collection

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use ragassist_core::error::Result;
use ragassist_core::models::{DocumentRecord, Include};
use ragassist_llm::{ChatModel, ChatResponse, Embedder, InvokeOptions, LlmClientAdapter, PromptArgument};
use ragassist_retrieval::{respond_to_query, PromptConfig, Retriever};
use ragassist_store::{Collection, QueryResult, StoreHandle, VectorStore};

struct UnitEmbedder;

impl Embedder for UnitEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "unit"
    }
}

/// Collection answering every query with fixed `(text, distance)` pairs
struct ScriptedCollection {
    results: Vec<(String, f32)>,
    requested: Arc<Mutex<Vec<usize>>>,
}

impl Collection for ScriptedCollection {
    fn name(&self) -> &str {
        "scripted"
    }

    fn count(&self) -> Result<usize> {
        Ok(self.results.len())
    }

    fn dimensions(&self) -> Result<Option<usize>> {
        Ok(Some(2))
    }

    fn add(&self, _records: Vec<DocumentRecord>) -> Result<()> {
        Ok(())
    }

    fn upsert(&self, _records: Vec<DocumentRecord>) -> Result<()> {
        Ok(())
    }

    fn get(&self, _ids: &[&str]) -> Result<Vec<DocumentRecord>> {
        Ok(Vec::new())
    }

    fn delete(&self, _ids: &[&str]) -> Result<usize> {
        Ok(0)
    }

    fn delete_where(&self, _key: &str, _values: &[serde_json::Value]) -> Result<usize> {
        Ok(0)
    }

    fn query(&self, _embeddings: &[Vec<f32>], n_results: usize, include: &[Include]) -> Result<QueryResult> {
        self.requested.lock().unwrap().push(n_results);
        assert!(include.contains(&Include::Documents));
        assert!(include.contains(&Include::Distances));

        let hits: Vec<&(String, f32)> = self.results.iter().take(n_results).collect();
        Ok(QueryResult {
            ids: vec![hits.iter().map(|(text, _)| format!("id-{}", text)).collect()],
            documents: Some(vec![hits.iter().map(|(text, _)| text.clone()).collect()]),
            distances: Some(vec![hits.iter().map(|(_, d)| *d).collect()]),
            metadatas: None,
            embeddings: None,
        })
    }
}

struct ScriptedStore {
    collection: Option<Arc<ScriptedCollection>>,
}

impl VectorStore for ScriptedStore {
    fn get_collection(&self, _name: &str) -> Result<Option<Arc<dyn Collection>>> {
        Ok(self.collection.clone().map(|c| c as Arc<dyn Collection>))
    }

    fn get_or_create_collection(&self, _name: &str) -> Result<Arc<dyn Collection>> {
        unimplemented!("read-only in tests")
    }

    fn delete_collection(&self, _name: &str) -> Result<bool> {
        Ok(false)
    }

    fn list_collections(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

fn scripted_retriever(results: Vec<(String, f32)>) -> (Retriever, Arc<Mutex<Vec<usize>>>) {
    let requested = Arc::new(Mutex::new(Vec::new()));
    let collection = Arc::new(ScriptedCollection { results, requested: requested.clone() });
    let store = ScriptedStore { collection: Some(collection) };
    let handle = Arc::new(StoreHandle::from_store(Arc::new(store)));
    (Retriever::new(handle, Arc::new(UnitEmbedder), "publications"), requested)
}

#[test]
fn test_threshold_filters_and_keeps_order() {
    let (retriever, requested) = scripted_retriever(vec![
        ("A".to_string(), 0.1),
        ("C".to_string(), 0.2),
        ("B".to_string(), 0.4),
    ]);

    let docs = retriever.retrieve("question", 3, 0.3).unwrap();
    assert_eq!(docs, vec!["A", "C"]);
    assert_eq!(*requested.lock().unwrap(), vec![3]);
}

#[test]
fn test_missing_collection_is_empty() {
    let store = ScriptedStore { collection: None };
    let handle = Arc::new(StoreHandle::from_store(Arc::new(store)));
    let retriever = Retriever::new(handle, Arc::new(UnitEmbedder), "publications");

    assert!(retriever.retrieve("question", 5, 0.3).unwrap().is_empty());
}

#[test]
fn test_no_results_is_empty() {
    let (retriever, _) = scripted_retriever(Vec::new());
    assert!(retriever.retrieve("question", 5, 0.3).unwrap().is_empty());
}

#[test]
fn test_non_positive_threshold_matches_nothing() {
    let (retriever, _) = scripted_retriever(vec![("A".to_string(), 0.05)]);
    assert!(retriever.retrieve("question", 5, 0.0).unwrap().is_empty());
    assert!(retriever.retrieve("question", 5, -1.0).unwrap().is_empty());
}

proptest! {
    #[test]
    fn prop_retrieval_respects_threshold_and_top_k(
        mut distances in proptest::collection::vec(0.0f32..2.0, 0..20),
        top_k in 1usize..10,
        threshold in -0.5f32..2.5,
    ) {
        distances.sort_by(|a, b| a.total_cmp(b));
        let results: Vec<(String, f32)> =
            distances.iter().enumerate().map(|(i, d)| (format!("doc{:02}", i), *d)).collect();
        let (retriever, requested) = scripted_retriever(results.clone());

        let docs = retriever.retrieve_scored("q", top_k, threshold).unwrap();

        prop_assert_eq!(requested.lock().unwrap().clone(), vec![top_k]);
        prop_assert!(docs.len() <= top_k);
        prop_assert!(docs.iter().all(|d| d.distance < threshold));

        // Order preserved: the kept texts form a subsequence of the store order
        let store_order: Vec<&String> = results.iter().take(top_k).map(|(t, _)| t).collect();
        let mut cursor = store_order.iter();
        for doc in &docs {
            prop_assert!(cursor.any(|t| **t == doc.text));
        }

        let expected = results.iter().take(top_k).filter(|(_, d)| *d < threshold).count();
        prop_assert_eq!(docs.len(), expected);
    }
}

/// Chat model echoing the prompt it receives
struct EchoChat {
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ChatModel for EchoChat {
    fn invoke(&self, prompt: PromptArgument<'_>, _options: &InvokeOptions) -> Result<ChatResponse> {
        self.prompts.lock().unwrap().push(prompt.text().to_string());
        Ok(ChatResponse::new("answer", "echo"))
    }

    fn model_name(&self) -> &str {
        "echo"
    }

    fn provider(&self) -> &str {
        "Echo"
    }
}

#[test]
fn test_respond_to_query_builds_prompt() {
    let (retriever, _) = scripted_retriever(vec![("ctx1".to_string(), 0.1), ("far".to_string(), 0.9)]);
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let llm = LlmClientAdapter::new(Box::new(EchoChat { prompts: prompts.clone() }));
    let config = PromptConfig::new().with("template", "Answer using: {input_data}");

    let answer = respond_to_query(&retriever, &config, "What is RAG?", &llm, 5, 0.3).unwrap();

    assert_eq!(answer, "answer");
    assert_eq!(
        *prompts.lock().unwrap(),
        vec!["Answer using: Relevant documents:\n\n['ctx1']\n\nUser's question:\n\nWhat is RAG?"]
    );
}

#[test]
fn test_respond_with_no_documents_still_calls_model() {
    let (retriever, _) = scripted_retriever(Vec::new());
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let llm = LlmClientAdapter::new(Box::new(EchoChat { prompts: prompts.clone() }));
    let config = PromptConfig::new().with("template", "{input_data}");

    respond_to_query(&retriever, &config, "q", &llm, 5, 0.3).unwrap();
    assert_eq!(
        *prompts.lock().unwrap(),
        vec!["Relevant documents:\n\n[]\n\nUser's question:\n\nq"]
    );
}
