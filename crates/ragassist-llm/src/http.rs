//! Blocking bridge for the async HTTP clients and request helpers

use std::future::Future;

use serde_json::Value;

use crate::invoke::{InvokeOptions, ProviderOptions};

/// Run a future to completion on a private runtime
///
/// The pipeline is synchronous; callers must not already be inside a runtime.
pub(crate) fn block_on<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}

/// Merge client options, then per-call options, into a JSON object
pub(crate) fn merge_options(target: &mut Value, fixed: &ProviderOptions, per_call: &InvokeOptions) {
    if let Some(obj) = target.as_object_mut() {
        for (key, value) in fixed.iter().chain(per_call.iter()) {
            obj.insert(key.clone(), value.clone());
        }
    }
}

/// Pull a readable message out of an API error body
pub(crate) fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match &v["error"] {
            Value::String(message) => Some(message.clone()),
            error => error["message"].as_str().map(str::to_string),
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_per_call_options_win() {
        let mut body = json!({"model": "m", "temperature": 0.0});
        let fixed = json!({"max_tokens": 10, "top_p": 0.5}).as_object().cloned().unwrap();
        let per_call = json!({"max_tokens": 20}).as_object().cloned().unwrap();

        merge_options(&mut body, &fixed, &per_call);

        assert_eq!(body["max_tokens"], 20);
        assert_eq!(body["top_p"], 0.5);
        assert_eq!(body["model"], "m");
    }

    #[test]
    fn test_error_detail_shapes() {
        assert_eq!(error_detail(r#"{"error": {"message": "bad key"}}"#), "bad key");
        assert_eq!(error_detail(r#"{"error": "model not found"}"#), "model not found");
        assert_eq!(error_detail("gateway timeout"), "gateway timeout");
    }

    proptest::proptest! {
        #[test]
        fn prop_merge_keeps_body_and_lets_per_call_win(
            fixed in proptest::collection::btree_map("[a-e]", 0i64..100, 0..5),
            per_call in proptest::collection::btree_map("[a-e]", 100i64..200, 0..5),
        ) {
            let mut body = json!({"model": "m"});
            let fixed: ProviderOptions = fixed.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
            let per_call: InvokeOptions = per_call.iter().map(|(k, v)| (k.clone(), json!(v))).collect();

            merge_options(&mut body, &fixed, &per_call);

            proptest::prop_assert_eq!(body["model"].as_str(), Some("m"));
            for (key, value) in &fixed {
                if !per_call.contains_key(key) {
                    proptest::prop_assert_eq!(&body[key.as_str()], value);
                }
            }
            for (key, value) in &per_call {
                proptest::prop_assert_eq!(&body[key.as_str()], value);
            }
        }
    }
}
