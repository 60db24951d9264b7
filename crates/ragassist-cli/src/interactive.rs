use anyhow::Result;
use console::style;
use dialoguer::Input;

/// Ask for the next chat input
pub fn prompt_question() -> Result<String> {
    let query: String = Input::new()
        .with_prompt(
            "Enter a question, 'config' to change the parameters, 'llm' to change the LLM, or 'exit' to quit",
        )
        .allow_empty(true)
        .interact_text()?;
    Ok(query)
}

/// Numbered provider menu; re-prompts until the answer names a provider
pub fn choose_provider(providers: &[String], default: &str) -> Result<String> {
    println!("\n{}", style("Supported LLM Providers:").bold());
    for (idx, name) in providers.iter().enumerate() {
        println!("{}. {}", idx + 1, capitalize(name));
    }

    loop {
        let choice: String = Input::new()
            .with_prompt(format!("Choose provider [default: {}]", default))
            .allow_empty(true)
            .interact_text()?;

        match parse_provider_choice(&choice, providers, default) {
            Some(provider) => return Ok(provider),
            None => println!("{}", style("Invalid choice, please try again.").yellow()),
        }
    }
}

/// Model name and temperature for a provider
pub fn prompt_model_params(provider: &str, default_model: &str) -> Result<(String, f32)> {
    let model: String = Input::new()
        .with_prompt(format!("Enter model name for '{}' llm", capitalize(provider)))
        .default(default_model.to_string())
        .interact_text()?;

    let temperature: f32 = Input::new()
        .with_prompt("Enter temperature")
        .default(0.0)
        .validate_with(|t: &f32| -> std::result::Result<(), &str> {
            if t.is_finite() && *t >= 0.0 {
                Ok(())
            } else {
                Err("temperature must be a non-negative number")
            }
        })
        .interact_text()?;

    Ok((model, temperature))
}

/// New retrieval threshold and top-k
pub fn prompt_retrieval_params(threshold: f32, top_k: usize) -> Result<(f32, usize)> {
    let threshold: f32 = Input::new()
        .with_prompt("Enter the retrieval threshold")
        .default(threshold)
        .validate_with(|t: &f32| -> std::result::Result<(), &str> {
            if t.is_finite() {
                Ok(())
            } else {
                Err("threshold must be a finite number")
            }
        })
        .interact_text()?;

    let top_k: usize = Input::new()
        .with_prompt("Enter the Top K value")
        .default(top_k)
        .validate_with(|k: &usize| -> std::result::Result<(), &str> {
            if *k >= 1 {
                Ok(())
            } else {
                Err("Top K must be at least 1")
            }
        })
        .interact_text()?;

    Ok((threshold, top_k))
}

/// JSON file name (empty keeps the default) and number of entries to convert
pub fn prompt_convert(default_entries: usize) -> Result<(Option<String>, usize)> {
    let file: String = Input::new()
        .with_prompt("Enter the json file name to convert to markdown (or press Enter to use default)")
        .allow_empty(true)
        .interact_text()?;

    let count: String = Input::new()
        .with_prompt("Enter number of json entries to process (or press Enter to use default)")
        .allow_empty(true)
        .interact_text()?;

    let (entries, warning) = parse_entry_count(&count, default_entries);
    if let Some(warning) = warning {
        println!("{}", style(warning).yellow());
    }

    let file = file.trim();
    Ok(((!file.is_empty()).then(|| file.to_string()), entries))
}

/// Resolve a menu answer: empty picks `default`, a 1-based index or a provider name
pub fn parse_provider_choice(choice: &str, providers: &[String], default: &str) -> Option<String> {
    let choice = choice.trim();
    if choice.is_empty() {
        return Some(default.to_string());
    }

    if let Ok(idx) = choice.parse::<usize>() {
        return (1..=providers.len()).contains(&idx).then(|| providers[idx - 1].clone());
    }

    providers.iter().find(|p| p.eq_ignore_ascii_case(choice)).cloned()
}

/// Parse an entry count, falling back to `default` with a warning
pub fn parse_entry_count(input: &str, default: usize) -> (usize, Option<&'static str>) {
    let input = input.trim();
    if input.is_empty() {
        return (default, None);
    }

    match input.parse::<i64>() {
        Ok(n) if n > 0 => (n as usize, None),
        Ok(_) => (default, Some("Number must be positive. Using default.")),
        Err(_) => (default, Some("Invalid number. Using default.")),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
