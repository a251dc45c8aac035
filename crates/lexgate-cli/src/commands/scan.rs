//! `lexgate scan` command implementation.

use anyhow::Context;
use lexgate_core::Language;
use lexgate_gate::{Gate, GateDecision, OutboundCall};
use std::io::Read;
use std::path::Path;

pub async fn run(
    config_path: &Path,
    file: Option<&Path>,
    destination: &str,
    language: Option<Language>,
    json: bool,
) -> anyhow::Result<i32> {
    let config = super::load_config(config_path)?;

    let payload = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            buf
        }
    };

    let gate = Gate::from_config(&config)?;
    let mut call = OutboundCall::new(destination, payload);
    if let Some(language) = language {
        call = call.with_language(language);
    }

    match gate.intercept(call).await {
        GateDecision::Forward { verdict, .. } => {
            if json {
                let value = serde_json::json!({ "blocked": false, "verdict": verdict });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "{} risk={:.2} rule={}",
                    verdict.outcome, verdict.risk_score, verdict.rule
                );
                if !verdict.categories.is_empty() {
                    let names: Vec<String> =
                        verdict.categories.iter().map(|c| c.to_string()).collect();
                    println!("categories: {}", names.join(", "));
                }
            }
            Ok(0)
        }
        GateDecision::Blocked(blocked) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&blocked)?);
            } else {
                println!("BLOCK rule={}", blocked.rule);
                println!("{}", blocked.message);
            }
            Ok(2)
        }
    }
}
