// SPDX-FileCopyrightText: 2026 Careline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `careline chat` command implementation.
//!
//! A readline REPL that posts each line to a running bridge's `/chat`
//! endpoint and prints the reply texts.

use careline_core::{CarelineError, ReplyFragment};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Sends one utterance to the chat endpoint and returns the displayable texts.
pub async fn send_chat(
    client: &reqwest::Client,
    url: &str,
    text: &str,
) -> Result<Vec<String>, CarelineError> {
    let response = client
        .post(url)
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .map_err(|e| CarelineError::IntentUnavailable {
            message: format!("chat endpoint unreachable: {e}"),
            source: Some(Box::new(e)),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let detail = body
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("no detail");
        return Err(CarelineError::IntentUnavailable {
            message: format!("bridge returned {status}: {detail}"),
            source: None,
        });
    }

    let fragments: Vec<ReplyFragment> =
        response
            .json()
            .await
            .map_err(|e| CarelineError::IntentUnavailable {
                message: format!("unreadable chat reply: {e}"),
                source: Some(Box::new(e)),
            })?;

    Ok(fragments
        .iter()
        .filter_map(ReplyFragment::display_text)
        .map(String::from)
        .collect())
}

/// Runs the `careline chat` REPL until `exit`, Ctrl+C or Ctrl+D.
pub async fn run_chat(url: &str) -> Result<(), CarelineError> {
    let client = reqwest::Client::new();
    let mut rl = DefaultEditor::new()
        .map_err(|e| CarelineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "careline chat".bold().green());
    println!("Talking to {}. Type {} to quit.\n", url.cyan(), "exit".yellow());

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("exit") {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match send_chat(&client, url, trimmed).await {
                    Ok(texts) => {
                        for text in texts {
                            println!("{} {text}", "bot:".blue().bold());
                        }
                    }
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn send_chat_returns_texts_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(serde_json::json!({"text": "plans"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"recipient_id": "user", "text": "Basic: 500 KES"},
                {"recipient_id": "user", "image": "https://example.com/plans.png"},
                {"recipient_id": "user", "text": "Premium: 2000 KES"}
            ])))
            .mount(&server)
            .await;

        let texts = send_chat(&reqwest::Client::new(), &format!("{}/chat", server.uri()), "plans")
            .await
            .unwrap();
        assert_eq!(texts, vec!["Basic: 500 KES", "Premium: 2000 KES"]);
    }

    #[tokio::test]
    async fn send_chat_surfaces_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_json(serde_json::json!({"error": "engine down"})),
            )
            .mount(&server)
            .await;

        let err = send_chat(&reqwest::Client::new(), &format!("{}/chat", server.uri()), "hi")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("502"), "got: {message}");
        assert!(message.contains("engine down"), "got: {message}");
    }
}
