/*!
 * Tests for the Gemini wire format and response extraction
 */

use anyhow::Result;
use serde_json::json;
use cinescore::providers::gemini::{Gemini, GeminiRequest, GeminiResponse};
use cinescore::providers::Provider;

fn client(endpoint: &str) -> Gemini {
    Gemini::new("test-key", endpoint, "gemini-3-flash-preview", None)
}

fn response(value: serde_json::Value) -> Result<GeminiResponse> {
    Ok(serde_json::from_value(value)?)
}

#[test]
fn test_groundedRequest_shouldSerializeSearchToolAndTemperature() -> Result<()> {
    let request = client("").grounded_request("Review \"Dune\"", 0.7);

    let body = serde_json::to_value(&request)?;

    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Review \"Dune\"");
    assert_eq!(body["tools"], json!([{ "google_search": {} }]));
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap_or_default();
    assert!((temperature - 0.7).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_plainRequest_shouldOmitToolsAndGenerationConfig() -> Result<()> {
    let body = serde_json::to_value(GeminiRequest::new("hello"))?;

    assert!(body.get("tools").is_none());
    assert!(body.get("generationConfig").is_none());
    assert!(body["contents"][0]["parts"][0].get("thought").is_none());
    Ok(())
}

#[test]
fn test_extractText_shouldJoinPartsAndSkipThoughts() -> Result<()> {
    let parsed = response(json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "planning the answer", "thought": true },
                    { "text": "Widely praised.\n" },
                    { "text": "Strengths:\n- Score" }
                ]
            }
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 40 }
    }))?;

    let text = Gemini::extract_text(&parsed);

    assert_eq!(text.as_deref(), Some("Widely praised.\nStrengths:\n- Score"));
    Ok(())
}

#[test]
fn test_extractText_withNoCandidatesOrText_shouldReturnNone() -> Result<()> {
    assert!(Gemini::extract_text(&response(json!({}))?).is_none());
    assert!(Gemini::extract_text(&response(json!({ "candidates": [{}] }))?).is_none());
    assert!(Gemini::extract_text(&response(json!({
        "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
    }))?).is_none());
    Ok(())
}

#[test]
fn test_extractCitations_shouldKeepOnlyWebChunksInOrder() -> Result<()> {
    let parsed = response(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "ok" }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "title": "variety.com", "uri": "https://variety.com/review" } },
                    { "retrievedContext": { "uri": "gs://bucket/doc" } },
                    { "web": { "uri": "https://empire.example/dune" } }
                ]
            }
        }]
    }))?;

    let citations = Gemini::extract_citations(&parsed);

    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].title.as_deref(), Some("variety.com"));
    assert_eq!(citations[1].title, None);
    assert_eq!(citations[1].uri.as_deref(), Some("https://empire.example/dune"));
    Ok(())
}

#[test]
fn test_extractCitations_shouldUseFirstCandidateOnly() -> Result<()> {
    let parsed = response(json!({
        "candidates": [
            { "content": { "parts": [{ "text": "first" }] } },
            {
                "content": { "parts": [{ "text": "second" }] },
                "groundingMetadata": {
                    "groundingChunks": [{ "web": { "title": "t", "uri": "u" } }]
                }
            }
        ]
    }))?;

    assert!(Gemini::extract_citations(&parsed).is_empty());
    Ok(())
}

#[test]
fn test_generateUrl_shouldHandleTrailingSlashAndEmptyEndpoint() {
    assert_eq!(
        client("http://localhost:8080/").generate_url(),
        "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
    );
    assert_eq!(
        client("").generate_url(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
    );
}

#[test]
fn test_debugOutput_shouldNotExposeApiKey() {
    let gemini = client("");

    let debug = format!("{:?}", gemini);

    assert!(debug.contains("gemini-3-flash-preview"));
    assert!(!debug.contains("test-key"));
    assert_eq!(gemini.model(), "gemini-3-flash-preview");
}

#[tokio::test]
async fn test_complete_withUnreachableEndpoint_shouldReturnConnectionError() {
    let gemini = Gemini::new("test-key", "http://127.0.0.1:9", "gemini-3-flash-preview", Some(2));

    let result = gemini.complete(gemini.grounded_request("Dune", 0.7)).await;

    assert!(matches!(result, Err(cinescore::errors::ProviderError::ConnectionError(_))));
}
