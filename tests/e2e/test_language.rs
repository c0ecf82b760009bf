use crate::e2e::helpers;

use helpers::{TestContext, DEFAULT_LANGUAGE, DE_SPEAKERS};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_registry_ids(ctx: &TestContext) {
    let response = ctx.client.get("/tts/language").await.unwrap();

    response.assert_status(StatusCode::OK);

    let languages: Vec<String> = response.json().unwrap();
    assert_eq!(languages, vec!["v3_de.pt", "v3_en.pt"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_language(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts/language", &json!({ "id": "v3_xx.pt" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("v3_xx.pt not in");

    let ready = ctx.client.get("/health/ready").await.unwrap();
    assert_eq!(ready.body.as_ref().unwrap()["model"], DEFAULT_LANGUAGE);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_switch_active_model(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts/language", &json!({ "id": "v3_de.pt" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(ctx.models_path.join("v3_de.pt").is_file());

    let speakers: Vec<Value> = ctx.client.get("/tts/speakers").await.unwrap().json().unwrap();
    let names: Vec<&str> = speakers.iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, DE_SPEAKERS);

    let ready = ctx.client.get("/health/ready").await.unwrap();
    assert_eq!(ready.body.as_ref().unwrap()["model"], "v3_de.pt");

    let response = ctx
        .client
        .post("/tts/generate", &json!({ "speaker": "eva_k", "text": "Hallo" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
}
