use crate::e2e::helpers;

use helpers::fixtures::{decode_wav, file_names};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_samples_at_startup(ctx: &TestContext) {
    assert_eq!(file_names(&ctx.samples_path), vec!["en_0.wav", "en_1.wav"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_sample_for_speaker(ctx: &TestContext) {
    let response = ctx.client.get("/tts/sample?speaker=en_1").await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");

    let (_, samples) = decode_wav(&response.body_bytes);
    assert_eq!(samples.len(), "Sample phrase".len());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_missing_sample(ctx: &TestContext) {
    let response = ctx.client.get("/tts/sample?speaker=nobody").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("no sample for speaker nobody");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_samples_statically(ctx: &TestContext) {
    let response = ctx.client.get("/samples/en_0.wav").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body_bytes,
        std::fs::read(ctx.samples_path.join("en_0.wav")).unwrap()
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_regenerate_samples_with_new_text(ctx: &TestContext) {
    std::fs::write(ctx.samples_path.join("stale.wav"), b"old").unwrap();

    let response = ctx
        .client
        .post_empty("/tts/generate-samples?sample_text=Brand%20new%20words")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "Generated samples");

    assert_eq!(file_names(&ctx.samples_path), vec!["en_0.wav", "en_1.wav"]);

    let sample = std::fs::read(ctx.samples_path.join("en_0.wav")).unwrap();
    let (_, samples) = decode_wav(&sample);
    assert_eq!(samples.len(), "Brand new words".len());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_sample_text_when_none_given(ctx: &TestContext) {
    let response = ctx.client.post_empty("/tts/generate-samples").await.unwrap();
    response.assert_status(StatusCode::OK);

    let sample = std::fs::read(ctx.samples_path.join("en_1.wav")).unwrap();
    let (_, samples) = decode_wav(&sample);
    assert_eq!(samples.len(), "Sample phrase".len());
}
