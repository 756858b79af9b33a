use suicard::{
    CardError, PipelineState, RenderOptions, RenderPipeline, RenderRequest,
};

fn pipeline_with_seed(seed: u64) -> RenderPipeline {
    RenderPipeline::new(RenderOptions {
        seed: Some(seed),
        ..RenderOptions::default()
    })
    .unwrap()
}

#[test]
fn render_carries_phrase_verbatim_and_decodes_to_card_size() {
    let mut pipeline = pipeline_with_seed(42);
    let req = RenderRequest::new("best  friends").unwrap();
    let result = pipeline.render(&req).unwrap();

    assert_eq!(result.text, "best  friends");
    assert_eq!((result.width, result.height), (1200, 800));
    assert!(!result.png.is_empty());

    let decoded = image::load_from_memory(&result.png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1200, 800));
}

#[test]
fn fixed_seed_renders_are_byte_identical() {
    let mut pipeline = pipeline_with_seed(7);
    let req = RenderRequest::new("friends").unwrap();
    let first = pipeline.render(&req).unwrap();
    let second = pipeline.render(&req).unwrap();
    assert_eq!(first.png, second.png);
}

#[test]
fn unseeded_renders_still_produce_full_cards() {
    let mut pipeline = RenderPipeline::new(RenderOptions::default()).unwrap();
    let req = RenderRequest::new("friends").unwrap();
    let result = pipeline.render(&req).unwrap();
    assert_eq!(result.text, "friends");
    let decoded = image::load_from_memory(&result.png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1200, 800));
    assert_eq!(pipeline.state(), PipelineState::Idle);
}

#[test]
fn whitespace_phrases_never_reach_the_composer() {
    assert!(matches!(
        RenderRequest::new("   "),
        Err(CardError::Validation(_))
    ));
    assert!(matches!(RenderRequest::new(""), Err(CardError::Validation(_))));
}

#[test]
fn one_pipeline_serves_many_sequential_renders() {
    let mut pipeline = pipeline_with_seed(1);
    for phrase in ["one", "two", "three"] {
        let req = RenderRequest::new(phrase).unwrap();
        let result = pipeline.render(&req).unwrap();
        assert_eq!(result.text, phrase);
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }
}
