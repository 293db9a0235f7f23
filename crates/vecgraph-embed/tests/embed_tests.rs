use vecgraph_core::traits::Embedder;
use vecgraph_embed::HashingEmbedder;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[test]
fn embed_is_deterministic_and_normalized() {
    let e = HashingEmbedder::new(64);
    let a = e.embed("Python is a high-level programming language").expect("embed");
    let b = e.embed("Python is a high-level programming language").expect("embed");
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-4, "expected unit norm, got {norm}");
}

#[test]
fn token_overlap_drives_similarity() {
    let e = HashingEmbedder::new(128);
    let query = e.embed("Python programming").expect("embed");
    let python_doc = e
        .embed("Python is a high-level programming language known for its readability.")
        .expect("embed");
    let js_doc = e
        .embed("JavaScript runs in browsers and powers the web.")
        .expect("embed");

    let s_python = cosine(&query, &python_doc);
    let s_js = cosine(&query, &js_doc);
    assert!(
        s_python > s_js,
        "shared tokens must rank higher: python={s_python} js={s_js}"
    );
}

#[test]
fn tokenization_is_case_and_punctuation_insensitive() {
    let e = HashingEmbedder::new(64);
    let a = e.embed("Neural networks!").expect("embed");
    let b = e.embed("neural NETWORKS").expect("embed");
    assert!(cosine(&a, &b) > 0.999);
}

#[test]
fn empty_text_is_rejected() {
    let e = HashingEmbedder::new(64);
    assert!(e.embed("   ").is_err());
}

#[test]
fn default_embedder_respects_env_dim() {
    std::env::set_var("VECGRAPH_EMBED_DIM", "32");
    let e = vecgraph_embed::get_default_embedder().expect("default embedder");
    assert_eq!(e.dim(), 32);
    std::env::remove_var("VECGRAPH_EMBED_DIM");
}
