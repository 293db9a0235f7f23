use std::collections::{HashMap, HashSet};

use vecgraph_core::types::{Properties, PropertyValue, TOPIC_LABEL};
use vecgraph_embed::HashingEmbedder;
use vecgraph_graph::MemoryGraphStore;
use vecgraph_hybrid::HybridSearchEngine;
use vecgraph_vector::MemoryVectorStore;

const DIM: usize = 128;

const PYTHON_DOC: &str =
    "Python is a high-level programming language known for its readability and versatility.";
const JS_DOC: &str = "JavaScript is primarily used for web development and runs in browsers.";

fn engine() -> HybridSearchEngine<MemoryVectorStore, MemoryGraphStore> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    HybridSearchEngine::new(
        Box::new(HashingEmbedder::new(DIM)),
        MemoryVectorStore::new(DIM),
        MemoryGraphStore::new(),
    )
}

fn named(name: &str) -> Properties {
    let mut p: Properties = HashMap::new();
    p.insert("name".into(), name.into());
    p
}

async fn ingest_scenario(
    engine: &HybridSearchEngine<MemoryVectorStore, MemoryGraphStore>,
) -> anyhow::Result<()> {
    let docs: [(&str, &str, &[&str]); 2] = [
        (PYTHON_DOC, "Python Introduction", &["Python"]),
        (JS_DOC, "JavaScript Basics", &["JavaScript", "Web Development"]),
    ];
    for (text, name, topics) in docs {
        engine.add_document(text, named(name)).await?;
        for topic in topics {
            engine.get_or_create_topic(topic).await?;
            assert!(engine.connect_document_to_topic(name, topic).await?);
        }
    }
    Ok(())
}

#[tokio::test]
async fn end_to_end_python_query() -> anyhow::Result<()> {
    let engine = engine();
    ingest_scenario(&engine).await?;

    let results = engine.search("Python programming", 1).await?;
    assert_eq!(results.len(), 1);
    let top = &results[0];
    assert_eq!(top.document, "Python Introduction");
    assert_eq!(top.content, PYTHON_DOC);
    assert!(top.topics.contains(&"Python".to_string()));
    Ok(())
}

#[tokio::test]
async fn ingested_documents_agree_across_stores() -> anyhow::Result<()> {
    let engine = engine();
    let (vector_id, node) = engine.add_document(PYTHON_DOC, named("Python Introduction")).await?;

    // Identity map points at a graph node whose content is the ingested text.
    let mapped = engine.identity().node_for(vector_id).expect("mapping recorded");
    assert_eq!(mapped, node.id);
    let stored = engine.graph().get_node(mapped).expect("node exists");
    assert_eq!(stored.content(), Some(PYTHON_DOC));
    assert_eq!(
        stored.properties.get("vector_id").and_then(PropertyValue::as_i64),
        Some(vector_id)
    );
    Ok(())
}

#[tokio::test]
async fn default_name_is_derived_from_vector_id() -> anyhow::Result<()> {
    let engine = engine();
    let (vector_id, node) = engine.add_document("unnamed document text", HashMap::new()).await?;
    assert_eq!(node.name(), Some(format!("Document-{vector_id}").as_str()));
    Ok(())
}

#[tokio::test]
async fn empty_text_is_rejected_before_any_write() {
    let engine = engine();
    let err = engine.add_document("   \n", HashMap::new()).await.unwrap_err();
    assert!(matches!(err, vecgraph_core::Error::InvalidInput(_)));
    assert!(engine.identity().is_empty());
}

#[tokio::test]
async fn unenriched_search_bounds_and_order() -> anyhow::Result<()> {
    let engine = engine();
    ingest_scenario(&engine).await?;

    let hits = engine.search_unenriched("Python programming", 2).await?;
    assert!(hits.len() <= 2);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(hits[0].text, PYTHON_DOC);
    Ok(())
}

#[tokio::test]
async fn enriched_is_subsequence_of_unenriched() -> anyhow::Result<()> {
    // One record lives only in the vector store (no graph node, no mapping):
    // a consistency gap. It must be silently dropped, never an error.
    let vector = MemoryVectorStore::new(DIM);
    {
        use vecgraph_core::traits::{Embedder, VectorStore};
        let embedder = HashingEmbedder::new(DIM);
        let orphan = "Rust is a systems programming language focused on safety.";
        vector.insert(embedder.embed(orphan)?, orphan).await?;
    }
    let engine = HybridSearchEngine::new(
        Box::new(HashingEmbedder::new(DIM)),
        vector,
        MemoryGraphStore::new(),
    );
    ingest_scenario(&engine).await?;

    let unenriched = engine.search_unenriched("Python programming language", 3).await?;
    let enriched = engine.search("Python programming language", 3).await?;

    assert!(enriched.len() < unenriched.len(), "orphan hit must be dropped");
    // Same relative order: walk the unenriched list and consume enriched.
    let mut remaining = enriched.iter().peekable();
    for hit in &unenriched {
        if remaining.peek().is_some_and(|r| r.content == hit.text) {
            remaining.next();
        }
    }
    assert!(remaining.peek().is_none(), "enriched output is not a subsequence");
    Ok(())
}

#[tokio::test]
async fn topic_get_or_create_is_idempotent() -> anyhow::Result<()> {
    let engine = engine();
    let first = engine.get_or_create_topic("Machine Learning").await?;
    let second = engine.get_or_create_topic("Machine Learning").await?;
    assert_eq!(first.id, second.id);
    assert_eq!(engine.graph().count_nodes_with_label(TOPIC_LABEL), 1);
    Ok(())
}

#[tokio::test]
async fn connect_returns_false_when_endpoint_missing() -> anyhow::Result<()> {
    let engine = engine();
    engine.add_document(PYTHON_DOC, named("Python Introduction")).await?;
    engine.get_or_create_topic("Python").await?;

    assert!(!engine.connect_document_to_topic("No Such Doc", "Python").await?);
    assert!(!engine.connect_document_to_topic("Python Introduction", "No Such Topic").await?);
    assert_eq!(engine.graph().stats().edge_count, 0);

    assert!(engine.connect_document_to_topic("Python Introduction", "Python").await?);
    assert_eq!(engine.graph().stats().edge_count, 1);
    Ok(())
}

#[tokio::test]
async fn custom_relationship_type_is_honored() -> anyhow::Result<()> {
    let engine = engine();
    let (_, node) = engine.add_document(PYTHON_DOC, named("Python Introduction")).await?;
    engine.get_or_create_topic("Python").await?;
    assert!(
        engine
            .connect_document_to_topic_with("Python Introduction", "Python", "REFERENCES")
            .await?
    );
    let related = engine.graph().related_entities(node.id, Some("REFERENCES"))?;
    assert_eq!(related.len(), 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_texts_ingest_and_search_without_error() -> anyhow::Result<()> {
    let engine = engine();
    let text = "Identical content shared by two distinct documents.";
    let (vid_a, node_a) = engine.add_document(text, named("Copy A")).await?;
    let (vid_b, node_b) = engine.add_document(text, named("Copy B")).await?;
    assert_ne!(vid_a, vid_b);
    assert_ne!(node_a.id, node_b.id);

    let results = engine.search("identical shared content", 2).await?;
    assert_eq!(results.len(), 2);
    // Identity-map join routes each hit to its own node even though the
    // content text collides.
    let names: HashSet<&str> = results.iter().map(|r| r.document.as_str()).collect();
    assert_eq!(names, HashSet::from(["Copy A", "Copy B"]));
    Ok(())
}

#[tokio::test]
async fn related_documents_surface_through_shared_topics() -> anyhow::Result<()> {
    let engine = engine();
    let ml_doc = "Machine learning models learn patterns from data without explicit programming.";
    let nn_doc = "Neural networks consist of layers of interconnected nodes or neurons.";
    engine.add_document(ml_doc, named("ML Fundamentals")).await?;
    engine.add_document(nn_doc, named("Neural Network Architecture")).await?;
    for (doc, topic) in [
        ("ML Fundamentals", "Machine Learning"),
        ("Neural Network Architecture", "Machine Learning"),
    ] {
        engine.get_or_create_topic(topic).await?;
        assert!(engine.connect_document_to_topic(doc, topic).await?);
    }

    // top_k=1 keeps the sibling out of the hit set, so it must come back as
    // a related document instead.
    let results = engine.search("machine learning patterns data", 1).await?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document, "ML Fundamentals");
    assert!(results[0].related_documents.contains(&nn_doc.to_string()));
    Ok(())
}

#[tokio::test]
async fn search_on_empty_engine_returns_nothing() -> anyhow::Result<()> {
    let engine = engine();
    assert!(engine.search("anything at all", 3).await?.is_empty());
    Ok(())
}
