use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

/// Arrow schema of the document table: store-assigned integer id, the text
/// payload, and the embedding as a fixed-size float list.
pub fn build_document_schema(dim: i32) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("content", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim),
            true,
        ),
    ]))
}
