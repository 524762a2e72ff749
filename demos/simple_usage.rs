/// Complete triedex API Demo
///
/// Demonstrates the main index operations:
/// - Adding, replacing and removing documents
/// - Search (simple, field-specific, term, filtered, prefix)
/// - Snapshots
/// - Statistics

use serde_json::json;
use triedex::{DocId, FieldConfig, Index, IndexConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║        triedex - Complete API Demo            ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Create index
    println!("Creating index...");
    let config = IndexConfig::new()
        .with_field("title", FieldConfig::boosted(3.0))
        .with_field("body", FieldConfig::boosted(2.0))
        .with_field("category", FieldConfig::keyword())
        .store_docs(true)
        .allow_partial(true);
    let mut index = Index::new(config)?;
    println!("Done!\n");

    // Step 2: INSERT - Add documents
    println!("Step 2: INSERT - Adding documents...");
    let report = index.add_docs(&[
        json!({"id": 1, "title": "Rust Programming", "body": "Learn the Rust language", "category": "books"}),
        json!({"id": 2, "title": "Database Systems", "body": "SQL and NoSQL databases", "category": "books"}),
        json!({"id": 3, "title": "Web Development", "body": "Building web apps in Rust", "category": "courses"}),
        json!({"title": "No id here"}),
    ]);
    println!("  Indexed {} documents, {} rejected\n", report.indexed, report.failed.len());

    // Step 3: SEARCH - Different query types
    println!("Step 3: SEARCH - Querying documents...");
    let queries = [
        ("'rust'", json!("rust")),
        ("title:database", json!({"must": {"match": {"title": "database"}}})),
        ("term category=books", json!({"must": {"term": {"category": "books"}}})),
        ("'rust' filtered to courses", json!({
            "must": {"match": {"_all": "rust"}},
            "filter": {"term": {"category": "courses"}}
        })),
        ("prefix 'prog'", json!("prog")),
    ];
    for (label, query) in queries.iter() {
        let hits = index.search(query)?;
        let ids: Vec<String> = hits.iter().map(|h| format!("{} ({:.3})", h.id, h.score)).collect();
        println!("  {}: {}", label, ids.join(", "));
    }
    println!();

    // Step 4: UPDATE / DELETE
    println!("Step 4: UPDATE / DELETE...");
    index.add_doc(&json!({"id": 2, "title": "Distributed Systems", "body": "Consensus and replication"}))?;
    index.remove_doc(&DocId::from(3));
    println!("  {} documents live\n", index.doc_count());

    // Step 5: SNAPSHOT
    println!("Step 5: SNAPSHOT...");
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("index.json");
    index.save_snapshot(&path)?;
    let restored = Index::open_snapshot(&path, IndexConfig::new())?;
    println!("  Restored {} documents from {}\n", restored.doc_count(), path.display());

    // Step 6: STATS
    let stats = restored.stats();
    println!("Step 6: STATS");
    println!("  docs: {}", stats.doc_count);
    println!("  tokenized: {} fields, {} terms, {} nodes", stats.tokenized_fields, stats.tokenized_terms, stats.tokenized_nodes);
    println!("  raw: {} fields, {} terms, {} nodes", stats.raw_fields, stats.raw_terms, stats.raw_nodes);

    Ok(())
}
