use serde_json::{json, Value};
use triedex::{DocId, ErrorKind, FieldConfig, Index, IndexConfig, IndexKind, SearchHit};

fn news_docs() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Reading Railroad on sale",
            "body": "The popular Reading Railroad goes on the auction block.",
            "category": "news"
        }),
        json!({
            "id": 2,
            "title": "Mystery sale at Park Place apartments",
            "body": "Police responded today to a mysterious sign in the yard.",
            "category": "crime"
        }),
        json!({
            "id": 3,
            "title": "Tickets on sale for festival on the Boardwalk this weekend",
            "body": "Popular music and delicious food to be enjoyed by all.",
            "category": "events"
        }),
        json!({
            "id": 4,
            "title": "Special: I got out of jail for free!",
            "body": "Read about a life of crime in the Weekend journal.",
            "category": "crime"
        }),
    ]
}

fn news_index() -> Index {
    let config = IndexConfig::new()
        .with_field("title", FieldConfig::boosted(3.0))
        .with_field("body", FieldConfig::boosted(2.0))
        .with_default_field("category")
        .with_default_field("unused")
        .store_docs(true)
        .allow_partial(true);

    let mut index = Index::new(config).unwrap();
    let report = index.add_docs(&news_docs());
    assert!(report.is_clean());
    assert_eq!(report.indexed, 4);
    index
}

fn ids(hits: &[SearchHit]) -> Vec<String> {
    hits.iter().map(|hit| hit.id.to_string()).collect()
}

fn search_ids(index: &Index, query: Value) -> Vec<String> {
    ids(&index.search(&query).unwrap())
}

#[test]
fn simple_string_ranks_shorter_titles_first() {
    let index = news_index();
    let hits = index.search(&json!("sale")).unwrap();
    assert_eq!(ids(&hits), vec!["1", "2", "3"]);
    assert_eq!(hits[0].doc.as_ref(), Some(&news_docs()[0]));
}

#[test]
fn multi_term_scores_are_summed() {
    let index = news_index();
    let hits = index.search(&json!("mysterious sale")).unwrap();
    assert_eq!(ids(&hits), vec!["2", "1", "3"]);
    assert_eq!(hits[0].doc.as_ref(), Some(&news_docs()[1]));
}

#[test]
fn stemmed_query_matches_inflections() {
    let index = news_index();
    assert_eq!(search_ids(&index, json!("reading")), vec!["1", "4"]);
}

#[test]
fn partial_prefix_matches() {
    let index = news_index();
    assert_eq!(search_ids(&index, json!("spe")), vec!["4"]);
}

#[test]
fn all_fields_match() {
    let index = news_index();
    let query = json!({"must": {"match": {"_all": "weekend"}}});
    assert_eq!(search_ids(&index, query), vec!["3", "4"]);
}

#[test]
fn explicit_boost_overrides_field_boost() {
    let index = news_index();
    let query = json!({
        "must": {
            "match": {
                "title": {"query": "weekend", "boost": 1},
                "body": {"query": "weekend", "boost": 5}
            }
        }
    });
    assert_eq!(search_ids(&index, query), vec!["4", "3"]);
}

#[test]
fn zero_boost_falls_back_to_field_boost() {
    let index = news_index();
    let plain = index.search(&json!({"must": {"match": {"title": "weekend"}}})).unwrap();
    let zero = index
        .search(&json!({"must": {"match": {"title": {"query": "weekend", "boost": 0}}}}))
        .unwrap();
    assert_eq!(ids(&zero), vec!["3"]);
    assert_eq!(zero, plain);
    assert!(zero[0].score > 0.0);
}

#[test]
fn match_and_term_clauses_combine() {
    let index = news_index();
    let query = json!({
        "must": {
            "match": {"title": "sale"},
            "term": {"category": {"value": "crime", "boost": 3}}
        }
    });
    assert_eq!(search_ids(&index, query), vec!["2", "4", "1", "3"]);
}

#[test]
fn filter_restricts_without_rescoring() {
    let index = news_index();
    let must = json!({"must": {"match": {"_all": "weekend"}}});
    let filtered = json!({
        "must": {"match": {"_all": "weekend"}},
        "filter": {"term": {"category": "crime"}}
    });

    let unfiltered = index.search(&must).unwrap();
    let hits = index.search(&filtered).unwrap();
    assert_eq!(ids(&hits), vec!["4"]);

    let before = unfiltered.iter().find(|h| h.id == DocId::from(4)).unwrap();
    assert_eq!(hits[0].score, before.score);
}

#[test]
fn filter_is_intersection_of_must_results() {
    let index = news_index();
    let must = json!({"match": {"title": "sale"}});
    let filter = json!({"match": {"body": "popular"}});

    let plain: Vec<String> = search_ids(&index, json!({"must": must.clone()}));
    let as_must: Vec<String> = search_ids(&index, json!({"must": filter.clone()}));
    let combined = search_ids(&index, json!({"must": must, "filter": filter}));

    let expected: Vec<String> = plain.into_iter().filter(|id| as_must.contains(id)).collect();
    assert_eq!(combined, expected);
    assert_eq!(combined, vec!["1", "3"]);
}

#[test]
fn compound_and_filter_intersects_every_clause() {
    let index = news_index();
    let query = json!({
        "must": {"match": {"_all": "sale"}},
        "filter": {"and": [
            {"match": {"body": "popular"}},
            {"term": {"category": "events"}}
        ]}
    });
    assert_eq!(search_ids(&index, query), vec!["3"]);

    let array_form = json!({
        "must": {"match": {"_all": "sale"}},
        "filter": [
            {"match": {"body": "popular"}},
            {"term": {"category": "events"}}
        ]
    });
    assert_eq!(search_ids(&index, array_form), vec!["3"]);
}

#[test]
fn clauses_within_one_filter_object_are_unioned() {
    let index = news_index();
    let query = json!({
        "must": {"match": {"_all": "sale"}},
        "filter": {
            "match": {"body": "popular"},
            "term": {"category": "crime"}
        }
    });
    assert_eq!(search_ids(&index, query), vec!["1", "2", "3"]);

    let split = json!({
        "must": {"match": {"_all": "sale"}},
        "filter": [
            {"match": {"body": "popular"}},
            {"term": {"category": "crime"}}
        ]
    });
    assert!(index.search(&split).unwrap().is_empty());
}

#[test]
fn unknown_filter_operator_fails_the_search() {
    let index = news_index();
    let err = index
        .search(&json!({"must": {"match": {"_all": "sale"}}, "filter": {"or": []}}))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFilterSyntax);
}

#[test]
fn filter_without_must_returns_nothing() {
    let index = news_index();
    let query = json!({"filter": {"term": {"category": "crime"}}});
    assert!(index.search(&query).unwrap().is_empty());
}

#[test]
fn match_all_with_filter() {
    let index = news_index();
    let query = json!({"matchAll": true, "filter": {"term": {"category": "crime"}}});
    assert_eq!(search_ids(&index, query), vec!["2", "4"]);
}

#[test]
fn unknown_terms_and_fields_match_nothing() {
    let index = news_index();
    assert!(index.search(&json!("zzz")).unwrap().is_empty());
    assert!(index.search(&json!({"must": {"match": {"missing": "sale"}}})).unwrap().is_empty());
    assert!(index.search(&json!("...")).unwrap().is_empty());
}

#[test]
fn limit_keeps_the_best_hits() {
    let index = news_index();
    let hits = index.search_with_limit(&json!("sale"), 2).unwrap();
    assert_eq!(ids(&hits), vec!["1", "2"]);
}

#[test]
fn title_only_scenario() {
    let config = IndexConfig::new().with_field("title", FieldConfig::boosted(1.0));
    let mut index = Index::new(config).unwrap();
    index.add_docs(&[
        json!({"id": 1, "title": "Reading Railroad on sale"}),
        json!({"id": 2, "title": "Mystery sale at Park Place apartments"}),
        json!({"id": 3, "title": "Tickets on sale for festival"}),
    ]);

    let hits = index.search(&json!("sale")).unwrap();
    let mut found = ids(&hits);
    found.sort();
    assert_eq!(found, vec!["1", "2", "3"]);
    assert!(hits.iter().all(|h| h.score > 0.0));
    assert!(hits.iter().all(|h| h.doc.is_none()));
    assert!(index.search(&json!("zzz")).unwrap().is_empty());
}

#[test]
fn partial_scenario_on_single_doc() {
    let config = IndexConfig::new()
        .with_field("title", FieldConfig::boosted(1.0))
        .allow_partial(true);
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 4, "title": "Special offer"})).unwrap();

    assert_eq!(search_ids(&index, json!("spe")), vec!["4"]);
}

#[test]
fn prefixes_are_not_indexed_by_default() {
    let config = IndexConfig::new().with_field("title", FieldConfig::boosted(1.0));
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 4, "title": "Special offer"})).unwrap();
    assert!(index.search(&json!("spe")).unwrap().is_empty());
}

#[test]
fn keyword_term_matches_exact_values_only() {
    let config = IndexConfig::new()
        .with_field("title", FieldConfig::default())
        .with_field("tag", FieldConfig::keyword());
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "x", "tag": "Running"})).unwrap();
    index.add_doc(&json!({"id": 2, "title": "y", "tag": "run"})).unwrap();

    let exact = json!({"must": {"term": {"tag": "RUNNING"}}});
    assert_eq!(search_ids(&index, exact), vec!["1"]);

    let stem = json!({"must": {"term": {"tag": "run"}}});
    assert_eq!(search_ids(&index, stem), vec!["2"]);

    // Keyword fields have no tokenized entries to match against.
    let fuzzy = json!({"must": {"match": {"tag": "running"}}});
    assert!(index.search(&fuzzy).unwrap().is_empty());
}

#[test]
fn stopwords_option_applies_to_both_pipelines() {
    let config = IndexConfig::new()
        .with_field("title", FieldConfig::default())
        .stopwords(true);
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "the railroad"})).unwrap();

    assert!(index.get_node("title", "the", IndexKind::Tokenized).is_none());
    assert!(index.get_node("title", "the", IndexKind::Raw).is_none());
    assert_eq!(index.get_doc(&DocId::from(1)).unwrap().field_size("title"), 1);
}

#[test]
fn ties_break_by_id() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default());
    let mut index = Index::new(config).unwrap();
    for id in [10u64, 2, 7] {
        index.add_doc(&json!({"id": id, "title": "same words"})).unwrap();
    }
    index.add_doc(&json!({"id": "b", "title": "same words"})).unwrap();
    index.add_doc(&json!({"id": "a", "title": "same words"})).unwrap();

    assert_eq!(search_ids(&index, json!("same")), vec!["2", "7", "10", "a", "b"]);
}

#[test]
fn replacing_a_document_reindexes_it() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default());
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "old railroad"})).unwrap();
    index.add_doc(&json!({"id": 2, "title": "railroad"})).unwrap();
    index.add_doc(&json!({"id": 1, "title": "new auction"})).unwrap();

    assert_eq!(index.doc_count(), 2);
    assert!(index.search(&json!("old")).unwrap().is_empty());
    assert_eq!(search_ids(&index, json!("auction")), vec!["1"]);
    assert_eq!(search_ids(&index, json!("railroad")), vec!["2"]);

    let node = index.get_node("title", "railroad", IndexKind::Tokenized).unwrap();
    assert_eq!(node.df, 1);
    assert_eq!(node.df, node.docs.len());
}

#[test]
fn replacement_with_colliding_checksum_is_reindexed() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default());
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "plumless"})).unwrap();
    index.add_doc(&json!({"id": 1, "title": "buckeroo"})).unwrap();

    assert_eq!(index.doc_count(), 1);
    assert!(index.search(&json!("plumless")).unwrap().is_empty());
    assert_eq!(search_ids(&index, json!("buckeroo")), vec!["1"]);
}

#[test]
fn identical_re_add_is_a_no_op() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default());
    let mut index = Index::new(config).unwrap();
    let doc = json!({"id": 1, "title": "Reading Railroad"});
    index.add_doc(&doc).unwrap();
    let before = index.serialize().unwrap();

    index.add_doc(&doc).unwrap();
    assert_eq!(index.serialize().unwrap(), before);
}

#[test]
fn removal_deletes_every_trace() {
    let config = IndexConfig::new()
        .with_field("title", FieldConfig::default())
        .allow_partial(true);
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "railroad"})).unwrap();
    index.add_doc(&json!({"id": 2, "title": "rail"})).unwrap();

    assert!(index.remove_doc(&DocId::from(1)));
    assert!(!index.contains_doc(&DocId::from(1)));
    assert!(index.get_node("title", "railroad", IndexKind::Tokenized).is_none());
    assert!(index.get_node("title", "railroad", IndexKind::Raw).is_none());

    let rail = index.get_node("title", "rail", IndexKind::Tokenized).unwrap();
    assert_eq!(rail.df, 1);
    assert!(!rail.contains_doc(&DocId::from(1)));
    assert_eq!(search_ids(&index, json!("rai")), vec!["2"]);
}

#[test]
fn numeric_and_string_ids_are_the_same_document() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default());
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "first"})).unwrap();
    index.add_doc(&json!({"id": "1", "title": "second"})).unwrap();

    assert_eq!(index.doc_count(), 1);
    assert!(index.search(&json!("first")).unwrap().is_empty());
}

#[test]
fn scalar_field_values_are_indexed_as_text() {
    let config = IndexConfig::new()
        .with_default_field("age")
        .with_default_field("tags")
        .with_default_field("meta");
    let mut index = Index::new(config).unwrap();
    index
        .add_doc(&json!({"id": 1, "age": 42, "tags": ["alpha", "beta"], "meta": {"x": 1}}))
        .unwrap();
    index.add_doc(&json!({"id": 2, "age": null, "tags": []})).unwrap();

    assert_eq!(search_ids(&index, json!("42")), vec!["1"]);
    assert_eq!(search_ids(&index, json!("beta")), vec!["1"]);
    assert_eq!(index.get_doc(&DocId::from(2)).unwrap().field_size("age"), 0);
}

#[test]
fn missing_id_does_not_touch_other_documents() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default());
    let mut index = Index::new(config).unwrap();
    index.add_doc(&json!({"id": 1, "title": "sale"})).unwrap();

    for doc in [json!({"title": "x"}), json!({"id": 0, "title": "x"}), json!({"id": "", "title": "x"})] {
        let err = index.add_doc(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingId);
    }
    assert_eq!(index.doc_count(), 1);
    assert_eq!(search_ids(&index, json!("sale")), vec!["1"]);
}

#[test]
fn unsupported_analyzer_fails_at_indexing_time() {
    let config = IndexConfig::new().with_field("title", FieldConfig::default().with_analyzer("whitespace"));
    let mut index = Index::new(config).unwrap();
    let err = index.add_doc(&json!({"id": 1, "title": "sale"})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAnalyzer);
    assert_eq!(index.doc_count(), 0);
}

#[test]
fn stats_track_document_lifecycle() {
    let mut index = news_index();
    let stats = index.stats();
    assert_eq!(stats.doc_count, 4);
    assert_eq!(stats.tokenized_fields, 3);
    assert!(stats.tokenized_terms > 0);
    assert!(stats.raw_nodes >= stats.raw_terms);

    for id in 1..=4u64 {
        assert!(index.remove_doc(&DocId::from(id)));
    }
    let empty = index.stats();
    assert!(empty.is_empty());
    assert_eq!(empty.tokenized_terms, 0);
    assert_eq!(empty.raw_terms, 0);
}
