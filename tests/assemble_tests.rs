//! Integration tests for building definitions from parsed documents.

use qualified_config::definition::{
    ConfigValue, DefinitionAssembler, QualifierSchema, ReservedKeys, assemble,
};
use qualified_config::error::{DefinitionError, ErrorCode};
use serde_json::{Map, Value, json};

fn timeout_document() -> Value {
    json!({
        "name": "request.timeout",
        "schema": ["env", "region"],
        "values": [
            { "value": "10" },
            { "value": "20", "qualifiers": { "region": ["eu", "us"] } },
            { "value": "25", "qualifiers": { "region": "eu" } },
            { "value": "30", "qualifiers": { "env": "prod" } },
            { "value": "40", "qualifiers": { "env": ["prod"], "region": ["us"] } }
        ],
        "description": "HTTP request timeout in seconds",
        "owner": "platform"
    })
}

fn payloads(values: &[ConfigValue]) -> Vec<&str> {
    values.iter().map(ConfigValue::value).collect()
}

#[test]
fn orders_by_specificity() {
    let def = DefinitionAssembler::default()
        .from_document(&timeout_document())
        .unwrap();

    // env+region, env, region (by payload), bare
    assert_eq!(payloads(def.values()), vec!["40", "30", "20", "25", "10"]);
    assert_eq!(def.most_specific().value(), "40");
}

#[test]
fn metadata_excludes_reserved_keys() {
    let def = DefinitionAssembler::default()
        .from_document(&timeout_document())
        .unwrap();

    let keys: Vec<&str> = def.metadata().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["description", "owner"]);
    assert_eq!(def.metadata_value("owner"), Some("platform"));
}

#[test]
fn assembling_twice_is_idempotent() {
    let assembler = DefinitionAssembler::default();
    let first = assembler.from_document(&timeout_document()).unwrap();
    let second = assembler.from_document(&timeout_document()).unwrap();
    assert_eq!(first, second);
    assert_eq!(payloads(first.values()), payloads(second.values()));
}

#[test]
fn first_inserted_duplicate_is_kept() {
    let doc = json!({
        "name": "dup",
        "schema": ["region"],
        "values": [
            { "value": "a", "qualifiers": { "region": ["us", "eu"] } },
            { "value": "a", "qualifiers": { "region": ["eu", "us", "eu"] } }
        ]
    });
    let def = DefinitionAssembler::default().from_document(&doc).unwrap();
    assert_eq!(def.len(), 1);
}

#[test]
fn undeclared_qualifier_is_rejected() {
    let values = vec![ConfigValue::new("a").with_qualifier("region", ["eu"])];
    let err = assemble(
        "x",
        &Map::new(),
        Some(values),
        Some(QualifierSchema::new(["env"])),
    )
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::UndeclaredQualifier);
    match err {
        DefinitionError::UndeclaredQualifier { fields, candidates } => {
            assert_eq!(fields, vec!["region".to_string()]);
            assert_eq!(candidates.len(), 1);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn empty_candidate_list_is_rejected() {
    for values in [None, Some(Vec::new())] {
        let err = assemble("x", &Map::new(), values, Some(QualifierSchema::new(["env"])))
            .unwrap_err();
        assert_eq!(err, DefinitionError::EmptyCandidateSet);
    }

    let doc = json!({ "name": "x", "schema": ["env"], "values": [] });
    let err = DefinitionAssembler::default().from_document(&doc).unwrap_err();
    assert_eq!(err, DefinitionError::EmptyCandidateSet);
}

#[test]
fn qualifiers_without_schema_are_rejected() {
    let doc = json!({
        "name": "x",
        "values": [{ "value": "a", "qualifiers": { "env": "prod" } }]
    });
    let err = DefinitionAssembler::default().from_document(&doc).unwrap_err();
    assert_eq!(
        err,
        DefinitionError::MissingSchema {
            fields: vec!["env".to_string()]
        }
    );
}

#[test]
fn unqualified_definition_needs_no_schema() {
    let doc = json!({ "name": "x", "values": [{ "value": "b" }, { "value": "a" }] });
    let def = DefinitionAssembler::default().from_document(&doc).unwrap();
    assert!(def.schema().is_none());
    assert_eq!(payloads(def.values()), vec!["a", "b"]);
}

#[test]
fn custom_reserved_keys() {
    let keys = ReservedKeys {
        name: "config".into(),
        schema: "configCondition".into(),
        values: "values".into(),
    };
    let doc = json!({
        "config": "feature.flag",
        "configCondition": ["env"],
        "values": [
            { "value": "off" },
            { "value": "on", "qualifiers": { "env": "dev" } }
        ],
        "schema": "not reserved here"
    });

    let def = DefinitionAssembler::new(keys).from_document(&doc).unwrap();
    assert_eq!(def.name(), "feature.flag");
    assert_eq!(def.most_specific().value(), "on");
    assert_eq!(def.metadata_value("schema"), Some("not reserved here"));
}

#[test]
fn yaml_numeric_scalars_are_accepted() {
    let doc: Value = serde_yaml::from_str(
        "name: retries\nschema: [tier]\nvalues:\n  - value: 3\n  - value: 5\n    qualifiers:\n      tier: [1, 2]\n",
    )
    .unwrap();

    let def = DefinitionAssembler::default().from_document(&doc).unwrap();
    assert_eq!(payloads(def.values()), vec!["5", "3"]);
    let tier: Vec<&str> = def.values()[0]
        .qualifier("tier")
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(tier, vec!["1", "2"]);
}
