use super::*;
use crate::domain::ApiDocument;
use serde_json::{json, Value};

fn swagger(definitions: Value) -> ApiDocument {
    serde_json::from_value(json!({ "swagger": "2.0", "definitions": definitions })).unwrap()
}

fn seeded(seed: u64) -> GeneratorOptions {
    GeneratorOptions {
        seed: Some(seed),
        ..Default::default()
    }
}

fn generate_with(document: &ApiDocument, name: &str, ctx: &mut GenerationContext) -> Value {
    let resolver = SchemaResolver::for_document(document);
    let resolved = resolver.resolve_definition(name).unwrap();
    MockSynthesizer::new(&resolver, ctx)
        .item(resolved, name, 0)
        .unwrap()
}

fn generate(document: &ApiDocument, name: &str, options: GeneratorOptions) -> Value {
    let mut ctx = GenerationContext::new(options);
    generate_with(document, name, &mut ctx)
}

fn nested_levels() -> ApiDocument {
    swagger(json!({
        "Root": {
            "type": "object",
            "properties": {
                "level1": {
                    "type": "object",
                    "properties": {
                        "level2": {
                            "type": "object",
                            "properties": { "level3": { "type": "string" } }
                        }
                    }
                }
            }
        }
    }))
}

#[test]
fn test_depth_limit_truncates_nested_objects() {
    let document = nested_levels();

    let shallow = generate(
        &document,
        "Root",
        GeneratorOptions {
            max_depth: 1,
            ..seeded(1)
        },
    );
    assert_eq!(shallow["level1"]["level2"], json!({}));
    assert!(shallow["level1"]["level2"].get("level3").is_none());

    let deeper = generate(
        &document,
        "Root",
        GeneratorOptions {
            max_depth: 2,
            ..seeded(1)
        },
    );
    assert!(deeper["level1"]["level2"]["level3"].is_string());
}

#[test]
fn test_depth_limit_empties_nested_arrays() {
    let document = swagger(json!({
        "Tree": {
            "type": "object",
            "properties": {
                "child": {
                    "type": "object",
                    "properties": {
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    }));

    let record = generate(
        &document,
        "Tree",
        GeneratorOptions {
            max_depth: 1,
            ..seeded(2)
        },
    );
    assert_eq!(record["child"]["tags"], json!([]));
}

#[test]
fn test_foreign_keys_reuse_registered_identifiers() {
    let document = swagger(json!({
        "Author": {
            "type": "object",
            "properties": { "id": { "type": "string", "enum": ["a1"] } }
        },
        "Post": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "authorId": { "type": "string" },
                "editorId": { "type": "string", "format": "uuid" },
                "ownerId": { "type": "integer" }
            }
        },
        "Editor": {
            "type": "object",
            "properties": { "id": { "type": "string", "enum": ["e1"] } }
        },
        "Owner": {
            "type": "object",
            "properties": { "id": { "type": "string", "enum": ["o1"] } }
        }
    }));
    let mut ctx = GenerationContext::new(seeded(3));

    generate_with(&document, "Author", &mut ctx);
    generate_with(&document, "Editor", &mut ctx);
    generate_with(&document, "Owner", &mut ctx);
    let post = generate_with(&document, "Post", &mut ctx);

    assert_eq!(post["authorId"], json!("a1"));
    assert_ne!(post["editorId"], json!("e1"));
    assert!(uuid::Uuid::parse_str(post["editorId"].as_str().unwrap()).is_ok());
    assert!(post["ownerId"].is_i64());
    assert_eq!(ctx.registry().ids("Author"), &[json!("a1")]);
    assert_eq!(ctx.registry().ids("Post").len(), 1);
}

#[test]
fn test_foreign_key_without_registered_target_is_synthesized() {
    let document = swagger(json!({
        "Comment": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "threadId": { "type": "string" }
            }
        }
    }));

    let comment = generate(&document, "Comment", seeded(4));
    assert!(comment["threadId"].as_str().is_some_and(|s| !s.is_empty()));
}

#[test]
fn test_nested_reference_registers_under_definition_name() {
    let document = swagger(json!({
        "Address": {
            "type": "object",
            "properties": { "id": { "type": "string" }, "city": { "type": "string" } }
        },
        "Customer": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "address": { "$ref": "#/definitions/Address" }
            }
        }
    }));
    let mut ctx = GenerationContext::new(seeded(5));

    let customer = generate_with(&document, "Customer", &mut ctx);
    let address_id = customer["address"]["id"].clone();
    assert_eq!(ctx.registry().ids("Address"), &[address_id]);
}

#[test]
fn test_string_formats() {
    let document = swagger(json!({
        "Sample": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "ref": { "type": "string", "format": "uuid" },
                "createdAt": { "type": "string", "format": "date-time" },
                "day": { "type": "string", "format": "date" },
                "contact": { "type": "string", "format": "email" },
                "homepage": { "type": "string", "format": "uri" },
                "host": { "type": "string", "format": "ipv4" },
                "blob": { "type": "string", "format": "byte" },
                "secret": { "type": "string", "format": "password" },
                "note": { "type": "string", "format": "unheard-of" }
            }
        }
    }));

    let sample = generate(&document, "Sample", seeded(6));
    let text = |key: &str| sample[key].as_str().unwrap().to_string();

    assert!(uuid::Uuid::parse_str(&text("id")).is_ok());
    assert!(uuid::Uuid::parse_str(&text("ref")).is_ok());
    assert!(chrono::DateTime::parse_from_rfc3339(&text("createdAt")).is_ok());
    assert!(chrono::NaiveDate::parse_from_str(&text("day"), "%Y-%m-%d").is_ok());
    assert!(text("contact").contains('@'));
    assert!(text("homepage").starts_with("https://"));
    assert!(text("host").parse::<std::net::Ipv4Addr>().is_ok());
    assert!(!text("blob").is_empty());
    assert!((8..16).contains(&text("secret").len()));
    assert!(!text("note").is_empty());
}

#[test]
fn test_enum_values_are_respected() {
    let document = swagger(json!({
        "Light": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "state": { "type": "string", "enum": ["on", "off", "dimmed"] },
                "level": { "type": "integer", "enum": [1, 2, 3] }
            }
        }
    }));
    let mut ctx = GenerationContext::new(seeded(7));

    for _ in 0..20 {
        let light = generate_with(&document, "Light", &mut ctx);
        assert!(["on", "off", "dimmed"].contains(&light["state"].as_str().unwrap()));
        assert!([1, 2, 3].contains(&light["level"].as_i64().unwrap()));
    }
}

#[test]
fn test_numbers_respect_bounds_and_precision() {
    let document = swagger(json!({
        "Reading": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "count": { "type": "integer", "minimum": 10, "maximum": 20 },
                "open": { "type": "integer" },
                "price": { "type": "number", "format": "double", "minimum": 1, "maximum": 2, "multipleOf": 0.01 },
                "ratio": { "type": "number", "format": "float" }
            }
        }
    }));
    let mut ctx = GenerationContext::new(seeded(8));

    for _ in 0..50 {
        let reading = generate_with(&document, "Reading", &mut ctx);

        let count = reading["count"].as_i64().unwrap();
        assert!((10..=20).contains(&count));

        let open = reading["open"].as_i64().unwrap();
        assert!((0..=1000).contains(&open));

        let price = reading["price"].as_f64().unwrap();
        assert!((1.0..=2.0).contains(&price));
        assert!((price * 100.0 - (price * 100.0).round()).abs() < 1e-6);

        let ratio = reading["ratio"].as_f64().unwrap();
        assert!((0.0..=1000.0).contains(&ratio));
        assert!((ratio * 100.0 - (ratio * 100.0).round()).abs() < 1e-6);
    }
}

#[test]
fn test_numbers_stay_within_unusual_bounds() {
    let document = swagger(json!({
        "Sample": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "fraction": { "type": "integer", "minimum": 0.5, "maximum": 0.7 },
                "inverted": { "type": "integer", "minimum": 10, "maximum": 5 },
                "exact": { "type": "integer", "minimum": 3, "maximum": 3 },
                "tiny": { "type": "number", "format": "double", "minimum": 0.001, "maximum": 0.002 }
            }
        }
    }));
    let mut ctx = GenerationContext::new(seeded(3));

    for _ in 0..20 {
        let sample = generate_with(&document, "Sample", &mut ctx);

        let fraction = sample["fraction"].as_f64().unwrap();
        assert!((0.5..=0.7).contains(&fraction));

        let inverted = sample["inverted"].as_i64().unwrap();
        assert!((5..=10).contains(&inverted));

        assert_eq!(sample["exact"], json!(3));

        let tiny = sample["tiny"].as_f64().unwrap();
        assert!((0.001..=0.002).contains(&tiny));
    }
}

#[test]
fn test_arrays() {
    let document = swagger(json!({
        "Bag": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "tags": { "type": "array", "items": { "type": "string" } },
                "anything": { "type": "array", "items": {} },
                "bare": { "type": "array" }
            }
        }
    }));
    let mut ctx = GenerationContext::new(seeded(9));

    for _ in 0..20 {
        let bag = generate_with(&document, "Bag", &mut ctx);
        let tags = bag["tags"].as_array().unwrap();
        assert!((1..=3).contains(&tags.len()));
        assert!(tags.iter().all(Value::is_string));
        assert_eq!(bag["anything"], json!([]));
        assert_eq!(bag["bare"], json!([]));
    }

    let fixed = generate(
        &document,
        "Bag",
        GeneratorOptions {
            array_min_items: 2,
            array_max_items: 2,
            ..seeded(9)
        },
    );
    assert_eq!(fixed["tags"].as_array().unwrap().len(), 2);
}

#[test]
fn test_unsupported_shapes_fall_back() {
    let document = swagger(json!({
        "Odd": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "attachment": { "type": "file" },
                "untyped": { "description": "no type at all" },
                "meta": { "type": "object" },
                "flag": { "type": "boolean" }
            }
        },
        "Empty": { "type": "object" }
    }));

    let odd = generate(&document, "Odd", seeded(10));
    assert_eq!(odd["attachment"], Value::Null);
    assert_eq!(odd["untyped"], Value::Null);
    assert_eq!(odd["meta"], json!({}));
    assert!(odd["flag"].is_boolean());

    assert_eq!(generate(&document, "Empty", seeded(10)), json!({}));
}

#[test]
fn test_properties_without_type_are_objects() {
    let document = swagger(json!({
        "Loose": {
            "properties": {
                "id": { "type": "string" },
                "inner": { "properties": { "name": { "type": "string" } } }
            }
        }
    }));

    let loose = generate(&document, "Loose", seeded(11));
    assert!(loose["inner"]["name"].is_string());
}

#[test]
fn test_seed_makes_generation_repeatable() {
    let document = swagger(json!({
        "User": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" },
                "age": { "type": "integer", "minimum": 18, "maximum": 99 },
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        }
    }));

    let first = DatasetAssembler::new(GenerationContext::new(seeded(12)))
        .assemble_document(&document)
        .unwrap();
    let second = DatasetAssembler::new(GenerationContext::new(seeded(12)))
        .assemble_document(&document)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_cyclic_definition_fails_the_document() {
    let document = swagger(json!({
        "Loop": { "$ref": "#/definitions/Loop" }
    }));

    let err = DatasetAssembler::new(GenerationContext::new(seeded(13)))
        .assemble_document(&document)
        .unwrap_err();
    assert!(matches!(err, GenerationError::CyclicReference(_)));
}

#[test]
fn test_unresolvable_property_reference_fails_the_document() {
    let document = swagger(json!({
        "Order": {
            "type": "object",
            "properties": { "id": { "type": "string" }, "item": { "$ref": "#/definitions/Missing" } }
        }
    }));

    let err = DatasetAssembler::new(GenerationContext::new(seeded(14)))
        .assemble_document(&document)
        .unwrap_err();
    assert_eq!(err, GenerationError::SchemaNotFound("Missing".to_string()));
}
