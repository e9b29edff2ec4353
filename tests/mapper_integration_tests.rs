//! End-to-end mapping scenarios through the public API.

mod common;

use automap_core::error::{HydrationError, MappingError};
use automap_core::input::Input;
use automap_core::mapping::{Condition, MappingOrigin, PropertyMapping, TypeDescriptor};
use automap_core::transform::{CollectionTransformer, DateTimeTransformer, FnTransformer};
use automap_core::{Mapper, MapperConfig};
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;

#[test]
fn test_snake_case_source_to_camel_case_destination() {
    let mapper = mapper_with([TypeDescriptor::builder("Person")
        .properties(["firstName", "lastName"])
        .build()]);

    let input = json_input(json!({"first_name": "Ada", "last_name": "Lovelace"}));
    let person = mapper.map(&input, "Person").unwrap();
    assert_eq!(person.to_value(), json!({"firstName": "Ada", "lastName": "Lovelace"}));

    let configuration = mapper.resolve_configuration(&input, "Person").unwrap();
    for (_, resolved) in configuration.iter() {
        assert_eq!(resolved.origin, MappingOrigin::Convention);
    }
}

#[test]
fn test_resolution_is_idempotent_and_cached() {
    let mapper = mapper_with([person_dto()]);
    let input = Input::object(ada());

    let first = mapper.resolve_configuration(&input, "PersonDto").unwrap();
    let second = mapper.resolve_configuration(&input, "PersonDto").unwrap();
    assert_eq!(*first, *second);
    assert_eq!(mapper.cache().stats().hits, 1);

    let a = mapper.map(&input, "PersonDto").unwrap();
    let b = mapper.map(&input, "PersonDto").unwrap();
    assert_eq!(a, b);
    assert_eq!(mapper.cache().stats().cache_keys, vec!["Person -> PersonDto"]);
}

#[test]
fn test_object_chain_merges_accessor_enrichment() {
    let mapper = mapper_with([TypeDescriptor::builder("Pair").properties(["a", "b"]).build()]);
    let pair = mapper.map(&Input::object(FieldsAndAccessor), "Pair").unwrap();
    assert_eq!(pair.to_value(), json!({"a": 1, "b": 2}));

    let record = mapper
        .factory()
        .extract(&Input::object(FieldsAndAccessor), "Pair")
        .unwrap();
    assert_eq!(record.get("a"), Some(&json!(1)));
    assert_eq!(record.get("b"), Some(&json!(2)));
}

#[test]
fn test_object_with_fields_and_accessors() {
    let mapper = mapper_with([person_dto()]);
    let dto = mapper.map(&Input::object(ada()), "PersonDto").unwrap();

    assert_eq!(
        dto.to_value(),
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "fullName": "Ada Lovelace",
            "active": true,
            "nickname": "unknown"
        })
    );
}

#[test]
fn test_self_describing_object() {
    let mapper = mapper_with([TypeDescriptor::builder("InvoiceView")
        .properties(["invoiceNumber", "amountCents"])
        .build()]);
    let invoice = Invoice {
        number: "INV-7".to_string(),
        amount_cents: 1250,
    };

    let view = mapper.map(&Input::object(invoice), "InvoiceView").unwrap();
    assert_eq!(view.to_value(), json!({"invoiceNumber": "INV-7", "amountCents": 1250}));
}

#[test]
fn test_explicit_directive_beats_convention() {
    let mapper = mapper_with([TypeDescriptor::builder("UserDto")
        .mapped("name", PropertyMapping::new().from_source("fullName"))
        .build()]);

    let user = mapper
        .map(&json_input(json!({"name": "exact match", "fullName": "Ada Lovelace"})), "UserDto")
        .unwrap();
    assert_eq!(user.get("name"), Some(&json!("Ada Lovelace")));
}

#[test]
fn test_concrete_source_directive_overrides_wildcard() {
    let mapper = mapper_with([TypeDescriptor::builder("Badge")
        .mapped("title", PropertyMapping::new().from_source("first_name"))
        .build()]);
    mapper.add_property_mapping(
        "Person",
        "Badge",
        "title",
        PropertyMapping::new().from_source("fullName"),
    );

    let from_person = mapper.map(&Input::object(ada()), "Badge").unwrap();
    assert_eq!(from_person.get("title"), Some(&json!("Ada Lovelace")));

    let from_json = mapper
        .map(&json_input(json!({"first_name": "Grace"})), "Badge")
        .unwrap();
    assert_eq!(from_json.get("title"), Some(&json!("Grace")));
}

#[test]
fn test_default_applies_when_nothing_matches() {
    let mapper = mapper_with([person_dto()]);
    let dto = mapper.map(&json_input(json!({"unrelated": 1})), "PersonDto").unwrap();

    assert_eq!(dto.get("nickname"), Some(&json!("unknown")));
    assert!(!dto.contains("firstName"));
    assert_eq!(dto.len(), 1);
}

#[test]
fn test_false_condition_behaves_like_absent_key() {
    let mapper = mapper_with([TypeDescriptor::builder("Profile")
        .mapped(
            "phone",
            PropertyMapping::new()
                .from_source("phone")
                .when(Condition::equals("share_phone", json!(true))),
        )
        .mapped(
            "bio",
            PropertyMapping::new()
                .from_source("bio")
                .with_default(json!(""))
                .when(Condition::key_present("verified")),
        )
        .build()]);

    let hidden = mapper
        .map(&json_input(json!({"phone": "555", "bio": "hi", "share_phone": false})), "Profile")
        .unwrap();
    let absent = mapper.map(&json_input(json!({})), "Profile").unwrap();
    assert_eq!(hidden, absent);
    assert_eq!(hidden.to_value(), json!({"bio": ""}));

    let shown = mapper
        .map(
            &json_input(json!({"phone": "555", "bio": "hi", "share_phone": true, "verified": 1})),
            "Profile",
        )
        .unwrap();
    assert_eq!(shown.to_value(), json!({"phone": "555", "bio": "hi"}));
}

#[test]
fn test_map_array_preserves_order() {
    let mapper = mapper_with([item()]);
    let inputs = vec![json_input(json!({"id": 1})), json_input(json!({"id": 2}))];

    let items = mapper.map_array(&inputs, "Item").unwrap();
    let ids: Vec<Value> = items.iter().filter_map(|i| i.get("id").cloned()).collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
}

#[test]
fn test_map_array_fails_fast_with_index() {
    let mapper = mapper_with([item()]);
    let inputs = vec![
        json_input(json!({"id": 1})),
        Input::resource("socket"),
        json_input(json!({"id": 3})),
    ];

    match mapper.map_array(&inputs, "Item") {
        Err(MappingError::ElementFailed { index, cause, .. }) => {
            assert_eq!(index, 1);
            assert!(matches!(*cause, MappingError::UnsupportedSourceType { .. }));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let partial = mapper.map_array_partial(&inputs, "Item");
    assert_eq!(partial.len(), 3);
    assert!(partial[0].is_ok());
    assert!(partial[1].is_err());
    assert_eq!(partial[2].as_ref().unwrap().get("id"), Some(&json!(3)));
}

#[test]
fn test_unsupported_input_is_an_error() {
    let mapper = mapper_with([item()]);

    match mapper.map(&Input::resource("file"), "Item") {
        Err(MappingError::UnsupportedSourceType {
            source_kind, cause, ..
        }) => {
            assert_eq!(source_kind, "resource:file");
            assert!(matches!(cause, HydrationError::UnsupportedInputKind { .. }));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(matches!(
        mapper.map(&json_input(json!([1, 2])), "Item"),
        Err(MappingError::UnsupportedSourceType { .. })
    ));
}

#[test]
fn test_text_and_scalar_inputs() {
    let mapper = mapper_with([
        item(),
        TypeDescriptor::builder("Wrapper").property("value").build(),
    ]);

    let from_text = mapper.map(&Input::text(r#"{"id": 9}"#), "Item").unwrap();
    assert_eq!(from_text.get("id"), Some(&json!(9)));

    let from_scalar = mapper.map(&json_input(json!(42)), "Wrapper").unwrap();
    assert_eq!(from_scalar.get("value"), Some(&json!(42)));

    let from_plain_text = mapper.map(&Input::text("hello"), "Wrapper").unwrap();
    assert_eq!(from_plain_text.get("value"), Some(&json!("hello")));
}

#[test]
fn test_cyclic_object_graph_is_detected() {
    let mapper = Mapper::with_config(MapperConfig::default().with_max_depth(8)).unwrap();
    mapper.register_type(TypeDescriptor::builder("NodeView").properties(["label", "next"]).build());

    let node: Arc<dyn automap_core::ObjectView> = cyclic_node();
    match mapper.map(&Input::Object(node), "NodeView") {
        Err(MappingError::CyclicGraphDetected {
            depth, max_depth, ..
        }) => {
            assert_eq!(max_depth, 8);
            assert!(depth > max_depth);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_collection_property_maps_each_element() {
    let mapper = mapper_with([
        item(),
        TypeDescriptor::builder("Order")
            .property("orderId")
            .mapped(
                "items",
                PropertyMapping::new()
                    .from_source("line_items")
                    .with_transformer(Arc::new(CollectionTransformer::new("Item"))),
            )
            .mapped(
                "itemsByCode",
                PropertyMapping::new()
                    .from_source("by_code")
                    .with_transformer(Arc::new(CollectionTransformer::new("Item").preserve_keys())),
            )
            .build(),
    ]);

    let input = json_input(json!({
        "order_id": 5,
        "line_items": [{"id": 1, "qty": 2}, {"id": 2, "qty": 1}],
        "by_code": {"x": {"id": 1}, "y": {"id": 2}}
    }));
    let order = mapper.map(&input, "Order").unwrap();

    assert_eq!(
        order.to_value(),
        json!({
            "orderId": 5,
            "items": [{"id": 1}, {"id": 2}],
            "itemsByCode": {"x": {"id": 1}, "y": {"id": 2}}
        })
    );
}

#[test]
fn test_collection_element_failure_is_wrapped() {
    let mapper = mapper_with([TypeDescriptor::builder("Order")
        .mapped(
            "items",
            PropertyMapping::new()
                .from_source("items")
                .with_transformer(Arc::new(CollectionTransformer::new("Unregistered"))),
        )
        .build()]);

    match mapper.map(&json_input(json!({"items": [{"id": 1}]})), "Order") {
        Err(MappingError::TransformationFailed {
            property,
            transformer,
            ..
        }) => {
            assert_eq!(property, "items");
            assert_eq!(transformer, "collection<Unregistered>");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_transformer_sees_full_record() {
    let initials = FnTransformer::new("initials", |value, ctx| {
        let first = value.as_str().unwrap_or_default();
        let last = ctx
            .record()
            .get("last_name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(json!(format!(
            "{}{}",
            first.chars().next().unwrap_or(' '),
            last.chars().next().unwrap_or(' ')
        )))
    });
    let mapper = mapper_with([TypeDescriptor::builder("Card")
        .mapped(
            "initials",
            PropertyMapping::new()
                .from_source("first_name")
                .with_transformer(Arc::new(initials)),
        )
        .build()]);

    let card = mapper.map(&Input::object(ada()), "Card").unwrap();
    assert_eq!(card.get("initials"), Some(&json!("AL")));
}

#[test]
fn test_failing_closure_transformer_is_not_swallowed() {
    let fails = FnTransformer::new("always_fails", |_value, _ctx| {
        Err(anyhow::anyhow!("upstream rejected value"))
    });
    let mapper = mapper_with([TypeDescriptor::builder("Card")
        .mapped(
            "name",
            PropertyMapping::new()
                .from_source("name")
                .with_default(json!("fallback"))
                .with_transformer(Arc::new(fails)),
        )
        .build()]);

    let error = mapper
        .map(&json_input(json!({"name": "x"})), "Card")
        .unwrap_err();
    assert!(error.to_string().contains("upstream rejected value"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_bidirectional_directive_maps_both_ways() {
    let mapper = mapper_with([
        TypeDescriptor::builder("Event")
            .properties(["title"])
            .mapped_from(
                "EventRow",
                "startsAt",
                PropertyMapping::new()
                    .bidirectional("starts_on")
                    .with_transformer(Arc::new(
                        DateTimeTransformer::new()
                            .with_input_format("%Y-%m-%d")
                            .with_output_format("%d/%m/%Y"),
                    )),
            )
            .build(),
        TypeDescriptor::builder("EventRow")
            .properties(["title", "starts_on"])
            .build(),
    ]);

    let row = Input::object(TypedRecord::new(
        "EventRow",
        json!({"title": "Launch", "starts_on": "2024-03-09"}),
    ));
    let event = mapper.map(&row, "Event").unwrap();
    assert_eq!(event.to_value(), json!({"title": "Launch", "startsAt": "09/03/2024"}));

    let back = mapper
        .map(&Input::object(TypedRecord::new("Event", event.to_value())), "EventRow")
        .unwrap();
    assert_eq!(back.to_value(), json!({"title": "Launch", "starts_on": "2024-03-09"}));

    // Other sources only see the wildcard directives
    let plain = mapper
        .map(&json_input(json!({"title": "Launch", "starts_on": "2024-03-09"})), "Event")
        .unwrap();
    assert!(!plain.contains("startsAt"));
}

#[test]
fn test_typed_mapping_through_serde() {
    let mapper = Mapper::new();
    let contact: Contact = mapper
        .map_into(&json_input(json!({
            "EMAIL": "ada@example.com",
            "display_name": "Ada"
        })))
        .unwrap();

    assert_eq!(
        contact,
        Contact {
            email: "ada@example.com".to_string(),
            display_name: "Ada".to_string(),
            verified: false,
        }
    );
    assert!(mapper.catalog().contains("Contact"));
}

#[test]
fn test_typed_conversion_failure() {
    let mapper = Mapper::new();
    let result = mapper.map_into::<Contact>(&json_input(json!({"email": "a@b.c"})));
    assert!(matches!(result, Err(MappingError::TypedConversion { .. })));
}

#[test]
fn test_partial_update_of_typed_value() {
    let mapper = Mapper::new();
    let mut contact = Contact {
        email: "old@example.com".to_string(),
        display_name: "Ada".to_string(),
        verified: true,
    };

    mapper
        .map_onto(&json_input(json!({"email": "new@example.com"})), &mut contact)
        .unwrap();

    assert_eq!(contact.email, "new@example.com");
    assert_eq!(contact.display_name, "Ada");
    // Defaults apply to absent properties, as in any mapping call
    assert!(!contact.verified);
}

#[test]
fn test_reset_to_defaults_isolates_tests() {
    let mapper = mapper_with([item()]);
    mapper.map(&json_input(json!({"id": 1})), "Item").unwrap();

    mapper.reset_to_defaults();
    assert!(mapper.cache().is_empty());
    assert!(matches!(
        mapper.map(&json_input(json!({"id": 1})), "Item"),
        Err(MappingError::DestinationTypeNotFound { .. })
    ));
}

#[test]
fn test_builder_wires_types_and_config() {
    let mapper = Mapper::builder()
        .config(MapperConfig::default().with_min_confidence(0.5))
        .register_type(TypeDescriptor::builder("Named").property("name").build())
        .build()
        .unwrap();

    // "user_name" shares one of two tokens with "name": too weak at 0.7, enough at 0.5
    let named = mapper.map(&json_input(json!({"user_name": "ada"})), "Named").unwrap();
    assert_eq!(named.get("name"), Some(&json!("ada")));

    let strict = mapper_with([TypeDescriptor::builder("Named").property("name").build()]);
    let unnamed = strict.map(&json_input(json!({"user_name": "ada"})), "Named").unwrap();
    assert!(unnamed.is_empty());
}
