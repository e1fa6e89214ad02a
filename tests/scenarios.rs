// SPDX-License-Identifier: Apache-2.0

use serde_json::json;

use enumstitch::*;

const COLOR_DUMP: &str = r#"
    (m.Color_e, TypeInfo * (TIdata (enum) [Red,Green,Blue]))
    [ConInfo m.Color_e (visible) (m.Red :>: (...) -> m.Color_e) (1 of 3, tag = 0 :: Bit 2)]
    [ConInfo m.Color_e (visible) (m.Green :>: (...) -> m.Color_e) (2 of 3, tag = 2 :: Bit 2)]
    [ConInfo m.Color_e (visible) (m.Blue :>: (...) -> m.Color_e) (3 of 3, tag = 1 :: Bit 2)]
"#;

fn color_members() -> serde_json::Value {
    json!([
        {"name": "Red", "value": 0},
        {"name": "Blue", "value": 1},
        {"name": "Green", "value": 2},
    ])
}

#[test]
fn catalog_from_declaration_and_tags() {
    let catalog = build_enum_catalog(COLOR_DUMP).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog.get("m::Color_e").unwrap(),
        &[
            EnumMember::new("Red", 0),
            EnumMember::new("Blue", 1),
            EnumMember::new("Green", 2),
        ]
    );
}

#[test]
fn port_reference_inserts_enum() {
    let mut doc = json!({
        "top": "mkTop",
        "mkTop": {
            "typedefs": {},
            "blocks": {
                "u_fsm": {"type": "mkFsm", "ports": [
                    {"name": "color", "type": "m::Color_e", "width": 2},
                ]},
            },
        },
    });
    let report = patch_document(COLOR_DUMP, &mut doc).unwrap();
    assert_eq!(doc["mkTop"]["typedefs"]["m::Color_e"], color_members());
    assert_eq!(report.merge.modules["mkTop"].inserted, vec!["m::Color_e"]);
}

#[test]
fn stale_enum_body_is_replaced() {
    let mut doc = json!({
        "mkTop": {
            "typedefs": {"m::Color_e": [
                {"name": "Red", "value": 0},
                {"name": "Green", "value": 1},
            ]},
        },
    });
    let report = patch_document(COLOR_DUMP, &mut doc).unwrap();
    assert_eq!(doc["mkTop"]["typedefs"]["m::Color_e"], color_members());
    assert_eq!(report.merge.total_replaced(), 1);
}

#[test]
fn unreferenced_enum_is_not_inserted() {
    let mut doc = json!({
        "mkTop": {
            "typedefs": {"m::Pixel_t": [{"var": "a", "type": "Bit#(8)", "width": 8}]},
            "blocks": {"u0": {"ports": [{"name": "p", "type": "Bool"}]}},
        },
    });
    let report = patch_document(COLOR_DUMP, &mut doc).unwrap();
    assert!(doc["mkTop"]["typedefs"].get("m::Color_e").is_none());
    assert_eq!(report.merge.total_changed(), 0);
}

#[test]
fn self_referential_field_becomes_bit_vector() {
    let mut doc = json!({
        "mkTop": {
            "typedefs": {"m::Flags_e": [
                {"var": "x", "type": "m::Flags_e", "width": 4},
                {"var": "y", "type": "m::Color_e", "width": 2},
            ]},
        },
    });
    patch_document(COLOR_DUMP, &mut doc).unwrap();
    assert_eq!(
        doc["mkTop"]["typedefs"]["m::Flags_e"],
        json!([
            {"var": "x", "type": "Bit#(4)", "width": 4},
            {"var": "y", "type": "m::Color_e", "width": 2},
        ])
    );
    assert_eq!(doc["mkTop"]["typedefs"]["m::Color_e"], color_members());
}

#[test]
fn each_module_gets_only_what_it_uses() {
    let dump = format!(
        "{COLOR_DUMP}
    (m.State_e, TypeInfo * (TIdata (enum) [Idle, Run]))
    [ConInfo m.State_e (visible) (m.Idle :>: (...) -> m.State_e) (1 of 2, tag = 0 :: Bit 1)]
    [ConInfo m.State_e (visible) (m.Run :>: (...) -> m.State_e) (2 of 2, tag = 1 :: Bit 1)]
"
    );
    let mut doc = json!({
        "top": "mkA",
        "mkA": {
            "typedefs": {"m::Req_t": [{"var": "c", "type": "m::Color_e", "width": 2}]},
            "blocks": {},
        },
        "mkB": {
            "typedefs": {},
            "blocks": {"u_ctl": {"ports": [{"name": "s", "type": "m::State_e"}]}},
        },
    });
    let report = patch_document(&dump, &mut doc).unwrap();

    let a = doc["mkA"]["typedefs"].as_object().unwrap();
    assert!(a.contains_key("m::Color_e"));
    assert!(!a.contains_key("m::State_e"));

    let b = doc["mkB"]["typedefs"].as_object().unwrap();
    assert!(b.contains_key("m::State_e"));
    assert!(!b.contains_key("m::Color_e"));

    assert_eq!(report.merge.total_inserted(), 2);
    assert_eq!(doc["top"], json!("mkA"));
}

#[test]
fn tagged_union_with_same_shape_is_ignored() {
    let dump = r#"
    (m.Maybe_t, TypeInfo (* -> *) (TIdata (struct) [Invalid, Valid]))
    [ConInfo m.Maybe_t (visible) (m.Invalid :>: (...) -> m.Maybe_t) (1 of 2, tag = 0 :: Bit 1)]
    [ConInfo m.Maybe_t (visible) (m.Valid :>: (...) -> m.Maybe_t) (2 of 2, tag = 1 :: Bit 1)]
"#;
    let mut doc = json!({
        "mkTop": {"typedefs": {}, "blocks": {"u0": {"ports": [{"type": "m::Maybe_t"}]}}},
    });
    let report = patch_document(dump, &mut doc).unwrap();
    assert!(report.catalog.is_empty());
    assert_eq!(doc["mkTop"]["typedefs"], json!({}));
}
