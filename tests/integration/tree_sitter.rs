use crate::common::{all_nodes, resolve};
use ast_xpath::ts::{RustParser, TsHost};
use ast_xpath::{Axis, Location, NodeKind, PathQueryGenerator, QueryTree};

const SOURCE: &str = r#"struct Point {
    x: i32,
    y: i32,
}

fn area(w: u32, h: u32) -> u32 {
    w * h
}
"#;

#[test]
fn struct_fields_get_structural_paths() {
    let mut parser = RustParser::new().unwrap();
    let parsed = parser.parse_with_source(SOURCE).unwrap();
    let host = TsHost::new(&parsed);

    let paths = PathQueryGenerator::new(&host, Location::new(2, 5)).generate();
    assert_eq!(
        paths,
        [
            "/source_file/struct_item/field_declaration_list/field_declaration[./field_identifier[@text='x']]",
            "/source_file/struct_item/field_declaration_list/field_declaration[1]/field_identifier[@text='x']",
        ]
    );

    let top = PathQueryGenerator::new(&host, Location::new(1, 1)).generate();
    assert_eq!(
        top,
        [
            "/source_file[./struct_item/type_identifier[@text='Point']]",
            "/source_file/struct_item[./type_identifier[@text='Point']]",
        ]
    );
}

#[test]
fn every_named_node_round_trips() {
    let mut parser = RustParser::new().unwrap();
    let parsed = parser.parse_with_source(SOURCE).unwrap();
    let host = TsHost::new(&parsed);
    let tree = QueryTree::new(&host);

    let elements: Vec<_> = all_nodes(&tree)
        .into_iter()
        .filter(|n| n.kind() == NodeKind::Element)
        .collect();
    assert!(elements.len() > 20);

    for node in elements {
        let location = Location::new(node.line().unwrap(), node.column().unwrap() + 1)
            .with_kind(node.name());
        let paths = PathQueryGenerator::new(&host, location.clone()).generate();
        assert_eq!(paths.len(), 1, "{location}: {paths:?}");

        let found = resolve(&tree, &paths[0]);
        assert_eq!(found, [node], "{}", paths[0]);
    }
}

#[test]
fn parameters_are_told_apart_by_name() {
    let mut parser = RustParser::new().unwrap();
    let parsed = parser.parse_with_source(SOURCE).unwrap();
    let host = TsHost::new(&parsed);

    // `h: u32` starts at column 17 of line 6.
    let location = Location::new(6, 17).with_kind("parameter");
    let paths = PathQueryGenerator::new(&host, location).generate();
    assert_eq!(
        paths,
        ["/source_file/function_item/parameters/parameter[./identifier[@text='h']]"]
    );
}

#[test]
fn axes_walk_a_parsed_function() {
    let mut parser = RustParser::new().unwrap();
    let parsed = parser.parse_with_source(SOURCE).unwrap();
    let host = TsHost::new(&parsed);
    let tree = QueryTree::new(&host);

    let function = tree
        .document()
        .axis(Axis::Descendant)
        .unwrap()
        .find(|n| n.name() == "function_item")
        .unwrap();
    let children: Vec<_> = function.children().unwrap().map(|n| n.name()).collect();
    assert_eq!(children, ["identifier", "parameters", "primitive_type", "block"]);

    let previous: Vec<_> = function
        .axis(Axis::PrecedingSibling)
        .unwrap()
        .map(|n| n.name())
        .collect();
    assert_eq!(previous, ["struct_item"]);

    let names: Vec<_> = function
        .axis(Axis::Descendant)
        .unwrap()
        .filter(|n| n.name() == "identifier")
        .filter_map(|n| n.text_value())
        .collect();
    assert_eq!(names, ["area", "w", "h", "w", "h"]);
}

#[test]
fn broken_source_still_yields_a_tree() {
    let mut parser = RustParser::new().unwrap();
    let parsed = parser.parse_with_source("fn broken( {\n    let x = 1;\n}\n").unwrap();
    assert!(parsed.has_errors());

    let host = TsHost::new(&parsed);
    let tree = QueryTree::new(&host);
    assert!(tree.len() > 2);
    assert_eq!(
        tree.document().axis(Axis::Descendant).unwrap().count(),
        tree.len() - 1
    );
}
