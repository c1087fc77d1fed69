use crate::common::{all_nodes, chain, reference_descendants};
use ast_xpath::{Axis, NodeKind, QueryError, QueryTree, SyntaxTree};

//   COMPILATION_UNIT
//   ├── PACKAGE_DEF
//   │   └── IDENT "app"
//   └── CLASS_DEF
//       ├── IDENT "Foo"
//       └── OBJBLOCK
//           ├── METHOD_DEF
//           │   └── IDENT "run"
//           └── METHOD_DEF
//               └── IDENT "stop"
fn class_file() -> SyntaxTree {
    let mut builder = SyntaxTree::builder().text_kinds(["IDENT"]);
    let unit = builder.root("COMPILATION_UNIT", "", 1, 0);
    let package = builder.child(unit, "PACKAGE_DEF", "", 1, 0);
    builder.child(package, "IDENT", "app", 1, 8);
    let class = builder.child(unit, "CLASS_DEF", "", 3, 0);
    builder.child(class, "IDENT", "Foo", 3, 6);
    let block = builder.child(class, "OBJBLOCK", "", 3, 10);
    let run = builder.child(block, "METHOD_DEF", "", 4, 4);
    builder.child(run, "IDENT", "run", 4, 9);
    let stop = builder.child(block, "METHOD_DEF", "", 5, 4);
    builder.child(stop, "IDENT", "stop", 5, 9);
    builder.build()
}

#[test]
fn document_has_no_ancestors_or_parent() {
    let host = class_file();
    let tree = QueryTree::new(&host);
    let document = tree.document();

    assert_eq!(document.axis(Axis::Ancestor).unwrap().count(), 0);
    assert_eq!(document.parent().unwrap(), None);
    assert_eq!(document.kind(), NodeKind::Document);
}

#[test]
fn document_supports_only_downward_and_self_axes() {
    let host = class_file();
    let tree = QueryTree::new(&host);
    let document = tree.document();

    for axis in Axis::ALL {
        let supported = matches!(
            axis,
            Axis::Self_
                | Axis::Parent
                | Axis::Ancestor
                | Axis::AncestorOrSelf
                | Axis::Child
                | Axis::Descendant
                | Axis::DescendantOrSelf
        );
        match document.axis(axis) {
            Ok(_) => assert!(supported, "{axis} should be unsupported on the document"),
            Err(err) => {
                assert!(!supported, "{axis} should work on the document");
                assert_eq!(
                    err,
                    QueryError::UnsupportedOperation {
                        operation: axis.name(),
                        kind: NodeKind::Document,
                    }
                );
            }
        }
    }
}

#[test]
fn every_axis_on_an_attribute_is_unsupported() {
    let host = class_file();
    let tree = QueryTree::new(&host);
    let ident = all_nodes(&tree)
        .into_iter()
        .find(|n| n.text_value() == Some("Foo"))
        .unwrap();
    let attribute = ident.attribute("text").unwrap().unwrap();

    for axis in Axis::ALL {
        match attribute.axis(axis) {
            Err(QueryError::UnsupportedOperation { kind, .. }) => {
                assert_eq!(kind, NodeKind::Attribute)
            }
            other => panic!("{axis}: expected UnsupportedOperation, got {:?}", other.err()),
        }
    }
    assert!(attribute.axis_named("child").is_err());
}

#[test]
fn method_identifiers_are_reachable_by_axis_walks() {
    let host = class_file();
    let tree = QueryTree::new(&host);
    let methods: Vec<_> = tree
        .document()
        .axis(Axis::Descendant)
        .unwrap()
        .filter(|n| n.name() == "METHOD_DEF")
        .collect();
    assert_eq!(methods.len(), 2);

    let names: Vec<_> = methods
        .iter()
        .map(|m| m.axis(Axis::Child).unwrap().next().unwrap().text_value().unwrap())
        .collect();
    assert_eq!(names, ["run", "stop"]);

    let enclosing: Vec<_> = methods[1]
        .axis(Axis::Ancestor)
        .unwrap()
        .map(|n| n.name())
        .collect();
    assert_eq!(enclosing, ["OBJBLOCK", "CLASS_DEF", "COMPILATION_UNIT", ""]);

    let before: Vec<_> = methods[1]
        .axis(Axis::Preceding)
        .unwrap()
        .map(|n| n.text_value().unwrap_or(n.name()))
        .collect();
    assert_eq!(
        before,
        ["run", "METHOD_DEF", "Foo", "app", "PACKAGE_DEF"]
    );
}

#[test]
fn descendant_walk_matches_recursive_reference() {
    let host = class_file();
    let tree = QueryTree::new(&host);

    for node in all_nodes(&tree) {
        let mut expected = Vec::new();
        reference_descendants(node, &mut expected);
        let actual: Vec<_> = node.axis(Axis::Descendant).unwrap().collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn ten_thousand_level_chain_is_walked_iteratively() {
    let host = chain(10_000);
    let tree = QueryTree::new(&host);
    let top = tree.document().children().unwrap().next().unwrap();

    let lines: Vec<_> = top
        .axis(Axis::Descendant)
        .unwrap()
        .map(|n| n.line().unwrap())
        .collect();
    let expected: Vec<_> = (2..=10_000).collect();
    assert_eq!(lines, expected);

    let deepest = tree.document().axis(Axis::Descendant).unwrap().last().unwrap();
    assert_eq!(deepest.depth(), 10_000);
    assert_eq!(deepest.axis(Axis::Ancestor).unwrap().count(), 10_000);
    assert_eq!(deepest.axis(Axis::Preceding).unwrap().count(), 0);
    assert_eq!(top.axis(Axis::Following).unwrap().count(), 0);
}

#[test]
fn axis_names_round_trip_through_axis_named() {
    let host = class_file();
    let tree = QueryTree::new(&host);
    let class = all_nodes(&tree)
        .into_iter()
        .find(|n| n.name() == "CLASS_DEF")
        .unwrap();

    for axis in Axis::ALL {
        let by_enum: Vec<_> = class.axis(axis).unwrap().collect();
        let by_name: Vec<_> = class.axis_named(axis.name()).unwrap().collect();
        assert_eq!(by_enum, by_name, "{axis}");
    }
    assert_eq!(
        class.axis_named("namespace").err(),
        Some(QueryError::UnsupportedAxis {
            name: "namespace".to_string()
        })
    );
}
