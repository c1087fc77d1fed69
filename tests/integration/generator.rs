use crate::common::{build_shape, resolve};
use ast_xpath::{GeneratorConfig, Location, PathQueryGenerator, QueryTree, SyntaxTree};

fn paths_at(host: &SyntaxTree, line: usize, column: usize) -> Vec<String> {
    PathQueryGenerator::new(host, Location::new(line, column)).generate()
}

#[test]
fn repeated_calls_get_positions() {
    let mut builder = SyntaxTree::builder();
    let class = builder.root("Class", "", 1, 0);
    let method = builder.child(class, "Method", "", 2, 4);
    builder.child(method, "Call", "", 3, 8);
    builder.child(method, "Call", "", 4, 8);
    let host = builder.build();

    assert_eq!(paths_at(&host, 3, 9), ["/Class/Method/Call[1]"]);
    assert_eq!(paths_at(&host, 4, 9), ["/Class/Method/Call[2]"]);
}

#[test]
fn named_sibling_uses_its_text() {
    let mut builder = SyntaxTree::builder().text_kinds(["CLASS_DEF"]);
    let unit = builder.root("COMPILATION_UNIT", "", 1, 0);
    builder.child(unit, "CLASS_DEF", "Bar", 1, 0);
    builder.child(unit, "CLASS_DEF", "Foo", 5, 0);
    let host = builder.build();

    let paths = paths_at(&host, 5, 1);
    assert_eq!(paths, ["/COMPILATION_UNIT/CLASS_DEF[@text='Foo']"]);
    assert!(!paths[0].ends_with("[2]"));
}

#[test]
fn zero_width_construct_and_token_both_match() {
    let mut builder = SyntaxTree::builder().text_kinds(["IDENT"]);
    let class = builder.root("CLASS_DEF", "", 1, 0);
    let modifiers = builder.child(class, "MODIFIERS", "", 1, 0);
    builder.child(modifiers, "LITERAL_PUBLIC", "public", 1, 0);
    builder.child(class, "IDENT", "Foo", 1, 13);
    let host = builder.build();

    let paths = paths_at(&host, 1, 1);
    assert_eq!(
        paths,
        [
            "/CLASS_DEF[./IDENT[@text='Foo']]",
            "/CLASS_DEF/MODIFIERS",
            "/CLASS_DEF/MODIFIERS/LITERAL_PUBLIC",
        ]
    );

    let only_modifiers = PathQueryGenerator::new(&host, Location::new(1, 1).with_kind("MODIFIERS"));
    assert_eq!(only_modifiers.generate(), ["/CLASS_DEF/MODIFIERS"]);
}

#[test]
fn config_tab_width_changes_matched_column() {
    let source = "class A {\n\tint x;\n}";
    let mut builder = SyntaxTree::builder().source(source);
    let class = builder.root("CLASS_DEF", "", 1, 0);
    builder.child(class, "VARIABLE_DEF", "", 2, 1);
    let host = builder.build();

    let config = GeneratorConfig {
        tab_width: 4,
        ..GeneratorConfig::default()
    };
    let four = PathQueryGenerator::new(&host, Location::new(2, 5)).with_config(&config);
    assert_eq!(four.generate(), ["/CLASS_DEF/VARIABLE_DEF"]);

    let eight = PathQueryGenerator::new(&host, Location::new(2, 9));
    assert_eq!(eight.generate(), ["/CLASS_DEF/VARIABLE_DEF"]);
    assert!(paths_at(&host, 2, 5).is_empty());
}

#[test]
fn every_node_of_a_fixed_tree_resolves_back_to_itself() {
    let shape: Vec<_> = (0..64).map(|i| ((i * 13 + 5) % 29 + 1, (i * 5) % 7)).collect();
    let host = build_shape(&shape);
    let tree = QueryTree::new(&host);

    for line in 1..=shape.len() {
        let paths = paths_at(&host, line, 1);
        assert_eq!(paths.len(), 1, "line {line}");

        let found = resolve(&tree, &paths[0]);
        assert_eq!(found.len(), 1, "{} resolved to {found:?}", paths[0]);
        assert_eq!(found[0].line(), Some(line), "{}", paths[0]);
    }
}
