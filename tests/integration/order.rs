use crate::common::{all_nodes, build_shape};
use ast_xpath::{sort_in_order, Axis, HostTree, QueryNode, QueryTree, SyntaxTree};
use std::cmp::Ordering;

fn is_ancestor_pair<H: HostTree>(a: &QueryNode<'_, H>, b: &QueryNode<'_, H>) -> bool {
    a.axis(Axis::Ancestor).unwrap().any(|n| n == *b)
        || b.axis(Axis::Ancestor).unwrap().any(|n| n == *a)
}

/// Compares `compare_order` with positions in a pre-order reading.
///
/// The two agree for nodes at equal depth and for ancestor/descendant
/// pairs. Elsewhere the comparator puts the shallower node first, which
/// disagrees with document order whenever the deeper node precedes it.
#[test]
fn comparator_agrees_with_document_order_where_defined() {
    let shape: Vec<_> = (0..40).map(|i| (i * 7 + 3, i % 4)).collect();
    let host = build_shape(&shape);
    let tree = QueryTree::new(&host);
    let nodes = all_nodes(&tree);

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate() {
            let expected = i.cmp(&j);
            let actual = a.compare_order(b).unwrap();
            if a.depth() == b.depth() || is_ancestor_pair(a, b) {
                assert_eq!(actual, expected, "{a:?} vs {b:?}");
            } else {
                assert_eq!(actual, a.depth().cmp(&b.depth()));
                if actual != expected {
                    let deeper_comes_first = (a.depth() > b.depth()) == (i < j);
                    assert!(deeper_comes_first, "{a:?} vs {b:?}");
                }
            }
        }
    }
}

#[test]
fn shallow_following_node_orders_before_deep_preceding_node() {
    //   R
    //   ├── A
    //   │   └── A1
    //   └── B
    let mut builder = SyntaxTree::builder();
    let r = builder.root("R", "", 1, 0);
    let a = builder.child(r, "A", "", 2, 0);
    builder.child(a, "A1", "", 3, 0);
    builder.child(r, "B", "", 4, 0);
    let host = builder.build();
    let tree = QueryTree::new(&host);

    let nodes = all_nodes(&tree);
    let a1 = nodes.iter().find(|n| n.name() == "A1").unwrap();
    let b = nodes.iter().find(|n| n.name() == "B").unwrap();

    // A1 precedes B in document order, yet B is shallower and sorts first.
    assert!(a1.axis(Axis::Following).unwrap().any(|n| n == *b));
    assert_eq!(b.compare_order(a1).unwrap(), Ordering::Less);
}

#[test]
fn sort_in_order_places_attributes_after_owner() {
    let mut builder = SyntaxTree::builder().text_kinds(["IDENT"]);
    let class = builder.root("CLASS_DEF", "", 1, 0);
    builder.child(class, "IDENT", "Foo", 1, 6);
    builder.child(class, "OBJBLOCK", "", 1, 10);
    let host = builder.build();
    let tree = QueryTree::new(&host);

    let nodes = all_nodes(&tree);
    let ident = nodes[2];
    let attribute = ident.attribute("text").unwrap().unwrap();

    let mut shuffled = vec![nodes[3], attribute, nodes[0], ident, nodes[1]];
    sort_in_order(&mut shuffled);
    let names: Vec<_> = shuffled.iter().map(|n| n.name()).collect();
    assert_eq!(names, ["", "CLASS_DEF", "IDENT", "text", "OBJBLOCK"]);
}
