//! Tree engine tests over a slice of the JDK exception hierarchy.
//!
//! Nodes are class names; the root is `Object` and the relation is "is the superclass of".

use gentree::{IterableTree, Tree, TreeError, TreeOptions};
use rstest::{fixture, rstest};

type Class = &'static str;
type ClassTree = Tree<Class, fn(&Class) -> bool, fn(&Class, &Class) -> bool>;

const CLASSES: [Class; 17] = [
    "Object",
    "Throwable",
    "Error",
    "LinkageError",
    "ThreadDeath",
    "AssertionError",
    "VirtualMachineError",
    "Exception",
    "CloneNotSupportedException",
    "ReflectiveOperationException",
    "RuntimeException",
    "IndexOutOfBoundsException",
    "ArithmeticException",
    "ClassCastException",
    "NullPointerException",
    "IllegalArgumentException",
    "InterruptedException",
];

fn superclass(class: &str) -> Option<Class> {
    match class {
        "Object" => None,
        "Throwable" | "Number" | "String" => Some("Object"),
        "Error" | "Exception" => Some("Throwable"),
        "LinkageError" | "ThreadDeath" | "AssertionError" | "VirtualMachineError" => Some("Error"),
        "CloneNotSupportedException"
        | "ReflectiveOperationException"
        | "RuntimeException"
        | "InterruptedException" => Some("Exception"),
        "IndexOutOfBoundsException"
        | "ArithmeticException"
        | "ClassCastException"
        | "NullPointerException"
        | "IllegalArgumentException" => Some("RuntimeException"),
        "Integer" | "Long" => Some("Number"),
        _ => None,
    }
}

/// Superclasses of `class`, `Object` first.
fn superclasses(class: Class) -> Vec<Class> {
    let mut chain: Vec<Class> = std::iter::successors(superclass(class), |c| superclass(c)).collect();
    chain.reverse();
    chain
}

fn is_object(class: &Class) -> bool {
    *class == "Object"
}

fn extends(parent: &Class, child: &Class) -> bool {
    superclass(child) == Some(*parent)
}

fn empty_tree() -> ClassTree {
    Tree::new(is_object as fn(&Class) -> bool, extends as fn(&Class, &Class) -> bool)
}

#[fixture]
fn classes() -> ClassTree {
    Tree::from_nodes(
        is_object as fn(&Class) -> bool,
        extends as fn(&Class, &Class) -> bool,
        CLASSES,
    )
    .expect("class hierarchy is a valid tree")
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_missing_intermediate_parent_when_building_then_parent_absent() {
    let result = Tree::from_nodes(
        is_object as fn(&Class) -> bool,
        extends as fn(&Class, &Class) -> bool,
        ["Object", "Exception"],
    );
    assert_eq!(result.unwrap_err(), TreeError::ParentAbsent("Exception"));
}

#[test]
fn given_two_roots_when_building_then_multi_root_lists_both() {
    let result = Tree::from_nodes(
        |c: &Class| superclass(c).is_none(),
        extends,
        ["Object", "Throwable", "Unknown"],
    );
    assert_eq!(result.unwrap_err(), TreeError::MultiRoot(vec!["Object", "Unknown"]));
}

#[test]
fn given_no_root_when_building_then_root_absent() {
    let result = Tree::from_nodes(
        is_object as fn(&Class) -> bool,
        extends as fn(&Class, &Class) -> bool,
        ["Throwable", "Error"],
    );
    assert_eq!(result.unwrap_err(), TreeError::RootAbsent);
}

#[rstest]
fn given_failed_replace_when_querying_then_previous_nodes_remain(mut classes: ClassTree) {
    let err = classes.replace_nodes(["Object", "Error"]).unwrap_err();
    assert_eq!(err, TreeError::ParentAbsent("Error"));
    assert_eq!(classes.nodes(), &CLASSES);
}

// ============================================================
// Queries
// ============================================================

#[rstest]
fn given_class_tree_when_getting_root_then_object(classes: ClassTree) {
    assert_eq!(classes.root(), Some(&"Object"));
    assert_eq!(empty_tree().root(), None);
}

#[rstest]
fn given_class_tree_when_checking_membership_then_all_classes_present(classes: ClassTree) {
    for class in CLASSES {
        assert!(classes.contains(&class), "{class} should be a member");
    }
    assert!(!classes.contains(&"Long"));
}

#[rstest]
fn given_class_tree_when_listing_nodes_then_insertion_order(classes: ClassTree) {
    assert_eq!(classes.nodes(), &CLASSES);
    assert_eq!(classes.len(), CLASSES.len());
}

#[rstest]
fn given_any_class_when_finding_parent_then_superclass(
    classes: ClassTree,
    #[values(
        "Object",
        "Throwable",
        "VirtualMachineError",
        "InterruptedException",
        "NullPointerException"
    )]
    class: Class,
) {
    assert_eq!(classes.find_parent(&class).copied(), superclass(class));
}

#[rstest]
fn given_every_class_when_finding_parents_then_superclass_chain(classes: ClassTree) {
    for class in CLASSES {
        let parents: Vec<Class> = classes.find_parents(&class).into_iter().copied().collect();
        assert_eq!(parents, superclasses(class), "ancestors of {class}");
    }
}

#[rstest]
fn given_non_member_when_finding_parents_then_chain_within_tree(classes: ClassTree) {
    // Number is not stored, but Object is
    assert_eq!(classes.find_parents(&"Number"), vec![&"Object"]);
    assert!(classes.find_parents(&"Long").is_empty());
}

#[rstest]
fn given_two_exceptions_when_finding_same_parents_then_shared_prefix(classes: ClassTree) {
    let shared = classes.find_same_parents([&"NullPointerException", &"CloneNotSupportedException"]);
    assert_eq!(shared, vec![&"Object", &"Throwable", &"Exception"]);
    assert_eq!(
        classes.find_same_parent([&"NullPointerException", &"CloneNotSupportedException"]),
        Some(&"Exception")
    );
}

#[rstest]
#[case(&["ThreadDeath", "ArithmeticException"], &["Object", "Throwable"])]
#[case(&["IndexOutOfBoundsException", "ClassCastException", "NullPointerException"], &["Object", "Throwable", "Exception", "RuntimeException"])]
#[case(&["Object", "Error"], &[])]
#[case(&[], &[])]
fn given_classes_when_finding_same_parents_then_all_chains_agree(
    classes: ClassTree,
    #[case] input: &[Class],
    #[case] expected: &[Class],
) {
    let shared: Vec<Class> = classes.find_same_parents(input).into_iter().copied().collect();
    assert_eq!(shared, expected);
}

#[rstest]
fn given_runtime_exception_when_finding_children_then_direct_subclasses(classes: ClassTree) {
    assert_eq!(
        classes.find_children(&"RuntimeException"),
        vec![
            &"IndexOutOfBoundsException",
            &"ArithmeticException",
            &"ClassCastException",
            &"NullPointerException",
            &"IllegalArgumentException",
        ]
    );
    assert!(classes.find_children(&"ThreadDeath").is_empty());
}

#[rstest]
fn given_exception_when_finding_younger_then_preorder_descendants(classes: ClassTree) {
    assert_eq!(
        classes.find_younger(&"Exception"),
        vec![
            &"CloneNotSupportedException",
            &"ReflectiveOperationException",
            &"RuntimeException",
            &"IndexOutOfBoundsException",
            &"ArithmeticException",
            &"ClassCastException",
            &"NullPointerException",
            &"IllegalArgumentException",
            &"InterruptedException",
        ]
    );
}

// ============================================================
// Mutations
// ============================================================

#[test]
fn given_empty_tree_when_adding_nodes_then_ancestors_must_come_first() {
    let mut tree = empty_tree();

    assert_eq!(tree.add_node("String"), Err(TreeError::InvalidRoot("String")));
    tree.add_node("Object").unwrap();
    assert_eq!(tree.add_node("Integer"), Err(TreeError::ParentAbsent("Integer")));
    tree.add_node("Number").unwrap();
    tree.add_node("Integer").unwrap();
    tree.add_node("String").unwrap();

    assert_eq!(tree.nodes(), &["Object", "Number", "Integer", "String"]);
    assert_eq!(tree.add_node("Number"), Err(TreeError::NodeExists("Number")));
    assert_eq!(
        tree.add_node("Object"),
        Err(TreeError::NodeExists("Object"))
    );
}

#[test]
fn given_populated_tree_when_adding_parentless_root_then_parent_absent() {
    let mut tree = Tree::new(|c: &Class| superclass(c).is_none(), extends);
    tree.add_node("Object").unwrap();
    tree.add_node("Throwable").unwrap();

    assert_eq!(tree.add_node("Unknown"), Err(TreeError::ParentAbsent("Unknown")));
    assert_eq!(tree.nodes(), &["Object", "Throwable"]);
}

#[test]
fn given_root_predicate_matching_parented_node_when_adding_then_multi_root() {
    // Throwable has Object as parent but also passes the root predicate
    let mut tree = Tree::new(|c: &Class| matches!(*c, "Object" | "Throwable"), extends);
    tree.add_node("Object").unwrap();

    assert_eq!(
        tree.add_node("Throwable"),
        Err(TreeError::MultiRoot(vec!["Object", "Throwable"]))
    );
    assert_eq!(tree.nodes(), &["Object"]);
}

#[rstest]
fn given_class_tree_when_removing_nodes_then_descendants_go_too(mut classes: ClassTree) {
    assert_eq!(classes.remove_node(&"Long"), Err(TreeError::NodeAbsent("Long")));

    assert_eq!(classes.remove_node(&"NullPointerException"), Ok(vec!["NullPointerException"]));
    let removed = classes.remove_node(&"RuntimeException").unwrap();
    assert_eq!(
        removed,
        vec![
            "RuntimeException",
            "IndexOutOfBoundsException",
            "ArithmeticException",
            "ClassCastException",
            "IllegalArgumentException",
        ]
    );
    assert_eq!(
        classes.remove_node(&"IllegalArgumentException"),
        Err(TreeError::NodeAbsent("IllegalArgumentException"))
    );
    assert_eq!(classes.len(), CLASSES.len() - 6);
}

#[rstest]
fn given_root_when_removing_then_tree_is_empty_and_accepts_new_root(mut classes: ClassTree) {
    let removed = classes.remove_node(&"Object").unwrap();
    assert_eq!(removed.len(), CLASSES.len());
    assert!(classes.is_empty());
    classes.add_node("Object").unwrap();
    assert_eq!(classes.root(), Some(&"Object"));
}

// ============================================================
// Derived trees
// ============================================================

#[rstest]
fn given_exception_when_taking_subtree_then_rooted_there(classes: ClassTree) {
    assert_eq!(classes.subtree(&"Long").unwrap_err(), TreeError::NodeAbsent("Long"));

    let subtree = classes.subtree(&"Exception").unwrap();
    assert_eq!(
        subtree.nodes(),
        &[
            "Exception",
            "CloneNotSupportedException",
            "ReflectiveOperationException",
            "RuntimeException",
            "IndexOutOfBoundsException",
            "ArithmeticException",
            "ClassCastException",
            "NullPointerException",
            "IllegalArgumentException",
            "InterruptedException",
        ]
    );
    assert_eq!(subtree.root(), Some(&"Exception"));
    assert_eq!(subtree.depth(), 3);
}

#[rstest]
fn given_subtree_when_mutating_then_source_unchanged(classes: ClassTree) {
    let mut subtree = classes.subtree(&"RuntimeException").unwrap();
    subtree.remove_node(&"ArithmeticException").unwrap();
    assert!(classes.contains(&"ArithmeticException"));
    assert!(!subtree.contains(&"ArithmeticException"));
}

#[rstest]
fn given_error_and_index_exception_when_taking_local_tree_then_merged_chains(classes: ClassTree) {
    assert_eq!(
        classes.local_tree([&"Long"]).unwrap_err(),
        TreeError::NodeAbsent("Long")
    );

    let local = classes
        .local_tree([&"Error", &"IndexOutOfBoundsException"])
        .unwrap();
    assert_eq!(
        local.nodes(),
        &[
            "Object",
            "Throwable",
            "Error",
            "Exception",
            "RuntimeException",
            "IndexOutOfBoundsException",
        ]
    );
    assert_eq!(local.root(), Some(&"Object"));
}

#[rstest]
fn given_no_nodes_when_taking_local_tree_then_root_absent(classes: ClassTree) {
    assert_eq!(classes.local_tree(Vec::<&Class>::new()).unwrap_err(), TreeError::RootAbsent);
}

#[test]
fn given_guarded_tree_when_deriving_then_options_carry_over() {
    let guarded = ClassTree::from_nodes_with_options(
        is_object,
        extends,
        CLASSES,
        TreeOptions { cycle_guard: true },
    )
    .unwrap();
    assert!(guarded.subtree(&"Error").unwrap().options().cycle_guard);
    assert!(guarded.local_tree([&"Error"]).unwrap().options().cycle_guard);
}

// ============================================================
// Traversal
// ============================================================

#[rstest]
fn given_class_tree_when_iterating_then_every_node_once(classes: ClassTree) {
    let visited: Vec<Class> = classes.iter().copied().collect();
    assert_eq!(visited.len(), CLASSES.len());
    assert_eq!(visited[0], "Object");
    assert_eq!(classes.iter_postorder().last(), Some(&"Object"));
}

#[rstest]
fn given_class_tree_when_listing_leaves_then_childless_classes(classes: ClassTree) {
    let leaves = classes.leaf_nodes();
    assert_eq!(leaves.len(), 12);
    assert!(leaves.iter().all(|leaf| classes.find_children(leaf).is_empty()));
    assert_eq!(classes.depth(), 5);
}
