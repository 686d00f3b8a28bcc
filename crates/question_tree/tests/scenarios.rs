use dnd_question_tree::{
    DragOutcome, DragPayload, DropTarget, Node, Path, PathKey, QuestionTreeState, Tree,
    TreeConfig, remove_subtree,
};

fn item(id: &str, children: Vec<Node<()>>) -> Node<()> {
    Node::new(id, ()).children(children)
}

fn key(ids: &[&str]) -> PathKey {
    Path::from(ids).key()
}

fn dump(items: &[Node<()>], depth: usize, out: &mut String) {
    for node in items {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.id);
        out.push('\n');
        dump(&node.children, depth + 1, out);
    }
}

fn dumped(tree: &[Node<()>]) -> String {
    let mut s = String::new();
    dump(tree, 0, &mut s);
    s.trim().to_string()
}

fn store() -> Tree<()> {
    vec![
        item("Home", vec![]),
        item("Collections", vec![item("Spring", vec![]), item("Summer", vec![])]),
        item("About", vec![]),
    ]
}

/// Start a question drag, hover `over`, move by `units` indentation levels and drop.
fn drag(
    state: &mut QuestionTreeState<()>,
    active: &[&str],
    over: &[&str],
    units: f32,
) -> DragOutcome {
    let indent = state.config().indentation_width;
    state.on_drag_start(DragPayload::Question {
        path_key: key(active),
    });
    state.on_drag_over(Some(DropTarget::Question(key(over))));
    state.on_drag_move(units * indent);
    state.on_drag_end(Some(DropTarget::Question(key(over))))
}

#[test]
fn spring_over_about_without_offset_nests_under_about() {
    let mut state = QuestionTreeState::new(store());
    state.on_drag_start(DragPayload::Question {
        path_key: key(&["Collections", "Spring"]),
    });
    state.on_drag_over(Some(DropTarget::Question(key(&["About"]))));

    let projection = state.projection().unwrap();
    assert_eq!(projection.depth, 1);
    assert_eq!(projection.max_depth, 1);
    assert_eq!(projection.min_depth, 0);
    assert_eq!(projection.parent_path_key, Some(key(&["About"])));

    let outcome = state.on_drag_end(Some(DropTarget::Question(key(&["About"]))));
    assert!(matches!(outcome, DragOutcome::Moved { ref to, .. } if *to == key(&["About", "Spring"])));
    assert_eq!(
        dumped(state.tree()),
        r#"Home
Collections
  Summer
About
  Spring"#
    );
}

#[test]
fn spring_over_about_one_unit_left_goes_to_root_after_about() {
    let mut state = QuestionTreeState::new(store());
    let outcome = drag(&mut state, &["Collections", "Spring"], &["About"], -1.);

    let DragOutcome::Moved { from, to, projection } = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!(from, key(&["Collections", "Spring"]));
    assert_eq!(to, key(&["Spring"]));
    assert_eq!(projection.depth, 0);
    assert_eq!(projection.parent_path_key, None);
    assert!(projection.allowed);
    assert_eq!(
        dumped(state.tree()),
        r#"Home
Collections
  Summer
About
Spring"#
    );
}

#[test]
fn spring_over_summer_one_unit_left_lands_before_about() {
    let mut state = QuestionTreeState::new(store());
    let outcome = drag(&mut state, &["Collections", "Spring"], &["Collections", "Summer"], -1.);

    assert!(matches!(outcome, DragOutcome::Moved { .. }));
    assert_eq!(
        dumped(state.tree()),
        r#"Home
Collections
  Summer
Spring
About"#
    );
}

#[test]
fn summer_indented_under_spring() {
    let mut state = QuestionTreeState::new(store());
    let summer = ["Collections", "Summer"];
    let outcome = drag(&mut state, &summer, &summer, 1.);

    let DragOutcome::Moved { to, projection, .. } = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!(projection.depth, 2);
    assert_eq!(projection.parent_path_key, Some(key(&["Collections", "Spring"])));
    assert_eq!(to, key(&["Collections", "Spring", "Summer"]));
    assert_eq!(
        dumped(state.tree()),
        r#"Home
Collections
  Spring
    Summer
About"#
    );
}

#[test]
fn summer_indented_under_spring_that_has_a_summer_is_rejected() {
    let tree = vec![
        item("Home", vec![]),
        item(
            "Collections",
            vec![
                item("Spring", vec![item("Summer", vec![])]),
                item("Summer", vec![]),
            ],
        ),
        item("About", vec![]),
    ];
    let mut state = QuestionTreeState::new(tree.clone());
    let summer = ["Collections", "Summer"];
    let outcome = drag(&mut state, &summer, &summer, 1.);

    let DragOutcome::Rejected(projection) = outcome else {
        panic!("expected a rejection, got {outcome:?}");
    };
    assert!(!projection.allowed);
    assert_eq!(projection.parent_path_key, Some(key(&["Collections", "Spring"])));
    assert_eq!(state.tree(), tree.as_slice());
    assert!(!state.is_dragging());
}

#[test]
fn summer_over_spring_moves_before_it() {
    let mut state = QuestionTreeState::new(store());
    let outcome = drag(&mut state, &["Collections", "Summer"], &["Collections", "Spring"], 0.);

    let DragOutcome::Moved { to, projection, .. } = outcome else {
        panic!("expected a move, got {outcome:?}");
    };
    assert_eq!(projection.parent_path_key, Some(key(&["Collections"])));
    assert_eq!(to, key(&["Collections", "Summer"]));
    assert_eq!(
        dumped(state.tree()),
        r#"Home
Collections
  Summer
  Spring
About"#
    );
}

#[test]
fn collapsing_collections_hides_seasons_only() {
    let mut state =
        QuestionTreeState::new(store()).with_config(TreeConfig::default().collapsible(true));
    assert!(state.toggle_collapse(&Path::from(["Collections"])));
    assert_eq!(
        state.visible_path_keys(),
        vec![key(&["Home"]), key(&["Collections"]), key(&["About"])]
    );
    // Still in the tree.
    assert_eq!(state.child_count(&Path::from(["Collections"])), 2);

    assert!(state.toggle_collapse(&Path::from(["Collections"])));
    assert_eq!(state.visible_path_keys().len(), 5);
}

#[test]
fn removing_spring_leaves_summer() {
    let tree = remove_subtree(&store(), &Path::from(["Collections", "Spring"]));
    assert_eq!(
        dumped(&tree),
        r#"Home
Collections
  Summer
About"#
    );
}

#[test]
fn collapsed_node_moves_with_hidden_children() {
    let tree = vec![
        item("Home", vec![]),
        item("Collections", vec![item("Spring", vec![]), item("Summer", vec![])]).collapsed(true),
        item("About", vec![]),
    ];
    let mut state = QuestionTreeState::new(tree);
    assert_eq!(state.visible_path_keys().len(), 3);

    let outcome = drag(&mut state, &["Collections"], &["About"], 0.);
    assert!(matches!(outcome, DragOutcome::Moved { .. }));
    assert_eq!(
        dumped(state.tree()),
        r#"Home
About
Collections
  Spring
  Summer"#
    );
    assert!(state.tree()[2].collapsed);
}

#[test]
fn duplicate_hidden_in_collapsed_parent_still_rejects() {
    let tree = vec![
        item("Collections", vec![item("Home", vec![])]).collapsed(true),
        item("Home", vec![]),
    ];
    let mut state = QuestionTreeState::new(tree.clone());
    let outcome = drag(&mut state, &["Home"], &["Home"], 1.);

    // The visible list has no second Home, so only the commit sees the clash.
    let DragOutcome::Rejected(projection) = outcome else {
        panic!("expected a rejection, got {outcome:?}");
    };
    assert!(projection.allowed);
    assert_eq!(projection.parent_path_key, Some(key(&["Collections"])));
    assert_eq!(state.tree(), tree.as_slice());
}
