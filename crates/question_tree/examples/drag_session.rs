use dnd_question_tree::{
    DragOutcome, DragPayload, DropTarget, Node, Path, QuestionTreeState, TreeConfig, demo,
};

const CONFIG: &str = r#"{
    "indentation_width": 50,
    "collapsible": true,
    "removable": true
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = TreeConfig::from_json_str(CONFIG)?;
    let indent = config.indentation_width;
    let mut state = QuestionTreeState::new(demo::sample_tree()).with_config(config);

    println!("== initial ==");
    print_tree(state.tree());

    // Pull Winter out of Collections, dropping it below About Us.
    let winter = Path::from(["Collections", "Winter"]).key();
    state.on_drag_start(DragPayload::Question {
        path_key: winter.clone(),
    });
    state.on_drag_over(Some(DropTarget::Question(Path::from(["About Us"]).key())));
    state.on_drag_move(-indent);
    if let Some(projection) = state.projection() {
        println!(
            "projection: depth {} in [{}, {}], parent {:?}",
            projection.depth, projection.min_depth, projection.max_depth, projection.parent_path_key
        );
    }
    let outcome = state.on_drag_end(Some(DropTarget::Question(Path::from(["About Us"]).key())));
    report(&outcome);

    // My Account already has a Home question, so the root one can't go there.
    let home = Path::from(["Home"]).key();
    let addresses = Path::from(["My Account", "Addresses"]).key();
    state.on_drag_start(DragPayload::Question { path_key: home });
    state.on_drag_over(Some(DropTarget::Question(addresses.clone())));
    state.on_drag_move(indent);
    report(&state.on_drag_end(Some(DropTarget::Question(addresses))));

    let spring = Path::from(["Collections", "Spring"]).key();
    state.on_drag_start(DragPayload::Row {
        container: spring.clone(),
        row_id: "A".into(),
    });
    report(&state.on_drag_end(Some(DropTarget::Row {
        container: spring,
        row_id: "C".into(),
    })));

    state.toggle_collapse(&Path::from(["Collections"]));
    println!("== visible after collapsing Collections ==");
    for node in state.visible_nodes() {
        println!("{}{}", "  ".repeat(node.depth), node.payload);
    }

    println!("== final ==");
    print_tree(state.tree());
    println!("{}", serde_json::to_string_pretty(state.tree())?);

    Ok(())
}

fn report(outcome: &DragOutcome) {
    match outcome {
        DragOutcome::Moved { from, to, .. } => println!("moved {from} -> {to}"),
        DragOutcome::Rejected(projection) => {
            println!("rejected at depth {}", projection.depth)
        }
        DragOutcome::RowsReordered { container, reorder } => println!(
            "row {} in {container}: {} -> {}",
            reorder.row_id, reorder.from, reorder.to
        ),
        DragOutcome::Unchanged => println!("unchanged"),
    }
}

fn print_tree(tree: &[Node<String>]) {
    fn walk(items: &[Node<String>], depth: usize) {
        for node in items {
            let rows: Vec<&str> = node.rows.iter().map(|row| row.content.as_str()).collect();
            if rows.is_empty() {
                println!("{}{}", "  ".repeat(depth), node.payload);
            } else {
                println!("{}{} {rows:?}", "  ".repeat(depth), node.payload);
            }
            walk(&node.children, depth + 1);
        }
    }
    walk(tree, 0);
}
