//! A small storefront questionnaire used by the runnable example and the tests.

use crate::config::TreeConfig;
use crate::node::{Node, Row, Tree};

fn question(label: &str) -> Node<String> {
    Node::new(label, label.to_string())
}

fn labelled_rows(labels: &[&str]) -> Vec<Row<String>> {
    labels
        .iter()
        .map(|label| Row::new(*label, label.to_string()))
        .collect()
}

/// ```text
/// Home
/// Collections
///   Spring  [A, B, C]
///   Summer  [D, E, F]
///   Fall    [G, H, I]
///   Winter
/// About Us
/// My Account
///   Home
///   Addresses
///   Order History
/// ```
///
/// Payloads and row contents are the labels themselves.
pub fn sample_tree() -> Tree<String> {
    vec![
        question("Home"),
        question("Collections").children([
            question("Spring").rows(labelled_rows(&["A", "B", "C"])),
            question("Summer").rows(labelled_rows(&["D", "E", "F"])),
            question("Fall").rows(labelled_rows(&["G", "H", "I"])),
            question("Winter"),
        ]),
        question("About Us"),
        question("My Account").children([
            question("Home"),
            question("Addresses"),
            question("Order History"),
        ]),
    ]
}

/// Every toggle on, default indentation.
pub fn sample_config() -> TreeConfig {
    TreeConfig::default()
        .collapsible(true)
        .removable(true)
        .indicator(true)
}
