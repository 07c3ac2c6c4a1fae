//! Debug rendering of tree shapes.

use crate::types::{BalancedNode, Link};

/// Renders a subtree one node per line with box-drawing branch glyphs.
/// `label` formats a single node's payload.
pub(crate) fn print_subtree<N, F>(link: &Link<N>, label: &F) -> String
where
    N: BalancedNode,
    F: Fn(&N) -> String,
{
    match link.as_deref() {
        None => "∅".to_string(),
        Some(node) => {
            let mut out = String::new();
            render(node, "", &mut out, label);
            out
        }
    }
}

fn render<N, F>(node: &N, tab: &str, out: &mut String, label: &F)
where
    N: BalancedNode,
    F: Fn(&N) -> String,
{
    out.push_str(&label(node));

    let children = [("L", node.left()), ("R", node.right())];
    let last = children.iter().rposition(|(_, link)| link.is_some());
    for (i, (tag, link)) in children.iter().enumerate() {
        let Some(child) = link.as_deref() else {
            continue;
        };
        let is_last = Some(i) == last;
        let branch = if is_last { "└─" } else { "├─" };
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        out.push(' ');
        out.push_str(tag);
        out.push_str(": ");
        render(child, &child_tab, out, label);
    }
}
