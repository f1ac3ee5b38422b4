//! Miniature node catalog used by the integration tests.
//!
//! The real catalog lives in the application; these three types exercise
//! the behavior hooks the same way: a validity rule on "print", a
//! type-reset-on-unlink on "const", and a plain source node.

use blueprint_editor::{
    Anchor, AnchorRef, AnchorType, Blueprint, Node, NodeBehavior, Side, UidAllocator,
};
use std::rc::Rc;

/// "print" requires its branch input to be linked.
pub struct PrintBehavior;

impl NodeBehavior for PrintBehavior {
    fn check_validity(&self, node: &Node, blueprint: &Blueprint) -> Vec<String> {
        let input = node.anchor_ref(Side::Left, "in");
        if blueprint.links_of(&input).is_none() {
            vec![format!("{}: branch input is not linked", node.display_name)]
        } else {
            Vec::new()
        }
    }
}

/// "const" resets its output to `any` when its link is removed, so the
/// next link can infer a fresh type.
pub struct ConstBehavior;

impl NodeBehavior for ConstBehavior {
    fn on_unlink(&self, node: &mut Node, _other: &AnchorRef) {
        if let Some(out) = node.anchor_mut(Side::Right, "out") {
            out.ty = AnchorType::Any;
        }
    }
}

/// Catalog factory keyed by type id, as the restore path expects.
pub fn make_node(type_id: &str, uids: &mut UidAllocator) -> Option<Node> {
    match type_id {
        "entry" => Some(Node::new(uids, "entry", "Entry").with_anchor(
            Side::Right,
            "out",
            Anchor::new("Start", AnchorType::Branch),
        )),
        "print" => Some(
            Node::new(uids, "print", "Print")
                .with_behavior(Rc::new(PrintBehavior))
                .with_anchor(Side::Left, "in", Anchor::new("In", AnchorType::Branch))
                .with_anchor(Side::Left, "msg", Anchor::new("Input", AnchorType::Str))
                .with_anchor(Side::Right, "out", Anchor::new("Out", AnchorType::Branch)),
        ),
        "const" => Some(
            Node::new(uids, "const", "Const")
                .with_behavior(Rc::new(ConstBehavior))
                .with_anchor(Side::Right, "out", Anchor::new("Value", AnchorType::Any)),
        ),
        _ => None,
    }
}
