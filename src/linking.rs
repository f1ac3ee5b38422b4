//! Link legality rules and commit-time type inference.
//!
//! [`validate_link`] is a pure predicate over two anchor locators and the
//! current graph. It runs continuously while the user drags a link (to
//! color the preview and the cursor) and once more at commit time; the
//! graph store itself never checks legality.
//!
//! Rules are evaluated in a fixed order and the first failing rule is
//! reported, so feedback is stable while the pointer sits still.

use log::debug;
use thiserror::Error;

use crate::anchor::{AnchorRef, AnchorType, Side};
use crate::blueprint::Blueprint;

/// Why a prospective link was rejected.
///
/// Rejections are transient interaction feedback; they are never stored
/// in the graph.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LinkError {
    #[error("cannot link a node to itself")]
    SameNode,
    #[error("branch anchors can only link to branch anchors")]
    BranchToData,
    #[error("{0} cannot link to {0}")]
    SameSide(Side),
    #[error("type mismatch: {0} cannot link to {1}")]
    TypeMismatch(AnchorType, AnchorType),
    #[error("anchor {0} does not resolve to a live node")]
    DanglingAnchor(AnchorRef),
}

/// Decide whether linking `a` to `b` is legal in the current graph.
///
/// Checked in order, first failure wins:
/// 1. both ends on the same node;
/// 2. either end fails to resolve;
/// 3. branch to non-branch;
/// 4. branch to branch on the same side;
/// 5. differing concrete types, unless one end is `any`.
pub fn validate_link(
    blueprint: &Blueprint,
    a: &AnchorRef,
    b: &AnchorRef,
) -> Result<(), LinkError> {
    if a.node == b.node {
        return Err(LinkError::SameNode);
    }
    let anchor_a = blueprint
        .resolve(a)
        .ok_or_else(|| LinkError::DanglingAnchor(a.clone()))?;
    let anchor_b = blueprint
        .resolve(b)
        .ok_or_else(|| LinkError::DanglingAnchor(b.clone()))?;

    if anchor_a.ty.is_branch() != anchor_b.ty.is_branch() {
        return Err(LinkError::BranchToData);
    }
    if anchor_a.ty.is_branch() {
        if a.side == b.side {
            return Err(LinkError::SameSide(a.side));
        }
        return Ok(());
    }
    if !anchor_a.ty.is_any() && !anchor_b.ty.is_any() && anchor_a.ty != anchor_b.ty {
        return Err(LinkError::TypeMismatch(
            anchor_a.ty.clone(),
            anchor_b.ty.clone(),
        ));
    }
    Ok(())
}

/// One-shot `any` inference at link commit.
///
/// An `any` endpoint takes on the other endpoint's concrete type. The
/// rebind happens exactly once, here; `unlink` does not undo it (node
/// behaviors that want to reset a type do so in their own unlink hook).
pub fn infer_link_types(blueprint: &mut Blueprint, a: &AnchorRef, b: &AnchorRef) {
    let ty_a = blueprint.resolve(a).map(|anchor| anchor.ty.clone());
    let ty_b = blueprint.resolve(b).map(|anchor| anchor.ty.clone());
    let (Some(ty_a), Some(ty_b)) = (ty_a, ty_b) else {
        return;
    };
    if ty_a.is_any() && !ty_b.is_any() {
        if let Some(anchor) = blueprint.resolve_mut(a) {
            debug!("inferred {a}: any -> {ty_b}");
            anchor.ty = ty_b;
        }
    } else if ty_b.is_any() && !ty_a.is_any() {
        if let Some(anchor) = blueprint.resolve_mut(b) {
            debug!("inferred {b}: any -> {ty_a}");
            anchor.ty = ty_a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Anchor;
    use crate::geom::Point;
    use crate::node::Node;
    use crate::uid::{Uid, UidAllocator};

    fn node_with(
        uids: &mut UidAllocator,
        anchors: &[(Side, &'static str, AnchorType)],
    ) -> Node {
        let mut node = Node::new(uids, "test", "Test");
        for (side, name, ty) in anchors {
            node = node.with_anchor(*side, *name, Anchor::new(*name, ty.clone()));
        }
        node
    }

    fn fixture(
        a_anchors: &[(Side, &'static str, AnchorType)],
        b_anchors: &[(Side, &'static str, AnchorType)],
    ) -> (Blueprint, Uid, Uid) {
        let mut uids = UidAllocator::new();
        let mut bp = Blueprint::new();
        let a = bp.add_node(node_with(&mut uids, a_anchors), Point::ZERO);
        let b = bp.add_node(node_with(&mut uids, b_anchors), Point::new(300.0, 0.0));
        (bp, a, b)
    }

    // ========================================================================
    // Rule order and rejections
    // ========================================================================

    #[test]
    fn test_same_node_rejected_before_anything_else() {
        let (bp, a, _) = fixture(
            &[
                (Side::Left, "in", AnchorType::Branch),
                (Side::Right, "out", AnchorType::Int),
            ],
            &[],
        );
        // Branch vs int would also fail, but same-node wins.
        let err = validate_link(
            &bp,
            &AnchorRef::new(a, Side::Left, "in"),
            &AnchorRef::new(a, Side::Right, "out"),
        )
        .unwrap_err();
        assert_eq!(err, LinkError::SameNode);
    }

    #[test]
    fn test_dangling_ref_is_reported_not_panicked() {
        let (bp, a, _) = fixture(&[(Side::Right, "out", AnchorType::Int)], &[]);
        let ghost = AnchorRef::new(999, Side::Left, "in");
        let err = validate_link(&bp, &AnchorRef::new(a, Side::Right, "out"), &ghost)
            .unwrap_err();
        assert_eq!(err, LinkError::DanglingAnchor(ghost));
    }

    #[test]
    fn test_branch_to_data_rejected() {
        let (bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Branch)],
            &[(Side::Left, "in", AnchorType::Int)],
        );
        let err = validate_link(
            &bp,
            &AnchorRef::new(a, Side::Right, "out"),
            &AnchorRef::new(b, Side::Left, "in"),
        )
        .unwrap_err();
        assert_eq!(err, LinkError::BranchToData);
    }

    #[test]
    fn test_branch_same_side_rejected() {
        let (bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Branch)],
            &[(Side::Right, "out", AnchorType::Branch)],
        );
        let err = validate_link(
            &bp,
            &AnchorRef::new(a, Side::Right, "out"),
            &AnchorRef::new(b, Side::Right, "out"),
        )
        .unwrap_err();
        assert_eq!(err, LinkError::SameSide(Side::Right));
        assert_eq!(err.to_string(), "right cannot link to right");
    }

    #[test]
    fn test_branch_opposite_sides_accepted() {
        let (bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Branch)],
            &[(Side::Left, "in", AnchorType::Branch)],
        );
        assert!(validate_link(
            &bp,
            &AnchorRef::new(a, Side::Right, "out"),
            &AnchorRef::new(b, Side::Left, "in"),
        )
        .is_ok());
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let (bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Int)],
            &[(Side::Left, "in", AnchorType::Str)],
        );
        let err = validate_link(
            &bp,
            &AnchorRef::new(a, Side::Right, "out"),
            &AnchorRef::new(b, Side::Left, "in"),
        )
        .unwrap_err();
        assert_eq!(err, LinkError::TypeMismatch(AnchorType::Int, AnchorType::Str));
    }

    #[test]
    fn test_matching_types_accepted() {
        let (bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Str)],
            &[(Side::Left, "in", AnchorType::Str)],
        );
        assert!(validate_link(
            &bp,
            &AnchorRef::new(a, Side::Right, "out"),
            &AnchorRef::new(b, Side::Left, "in"),
        )
        .is_ok());
    }

    #[test]
    fn test_any_accepts_every_data_type() {
        for ty in [
            AnchorType::Bool,
            AnchorType::Str,
            AnchorType::nullable(AnchorType::Int),
            AnchorType::list(AnchorType::Image),
        ] {
            let (bp, a, b) = fixture(
                &[(Side::Right, "out", AnchorType::Any)],
                &[(Side::Left, "in", ty)],
            );
            assert!(validate_link(
                &bp,
                &AnchorRef::new(a, Side::Right, "out"),
                &AnchorRef::new(b, Side::Left, "in"),
            )
            .is_ok());
        }
    }

    // ========================================================================
    // Type inference
    // ========================================================================

    #[test]
    fn test_any_endpoint_infers_concrete_type() {
        let (mut bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Any)],
            &[(Side::Left, "in", AnchorType::Str)],
        );
        let ra = AnchorRef::new(a, Side::Right, "out");
        let rb = AnchorRef::new(b, Side::Left, "in");
        infer_link_types(&mut bp, &ra, &rb);

        assert_eq!(bp.resolve(&ra).unwrap().ty, AnchorType::Str);
        assert_eq!(bp.resolve(&rb).unwrap().ty, AnchorType::Str);
    }

    #[test]
    fn test_inference_is_symmetric() {
        let (mut bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Int)],
            &[(Side::Left, "in", AnchorType::Any)],
        );
        let ra = AnchorRef::new(a, Side::Right, "out");
        let rb = AnchorRef::new(b, Side::Left, "in");
        infer_link_types(&mut bp, &ra, &rb);
        assert_eq!(bp.resolve(&rb).unwrap().ty, AnchorType::Int);
    }

    #[test]
    fn test_two_any_endpoints_stay_any() {
        let (mut bp, a, b) = fixture(
            &[(Side::Right, "out", AnchorType::Any)],
            &[(Side::Left, "in", AnchorType::Any)],
        );
        let ra = AnchorRef::new(a, Side::Right, "out");
        let rb = AnchorRef::new(b, Side::Left, "in");
        infer_link_types(&mut bp, &ra, &rb);
        assert_eq!(bp.resolve(&ra).unwrap().ty, AnchorType::Any);
        assert_eq!(bp.resolve(&rb).unwrap().ty, AnchorType::Any);
    }
}
