//! Saving and loading blueprints.
//!
//! Nodes serialize as `{id, typeId, pos}` only; anchors belong to the node
//! type and are rebuilt by the catalog factory on load. Links serialize as
//! pairs of `(node, side, name)` locators. Restoring replays every link
//! through the graph store so link hooks fire and `any` type inference is
//! re-established, and forces every stored uid through the allocator so
//! nodes created afterwards can never collide.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::anchor::AnchorRef;
use crate::blueprint::Blueprint;
use crate::geom::Point;
use crate::linking::infer_link_types;
use crate::node::Node;
use crate::uid::{Uid, UidAllocator};

/// Per-node wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: Uid,
    #[serde(rename = "typeId")]
    pub type_id: String,
    pub pos: Point,
}

/// Per-link wire shape: the two endpoint locators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub a: AnchorRef,
    pub b: AnchorRef,
}

/// Whole-graph wire shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlueprintRecord {
    pub id: u64,
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

/// Why a stored blueprint could not be rebuilt.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RestoreError {
    /// The factory had no constructor for a stored `typeId`.
    #[error("unknown node type {0:?}")]
    UnknownNodeType(String),
    /// A stored link names an anchor no restored node has.
    #[error("stored link references missing anchor {0}")]
    DanglingLink(AnchorRef),
}

/// Snapshot a blueprint into its wire shape.
pub fn export(blueprint: &Blueprint) -> BlueprintRecord {
    BlueprintRecord {
        id: blueprint.id,
        nodes: blueprint
            .nodes()
            .iter()
            .map(|node| NodeRecord {
                id: node.uid(),
                type_id: node.type_id.clone(),
                pos: node.position,
            })
            .collect(),
        links: blueprint
            .links()
            .iter()
            .map(|link| LinkRecord {
                a: link.a.clone(),
                b: link.b.clone(),
            })
            .collect(),
    }
}

/// Rebuild a blueprint from its wire shape.
///
/// `factory` constructs a fresh node (uid auto-assigned, anchors
/// pre-populated) for a `typeId`, returning `None` for unknown types. The
/// stored uid is then forced onto the node and registered with the
/// allocator. Links are replayed through [`Blueprint::link`], so hooks
/// fire and `any` anchors re-infer their types exactly as they did when
/// the user drew the link.
pub fn restore<F>(
    record: &BlueprintRecord,
    uids: &mut UidAllocator,
    mut factory: F,
) -> Result<Blueprint, RestoreError>
where
    F: FnMut(&str, &mut UidAllocator) -> Option<Node>,
{
    let mut blueprint = Blueprint::new();
    blueprint.id = record.id;

    for stored in &record.nodes {
        let mut node = factory(&stored.type_id, uids)
            .ok_or_else(|| RestoreError::UnknownNodeType(stored.type_id.clone()))?;
        node.force_uid(stored.id, uids);
        blueprint.add_node(node, stored.pos);
    }

    for stored in &record.links {
        for end in [&stored.a, &stored.b] {
            if blueprint.resolve(end).is_none() {
                return Err(RestoreError::DanglingLink(end.clone()));
            }
        }
        blueprint.link(stored.a.clone(), stored.b.clone());
        infer_link_types(&mut blueprint, &stored.a, &stored.b);
    }

    debug!(
        "restored blueprint #{}: {} nodes, {} links",
        blueprint.id,
        blueprint.nodes().len(),
        blueprint.links().len()
    );
    Ok(blueprint)
}
