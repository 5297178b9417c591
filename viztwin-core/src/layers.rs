//! Layer tree and highlight state for the dashboard viewer.
//!
//! Layers are organized as groups owning their element layers. An element
//! is drawn only when both it and every enclosing group are visible. Group
//! flags never overwrite child flags, so hiding and re-showing a group
//! restores the children exactly as they were.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::VizTwinError;

/// Building element categories a face or overlay can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Walls,
    Floors,
    Ceilings,
    Columns,
    Beams,
    Doors,
    Windows,
    Stairs,
    Hvac,
    Plumbing,
    Electrical,
}

impl Layer {
    pub const ALL: [Layer; 11] = [
        Layer::Walls,
        Layer::Floors,
        Layer::Ceilings,
        Layer::Columns,
        Layer::Beams,
        Layer::Doors,
        Layer::Windows,
        Layer::Stairs,
        Layer::Hvac,
        Layer::Plumbing,
        Layer::Electrical,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Layer::Walls => "walls",
            Layer::Floors => "floors",
            Layer::Ceilings => "ceilings",
            Layer::Columns => "columns",
            Layer::Beams => "beams",
            Layer::Doors => "doors",
            Layer::Windows => "windows",
            Layer::Stairs => "stairs",
            Layer::Hvac => "hvac",
            Layer::Plumbing => "plumbing",
            Layer::Electrical => "electrical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Layer::Walls => "Walls",
            Layer::Floors => "Floors",
            Layer::Ceilings => "Ceilings",
            Layer::Columns => "Columns",
            Layer::Beams => "Beams",
            Layer::Doors => "Doors",
            Layer::Windows => "Windows",
            Layer::Stairs => "Stairs",
            Layer::Hvac => "HVAC",
            Layer::Plumbing => "Plumbing",
            Layer::Electrical => "Electrical",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Layer {
    type Err = VizTwinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layer::ALL
            .into_iter()
            .find(|layer| layer.id() == s)
            .ok_or_else(|| VizTwinError::UnknownLayer(s.to_string()))
    }
}

/// Top-level layer groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupId {
    Structure,
    Architecture,
    Mep,
}

impl GroupId {
    pub const ALL: [GroupId; 3] = [GroupId::Structure, GroupId::Architecture, GroupId::Mep];

    pub fn id(&self) -> &'static str {
        match self {
            GroupId::Structure => "structure",
            GroupId::Architecture => "architecture",
            GroupId::Mep => "mep",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupId::Structure => "Structure",
            GroupId::Architecture => "Architecture",
            GroupId::Mep => "MEP Systems",
        }
    }
}

/// Identifies any node of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Group(GroupId),
    Layer(Layer),
}

impl From<Layer> for NodeId {
    fn from(layer: Layer) -> Self {
        NodeId::Layer(layer)
    }
}

impl From<GroupId> for NodeId {
    fn from(group: GroupId) -> Self {
        NodeId::Group(group)
    }
}

impl FromStr for NodeId {
    type Err = VizTwinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(group) = GroupId::ALL.into_iter().find(|g| g.id() == s) {
            return Ok(NodeId::Group(group));
        }
        s.parse().map(NodeId::Layer)
    }
}

/// A node of the layer tree. Groups own their children by value.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerNode {
    Group {
        id: GroupId,
        visible: bool,
        expanded: bool,
        children: Vec<LayerNode>,
    },
    Element {
        layer: Layer,
        visible: bool,
    },
}

impl LayerNode {
    pub fn group(id: GroupId, expanded: bool, layers: &[Layer]) -> Self {
        LayerNode::Group {
            id,
            visible: true,
            expanded,
            children: layers.iter().map(|&layer| LayerNode::element(layer)).collect(),
        }
    }

    pub fn element(layer: Layer) -> Self {
        LayerNode::Element { layer, visible: true }
    }

    pub fn node_id(&self) -> NodeId {
        match self {
            LayerNode::Group { id, .. } => NodeId::Group(*id),
            LayerNode::Element { layer, .. } => NodeId::Layer(*layer),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LayerNode::Group { id, .. } => id.label(),
            LayerNode::Element { layer, .. } => layer.label(),
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            LayerNode::Group { visible, .. } | LayerNode::Element { visible, .. } => *visible,
        }
    }

    /// Effective visibility of `layer` within this subtree, if it is found
    fn resolve(&self, layer: Layer) -> Option<bool> {
        match self {
            LayerNode::Element { layer: own, visible } => (*own == layer).then_some(*visible),
            LayerNode::Group { visible, children, .. } => children
                .iter()
                .find_map(|child| child.resolve(layer))
                .map(|child_visible| *visible && child_visible),
        }
    }

    fn find_mut(&mut self, target: NodeId) -> Option<&mut LayerNode> {
        if self.node_id() == target {
            return Some(self);
        }
        match self {
            LayerNode::Group { children, .. } => {
                children.iter_mut().find_map(|child| child.find_mut(target))
            }
            LayerNode::Element { .. } => None,
        }
    }
}

/// The layer panel state
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTree {
    roots: Vec<LayerNode>,
}

impl LayerTree {
    pub fn new(roots: Vec<LayerNode>) -> Self {
        Self { roots }
    }

    /// Whether faces and overlays tagged with `layer` should be drawn.
    /// Layers missing from the tree are never visible.
    pub fn is_visible(&self, layer: Layer) -> bool {
        self.roots
            .iter()
            .find_map(|node| node.resolve(layer))
            .unwrap_or(false)
    }

    /// Flip the visibility flag of a group or element. Returns false if the
    /// node does not exist.
    pub fn toggle_visibility(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        match self.find_mut(id) {
            Some(LayerNode::Group { visible, .. }) | Some(LayerNode::Element { visible, .. }) => {
                *visible = !*visible;
                log::debug!("layer {:?} visible={}", id, visible);
                true
            }
            None => false,
        }
    }

    /// Flip whether a group's children are listed. Elements have no
    /// expansion state and are ignored.
    pub fn toggle_expanded(&mut self, group: GroupId) -> bool {
        match self.find_mut(NodeId::Group(group)) {
            Some(LayerNode::Group { expanded, .. }) => {
                *expanded = !*expanded;
                true
            }
            _ => false,
        }
    }

    /// Rows of the layer panel in display order, with nesting depth.
    /// Children of collapsed groups are skipped.
    pub fn rows(&self) -> Vec<(usize, &LayerNode)> {
        fn walk<'a>(node: &'a LayerNode, depth: usize, out: &mut Vec<(usize, &'a LayerNode)>) {
            out.push((depth, node));
            if let LayerNode::Group {
                expanded: true,
                children,
                ..
            } = node
            {
                for child in children {
                    walk(child, depth + 1, out);
                }
            }
        }

        let mut rows = Vec::new();
        for root in &self.roots {
            walk(root, 0, &mut rows);
        }
        rows
    }

    fn find_mut(&mut self, id: NodeId) -> Option<&mut LayerNode> {
        self.roots.iter_mut().find_map(|node| node.find_mut(id))
    }
}

impl Default for LayerTree {
    fn default() -> Self {
        Self::new(vec![
            LayerNode::group(
                GroupId::Structure,
                true,
                &[Layer::Walls, Layer::Floors, Layer::Ceilings, Layer::Columns, Layer::Beams],
            ),
            LayerNode::group(
                GroupId::Architecture,
                true,
                &[Layer::Doors, Layer::Windows, Layer::Stairs],
            ),
            LayerNode::group(
                GroupId::Mep,
                false,
                &[Layer::Hvac, Layer::Plumbing, Layer::Electrical],
            ),
        ])
    }
}

/// Per-layer highlight switches, independent of visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSet {
    flags: BTreeMap<Layer, bool>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self {
            flags: Layer::ALL.into_iter().map(|layer| (layer, false)).collect(),
        }
    }

    pub fn is_highlighted(&self, layer: Layer) -> bool {
        self.flags.get(&layer).copied().unwrap_or(false)
    }

    /// Returns the new state
    pub fn toggle(&mut self, layer: Layer) -> bool {
        let flag = self.flags.entry(layer).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, bool)> + '_ {
        self.flags.iter().map(|(layer, flag)| (*layer, *flag))
    }
}

impl Default for HighlightSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_visible_by_default() {
        let tree = LayerTree::default();
        for layer in Layer::ALL {
            assert!(tree.is_visible(layer), "{layer} should start visible");
        }
    }

    #[test]
    fn test_hidden_group_hides_children() {
        let mut tree = LayerTree::default();
        assert!(tree.toggle_visibility(GroupId::Mep));
        for layer in [Layer::Hvac, Layer::Plumbing, Layer::Electrical] {
            assert!(!tree.is_visible(layer));
        }
        // other groups untouched
        assert!(tree.is_visible(Layer::Walls));
        assert!(tree.is_visible(Layer::Doors));
    }

    #[test]
    fn test_group_restores_child_state() {
        let mut tree = LayerTree::default();
        tree.toggle_visibility(Layer::Floors);
        tree.toggle_visibility(GroupId::Structure);
        assert!(!tree.is_visible(Layer::Walls));
        assert!(!tree.is_visible(Layer::Floors));

        tree.toggle_visibility(GroupId::Structure);
        assert!(tree.is_visible(Layer::Walls));
        assert!(!tree.is_visible(Layer::Floors));
    }

    #[test]
    fn test_child_toggle_under_hidden_group() {
        let mut tree = LayerTree::default();
        tree.toggle_visibility(GroupId::Mep);
        tree.toggle_visibility(Layer::Hvac);
        tree.toggle_visibility(Layer::Hvac);
        assert!(!tree.is_visible(Layer::Hvac));
    }

    #[test]
    fn test_missing_layer_is_hidden() {
        let tree = LayerTree::new(vec![LayerNode::group(GroupId::Structure, true, &[Layer::Walls])]);
        assert!(!tree.is_visible(Layer::Doors));
        let mut tree = tree;
        assert!(!tree.toggle_visibility(Layer::Doors));
    }

    #[test]
    fn test_rows_respect_expansion() {
        let mut tree = LayerTree::default();
        // 3 groups + 5 + 3 expanded children, mep collapsed
        assert_eq!(tree.rows().len(), 11);
        tree.toggle_expanded(GroupId::Mep);
        assert_eq!(tree.rows().len(), 14);
        tree.toggle_expanded(GroupId::Structure);
        assert_eq!(tree.rows().len(), 9);
        assert!(tree.is_visible(Layer::Walls));
    }

    #[test]
    fn test_node_id_parse() {
        assert_eq!("mep".parse::<NodeId>().unwrap(), NodeId::Group(GroupId::Mep));
        assert_eq!("hvac".parse::<NodeId>().unwrap(), NodeId::Layer(Layer::Hvac));
        assert!(matches!(
            "roof".parse::<NodeId>(),
            Err(VizTwinError::UnknownLayer(name)) if name == "roof"
        ));
    }

    #[test]
    fn test_highlights_independent() {
        let mut tree = LayerTree::default();
        let mut highlights = HighlightSet::new();
        assert!(highlights.toggle(Layer::Walls));
        tree.toggle_visibility(Layer::Walls);
        assert!(highlights.is_highlighted(Layer::Walls));
        assert!(!highlights.is_highlighted(Layer::Floors));
        assert!(!highlights.toggle(Layer::Walls));
    }

    #[test]
    fn test_highlight_iter_in_layer_order() {
        let mut highlights = HighlightSet::new();
        highlights.toggle(Layer::Doors);
        highlights.toggle(Layer::Walls);
        let lit: Vec<Layer> = highlights
            .iter()
            .filter(|(_, on)| *on)
            .map(|(layer, _)| layer)
            .collect();
        assert_eq!(lit, vec![Layer::Walls, Layer::Doors]);
        assert_eq!(highlights.iter().count(), Layer::ALL.len());
    }
}
