use std::collections::BTreeMap;

/// Namespace every node in the graph belongs to.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Handle to a node in a [`SceneGraph`] arena.
///
/// Ids are only meaningful for the graph that issued them and stay valid for
/// the graph's whole lifetime (nodes are never removed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
/// A drawable element: tag, attributes, optional text content, child links.
pub struct SceneNode {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// Arena-backed scene graph in the SVG namespace.
///
/// Nodes live in a growable arena addressed by [`NodeId`] indices, so
/// entities can hold copyable handles into the tree without parent pointers
/// or ownership cycles. The graph starts with a root `svg` element.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        let root = graph.create_element("svg");
        graph.set_attr(root, "xmlns", SVG_NS);
        graph.root = root;
        graph
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        });
        id
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.nodes[id.0].attrs.insert(name.to_string(), value.into());
    }

    /// Set a numeric attribute, formatted without a trailing `.0`.
    pub fn set_attr_num(&mut self, id: NodeId, name: &str, value: f64) {
        self.set_attr(id, name, fmt_number(value));
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = Some(text.into());
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Find the first direct or transitive child with the given tag,
    /// depth-first from the root.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find_by_tag_from(self.root, tag)
    }

    fn find_by_tag_from(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        for &child in &self.nodes[from.0].children {
            if self.nodes[child.0].tag == tag {
                return Some(child);
            }
            if let Some(found) = self.find_by_tag_from(child, tag) {
                return Some(found);
            }
        }
        None
    }

    /// Clone a foreign-document element into this graph, preserving
    /// attributes and children recursively. Direct text children are
    /// concatenated into the adopted element's text content. Returns a
    /// detached subtree.
    pub fn adopt_fragment(&mut self, source: roxmltree::Node<'_, '_>) -> NodeId {
        let id = self.create_element(source.tag_name().name());
        for attr in source.attributes() {
            self.set_attr(id, attr.name(), attr.value());
        }
        let mut text = String::new();
        for child in source.children() {
            if child.is_element() {
                let adopted = self.adopt_fragment(child);
                self.append_child(id, adopted);
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    if !t.trim().is_empty() {
                        text.push_str(t);
                    }
                }
            }
        }
        if !text.is_empty() {
            self.set_text(id, text);
        }
        id
    }
}

/// Format a coordinate the way a hand-written SVG would: integral values
/// without a fractional part, everything else with the shortest exact form.
pub(crate) fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_namespaced_svg() {
        let graph = SceneGraph::new();
        assert_eq!(graph.tag(graph.root()), "svg");
        assert_eq!(graph.attr(graph.root(), "xmlns"), Some(SVG_NS));
    }

    #[test]
    fn attributes_and_children_round_trip() {
        let mut graph = SceneGraph::new();
        let rect = graph.create_element("rect");
        graph.set_attr_num(rect, "width", 385.0);
        graph.set_attr_num(rect, "height", 192.5);
        graph.append_child(graph.root(), rect);

        assert_eq!(graph.attr(rect, "width"), Some("385"));
        assert_eq!(graph.attr(rect, "height"), Some("192.5"));
        assert_eq!(graph.children(graph.root()), &[rect]);
        assert_eq!(graph.find_by_tag("rect"), Some(rect));
    }

    #[test]
    fn adopt_fragment_preserves_structure() {
        let xml = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g width="40" height="80"><rect width="40" height="80"/><text>hi</text></g>
        </svg>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let g = doc
            .descendants()
            .find(|n| n.tag_name().name() == "g")
            .unwrap();

        let mut graph = SceneGraph::new();
        let adopted = graph.adopt_fragment(g);
        assert_eq!(graph.tag(adopted), "g");
        assert_eq!(graph.attr(adopted, "width"), Some("40"));
        assert_eq!(graph.children(adopted).len(), 2);

        let text = graph.children(adopted)[1];
        assert_eq!(graph.tag(text), "text");
        assert_eq!(graph.text(text), Some("hi"));
    }

    #[test]
    fn fmt_number_drops_trailing_zero() {
        assert_eq!(fmt_number(10.0), "10");
        assert_eq!(fmt_number(-3.0), "-3");
        assert_eq!(fmt_number(192.5), "192.5");
    }
}
