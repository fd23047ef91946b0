use crate::models::lexical::{LexicalNode, ListChild, ListItemNode, ListKind, ListNode};

/// One open list on the builder stack.
#[derive(Debug)]
struct ListFrame {
    list: ListNode,
    depth: u32,
}

/// Folds per-block conversion results, in document order, into the root
/// child sequence, reconstructing nested lists from flat (kind, depth) runs.
///
/// Frames own their list and attach to the parent when popped. This yields
/// the same tree as attaching on creation: while a deeper frame is open,
/// nothing else can be appended to its parent, so the attachment point never
/// moves.
#[derive(Debug, Default)]
pub struct ListTreeBuilder {
    root: Vec<LexicalNode>,
    stack: Vec<ListFrame>,
}

impl ListTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An ordinary node closes every open list and lands at the root.
    pub fn push_node(&mut self, node: LexicalNode) {
        self.close_all();
        self.root.push(node);
    }

    pub fn push_list_item(&mut self, kind: ListKind, depth: u32, item: ListItemNode) {
        // A kind change at the root level starts a new document region:
        // close the whole stack rather than nesting a sibling list. The same
        // change at depth > 0 instead opens a nested list below.
        if let Some(top) = self.stack.last()
            && top.depth == 0
            && top.list.kind != kind
        {
            self.close_all();
        }

        let top_depth = match self.stack.last() {
            Some(top) if top.list.kind == kind && top.depth >= depth => top.depth,
            _ => {
                // No list open, a deeper level starts, or the kind changed
                // below the root: open a new list seeded with the item.
                self.open_list(kind, depth, item);
                return;
            }
        };

        if top_depth > depth {
            // Step back out: close frames deeper than the item. The landing
            // list may still sit deeper than `depth` when the intermediate
            // depths were never opened; the item attaches to the nearest
            // enclosing list.
            while self.stack.last().is_some_and(|frame| frame.depth > depth) {
                self.close_one();
            }
        }

        match self.stack.last_mut() {
            Some(top) => top.list.children.push(ListChild::Item(item)),
            // Every open frame was deeper than the item and the stream never
            // opened a list this shallow; start one.
            None => self.open_list(kind, depth, item),
        }
    }

    /// Closes any lists still open and returns the finished root children.
    pub fn finish(mut self) -> Vec<LexicalNode> {
        self.close_all();
        self.root
    }

    fn open_list(&mut self, kind: ListKind, depth: u32, item: ListItemNode) {
        self.stack.push(ListFrame {
            list: ListNode {
                kind,
                children: vec![ListChild::Item(item)],
            },
            depth,
        });
    }

    fn close_one(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.list.children.push(ListChild::List(frame.list)),
            None => self.root.push(LexicalNode::List(frame.list)),
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_one();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lexical::{ElementKind, ElementNode, Run, TextRun};
    use pretty_assertions::assert_eq;

    fn item(text: &str) -> ListItemNode {
        ListItemNode {
            children: vec![Run::Text(TextRun {
                text: text.to_string(),
                format: 0,
                style: String::new(),
            })],
            class_name: None,
            direction: None,
        }
    }

    fn paragraph(text: &str) -> LexicalNode {
        LexicalNode::Element(ElementNode {
            kind: ElementKind::Paragraph,
            format: None,
            direction: None,
            indent: None,
            style: None,
            children: vec![Run::Text(TextRun {
                text: text.to_string(),
                format: 0,
                style: String::new(),
            })],
        })
    }

    fn item_texts(list: &ListNode) -> Vec<String> {
        list.children
            .iter()
            .map(|child| match child {
                ListChild::Item(item) => item.children[0].text().to_string(),
                ListChild::List(nested) => format!("[{}]", item_texts(nested).join(",")),
            })
            .collect()
    }

    #[test]
    fn depth_reduction_reattaches_to_the_outer_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Bullet, 0, item("a"));
        builder.push_list_item(ListKind::Bullet, 1, item("b"));
        builder.push_list_item(ListKind::Bullet, 1, item("c"));
        builder.push_list_item(ListKind::Bullet, 0, item("d"));
        let children = builder.finish();

        assert_eq!(children.len(), 1);
        let LexicalNode::List(list) = &children[0] else {
            panic!("expected a list at the root");
        };
        assert_eq!(list.kind, ListKind::Bullet);
        assert_eq!(item_texts(list), vec!["a", "[b,c]", "d"]);
    }

    #[test]
    fn kind_change_at_root_starts_a_sibling_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Bullet, 0, item("a"));
        builder.push_list_item(ListKind::Number, 0, item("b"));
        let children = builder.finish();

        assert_eq!(children.len(), 2);
        match (&children[0], &children[1]) {
            (LexicalNode::List(first), LexicalNode::List(second)) => {
                assert_eq!(first.kind, ListKind::Bullet);
                assert_eq!(item_texts(first), vec!["a"]);
                assert_eq!(second.kind, ListKind::Number);
                assert_eq!(item_texts(second), vec!["b"]);
            }
            other => panic!("expected two root lists, got {other:?}"),
        }
    }

    #[test]
    fn kind_change_below_root_nests_a_new_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Bullet, 0, item("a"));
        builder.push_list_item(ListKind::Bullet, 1, item("b"));
        builder.push_list_item(ListKind::Number, 1, item("c"));
        let children = builder.finish();

        assert_eq!(children.len(), 1);
        let LexicalNode::List(outer) = &children[0] else {
            panic!("expected a list at the root");
        };
        assert_eq!(item_texts(outer), vec!["a", "[b,[c]]"]);
    }

    #[test]
    fn non_list_node_closes_every_open_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Bullet, 0, item("a"));
        builder.push_list_item(ListKind::Bullet, 1, item("b"));
        builder.push_node(paragraph("between"));
        builder.push_list_item(ListKind::Bullet, 0, item("c"));
        let children = builder.finish();

        assert_eq!(children.len(), 3);
        assert!(matches!(&children[0], LexicalNode::List(_)));
        assert!(matches!(&children[1], LexicalNode::Element(_)));
        let LexicalNode::List(second) = &children[2] else {
            panic!("expected a trailing list");
        };
        assert_eq!(item_texts(second), vec!["c"]);
    }

    #[test]
    fn skipped_depths_attach_to_the_nearest_enclosing_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Bullet, 0, item("a"));
        builder.push_list_item(ListKind::Bullet, 3, item("b"));
        builder.push_list_item(ListKind::Bullet, 1, item("c"));
        let children = builder.finish();

        // Depth 1 was never opened, so "c" lands in the depth-0 list.
        let LexicalNode::List(outer) = &children[0] else {
            panic!("expected a list at the root");
        };
        assert_eq!(item_texts(outer), vec!["a", "[b]", "c"]);
    }

    #[test]
    fn depth_reduction_below_every_open_frame_opens_a_fresh_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Bullet, 2, item("a"));
        builder.push_list_item(ListKind::Bullet, 1, item("b"));
        let children = builder.finish();

        assert_eq!(children.len(), 2);
        match (&children[0], &children[1]) {
            (LexicalNode::List(first), LexicalNode::List(second)) => {
                assert_eq!(item_texts(first), vec!["a"]);
                assert_eq!(item_texts(second), vec!["b"]);
            }
            other => panic!("expected two root lists, got {other:?}"),
        }
    }

    #[test]
    fn same_depth_items_share_one_list() {
        let mut builder = ListTreeBuilder::new();
        builder.push_list_item(ListKind::Number, 0, item("a"));
        builder.push_list_item(ListKind::Number, 0, item("b"));
        builder.push_list_item(ListKind::Number, 0, item("c"));
        let children = builder.finish();

        assert_eq!(children.len(), 1);
        let LexicalNode::List(list) = &children[0] else {
            panic!("expected a list at the root");
        };
        assert_eq!(list.kind, ListKind::Number);
        assert_eq!(item_texts(list), vec!["a", "b", "c"]);
    }
}
