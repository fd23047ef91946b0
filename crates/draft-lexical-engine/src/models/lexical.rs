use serde_json::Value;

/// A maximal-length slice of a block's text sharing one resolved style set
/// and link state.
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(TextRun),
    Link(LinkRun),
}

impl Run {
    /// The text covered by this run, unwrapping link runs.
    pub fn text(&self) -> &str {
        match self {
            Run::Text(t) => &t.text,
            Run::Link(l) => &l.child.text,
        }
    }
}

/// A styled text node. `format` is the decoration bitmask (bold 1, italic 2,
/// strikethrough 4, underline 8, code 16); `style` holds the joined CSS
/// declarations for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub format: u32,
    pub style: String,
}

/// A text run wrapped in a link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRun {
    pub child: TextRun,
    pub url: String,
    pub target: Option<String>,
    pub title: Option<String>,
    pub rel: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    Heading,
    Quote,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::Heading => "heading",
            ElementKind::Quote => "quote",
        }
    }
}

/// An ordinary block-level node (paragraph, heading or quote) with its
/// optional presentation fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub kind: ElementKind,
    pub format: Option<String>,
    pub direction: Option<String>,
    pub indent: Option<u32>,
    pub style: Option<String>,
    pub children: Vec<Run>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    pub fn list_type(self) -> &'static str {
        match self {
            ListKind::Bullet => "bullet",
            ListKind::Number => "number",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Number => "ol",
        }
    }
}

/// A list container. Owned exclusively by its parent (root or an enclosing
/// list) once appended; it only ever gains children, never moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub kind: ListKind,
    pub children: Vec<ListChild>,
}

/// Lists hold items and, for deeper levels, nested lists as direct siblings
/// of the items.
#[derive(Debug, Clone, PartialEq)]
pub enum ListChild {
    Item(ListItemNode),
    List(ListNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemNode {
    pub children: Vec<Run>,
    pub class_name: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableNode {
    pub col_widths: Vec<u32>,
    pub rows: Vec<TableRowNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRowNode {
    pub cells: Vec<TableCellNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCellNode {
    pub background_color: Option<String>,
    pub header: bool,
    pub children: Vec<Run>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub src: String,
    pub config: Value,
    pub hyperlink: Value,
    pub width: Value,
    pub height: Value,
}

/// Catch-all for entity nodes that keep their payload as opaque JSON:
/// embedded HTML, TeX tokens, media embeds and form/gallery/testimonial
/// widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedNode {
    pub kind: String,
    pub data: Value,
    pub config: Option<Value>,
}

/// Closed set of output node shapes. Serialization matches exhaustively; an
/// unknown shape cannot reach the output.
#[derive(Debug, Clone, PartialEq)]
pub enum LexicalNode {
    Element(ElementNode),
    List(ListNode),
    Table(TableNode),
    Image(ImageNode),
    Embed(EmbedNode),
    HorizontalRule,
}

/// The finished tree. Serializes with the shared `defaults` block that
/// downstream consumers use to fill in omitted per-node fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootNode {
    pub children: Vec<LexicalNode>,
}
