use std::collections::BTreeSet;

/// Text decorations that map to one bit of the output format mask instead of
/// a CSS declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Decoration {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
}

impl Decoration {
    pub const fn bit(self) -> u32 {
        match self {
            Decoration::Bold => 1,
            Decoration::Italic => 2,
            Decoration::Strikethrough => 4,
            Decoration::Underline => 8,
            Decoration::Code => 16,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "bold" => Some(Decoration::Bold),
            "italic" => Some(Decoration::Italic),
            "strikethrough" => Some(Decoration::Strikethrough),
            "underline" => Some(Decoration::Underline),
            "code" => Some(Decoration::Code),
            _ => None,
        }
    }
}

/// A style token resolved to either a format-mask decoration or a CSS
/// declaration used verbatim on the run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolvedStyle {
    Decoration(Decoration),
    Declaration(String),
}

/// Known font family names, matched lowercased. A bare token naming one of
/// these resolves to a `font-family` declaration.
#[derive(Debug, Clone)]
pub struct FontCatalog {
    names: BTreeSet<String>,
}

const DEFAULT_FONTS: &[&str] = &[
    "arial",
    "calibri",
    "cambria",
    "comic sans ms",
    "courier new",
    "garamond",
    "georgia",
    "helvetica",
    "impact",
    "lato",
    "merriweather",
    "montserrat",
    "nunito",
    "open sans",
    "oswald",
    "palatino",
    "poppins",
    "raleway",
    "roboto",
    "tahoma",
    "times new roman",
    "trebuchet ms",
    "verdana",
];

impl FontCatalog {
    /// Built-in catalog extended with additional family names.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        catalog
            .names
            .extend(extra.into_iter().map(|name| name.as_ref().to_lowercase()));
        catalog
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self {
            names: DEFAULT_FONTS.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

/// Maps raw style tokens to their run-level meaning.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    fonts: FontCatalog,
}

impl StyleResolver {
    pub fn new(fonts: FontCatalog) -> Self {
        Self { fonts }
    }

    /// Resolves one raw style token. Empty tokens resolve to nothing; unknown
    /// tokens pass through verbatim as literal declarations.
    ///
    /// Non-decoration rules apply in order, first match wins: `bg-` prefix,
    /// `rgba` prefix, bare three-digit weight, `px` suffix, known font name.
    pub fn resolve(&self, token: &str) -> Option<ResolvedStyle> {
        let token = token.to_lowercase();
        if token.is_empty() {
            return None;
        }

        if let Some(decoration) = Decoration::from_token(&token) {
            return Some(ResolvedStyle::Decoration(decoration));
        }

        let declaration = if let Some(color) = token.strip_prefix("bg-") {
            format!("background-color: {color};")
        } else if token.starts_with("rgba") {
            format!("color: {token};")
        } else if token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit()) {
            format!("font-weight: {token};")
        } else if token.ends_with("px") {
            format!("font-size: {token};")
        } else if self.fonts.contains(&token) {
            format!("font-family: {token};")
        } else {
            token
        };

        Some(ResolvedStyle::Declaration(declaration))
    }
}

/// OR of the decoration bits present in a run's style set.
pub fn format_bits(styles: &BTreeSet<ResolvedStyle>) -> u32 {
    styles.iter().fold(0, |bits, style| match style {
        ResolvedStyle::Decoration(decoration) => bits | decoration.bit(),
        ResolvedStyle::Declaration(_) => bits,
    })
}

/// Joins the non-decoration declarations with `;`, in the set's own
/// (ascending) iteration order, collapsing the doubled separators left by
/// declarations that already end in one.
pub fn style_string(styles: &BTreeSet<ResolvedStyle>) -> String {
    let joined = styles
        .iter()
        .filter_map(|style| match style {
            ResolvedStyle::Declaration(declaration) => Some(declaration.as_str()),
            ResolvedStyle::Decoration(_) => None,
        })
        .collect::<Vec<_>>()
        .join(";");
    collapse_semicolons(&joined)
}

fn collapse_semicolons(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_was_semicolon = false;
    for ch in s.chars() {
        if ch == ';' {
            if previous_was_semicolon {
                continue;
            }
            previous_was_semicolon = true;
        } else {
            previous_was_semicolon = false;
        }
        out.push(ch);
    }
    out
}
