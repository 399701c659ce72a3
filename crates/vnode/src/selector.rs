//! Selector strings: `tag[#id][.class1.class2...]`

/// Selector marking a reconstructed comment
pub const COMMENT: &str = "!";

/// How the `class` attribute is broken into tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassSplit {
    /// Split on every single `' '`. Runs of spaces produce empty tokens,
    /// so `"a  b"` becomes `.a..b`. This is what the engine's own DOM
    /// reader does and what existing markup keys rely on.
    #[default]
    SingleSpace,
    /// Split on any whitespace run and drop empty tokens.
    Whitespace,
}

/// Build an element selector
///
/// The tag is lower-cased. Empty `id` / `class` values add nothing.
pub fn build(tag: &str, id: Option<&str>, class: Option<&str>, split: ClassSplit) -> String {
    let mut sel = tag.to_lowercase();

    if let Some(id) = id.filter(|id| !id.is_empty()) {
        sel.push('#');
        sel.push_str(id);
    }

    if let Some(class) = class.filter(|class| !class.is_empty()) {
        match split {
            ClassSplit::SingleSpace => push_classes(&mut sel, class.split(' ')),
            ClassSplit::Whitespace => push_classes(&mut sel, class.split_whitespace()),
        }
    }

    sel
}

fn push_classes<'a>(sel: &mut String, tokens: impl Iterator<Item = &'a str>) {
    for token in tokens {
        sel.push('.');
        sel.push_str(token);
    }
}

/// A selector split back into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorParts<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    pub classes: Vec<&'a str>,
}

/// Split a selector the way the engine does: the id runs from the first
/// `#` to the next `.`, classes follow that `.`.
pub fn parse(sel: &str) -> SelectorParts<'_> {
    let hash = sel.find('#');
    let dot = match hash {
        Some(h) => sel[h..].find('.').map(|d| d + h),
        None => sel.find('.'),
    };
    let tag_end = hash.or(dot).unwrap_or(sel.len());

    SelectorParts {
        tag: &sel[..tag_end],
        id: hash.map(|h| &sel[h + 1..dot.unwrap_or(sel.len())]),
        classes: dot
            .map(|d| sel[d + 1..].split('.').collect())
            .unwrap_or_default(),
    }
}
