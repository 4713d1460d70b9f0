use dom::{Dom, NodeId};

/// CSS `display` value, restricted to the set traversal decisions depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    Ruby,
    RubyBase,
    RubyText,
    Flex,
    Grid,
    None,
}

/// CSS `position` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

/// The two computed properties the engine reads from the host document.
/// Neither is inherited, so computing one node never requires its ancestors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: Display,
    pub position: Position,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            display: Display::Block,
            position: Position::Static,
        }
    }
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "list-item" => Some(Display::ListItem),
        "ruby" => Some(Display::Ruby),
        "ruby-base" => Some(Display::RubyBase),
        "ruby-text" => Some(Display::RubyText),
        "flex" | "inline-flex" => Some(Display::Flex),
        "grid" | "inline-grid" => Some(Display::Grid),
        "none" => Some(Display::None),
        _ => None,
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        "fixed" => Some(Position::Fixed),
        "sticky" => Some(Position::Sticky),
        _ => None,
    }
}

/// Per-element default display, following the HTML defaults for the tags
/// that matter to inline traversal. Unknown tags default to block.
fn default_display_for(tag: &str) -> Display {
    match tag {
        "span" | "a" | "em" | "strong" | "b" | "i" | "u" | "small" | "big" | "code" | "mark"
        | "sub" | "sup" | "br" | "wbr" | "rb" => Display::Inline,
        "ruby" => Display::Ruby,
        "rt" | "rp" => Display::RubyText,
        "li" => Display::ListItem,
        _ => Display::Block,
    }
}

/// Computed style for a node. Elements start from the tag default and apply
/// their declarations; text nodes flow inline wherever they sit.
pub fn computed(dom: &Dom, id: NodeId) -> ComputedStyle {
    if dom.is_text(id) {
        return ComputedStyle {
            display: Display::Inline,
            position: Position::Static,
        };
    }
    let Some(name) = dom.element_name(id) else {
        return ComputedStyle::initial();
    };
    let mut result = ComputedStyle {
        display: default_display_for(name),
        position: Position::Static,
    };
    if let Some(decls) = dom.style_declarations(id) {
        for (prop, value) in decls {
            match prop.as_str() {
                "display" => {
                    if let Some(d) = parse_display(value) {
                        result.display = d;
                    }
                }
                "position" => {
                    if let Some(p) = parse_position(value) {
                        result.position = p;
                    }
                }
                // unknown declarations are ignored, as the cascade would
                _ => {}
            }
        }
    }
    result
}
