use crate::css::Specificity;
use app_units::Au;
use euclid::default::{Box2D, Point2D};
use std::collections::BTreeMap;
use std::fmt;

/// The winning declaration for a property, together with the specificity of
/// the selector it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadedValue {
    pub value: String,
    pub specificity: Specificity,
}

/// The raw result of the cascade for an element: property name to value.
///
/// Values are kept as source text; the typed views below parse what layout
/// needs out of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    declarations: BTreeMap<String, CascadedValue>,
}

impl ComputedStyle {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(|d| &*d.value)
    }

    pub fn cascaded(&self, property: &str) -> Option<&CascadedValue> {
        self.declarations.get(property)
    }

    /// Stores `value` unless the property already has a value from a more
    /// specific selector. Equal specificity overwrites, so later rules win.
    ///
    /// Returns whether the value was stored.
    pub fn apply(&mut self, property: &str, value: &str, specificity: Specificity) -> bool {
        if let Some(existing) = self.declarations.get(property) {
            if specificity < existing.specificity {
                return false;
            }
        }
        self.declarations.insert(
            property.to_owned(),
            CascadedValue {
                value: value.to_owned(),
                specificity,
            },
        );
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CascadedValue)> {
        self.declarations.iter().map(|(k, v)| (&**k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn display(&self) -> Display {
        keyword(self, "display", Display::from_ident)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Keyword)]
pub enum Display {
    None,
    Block,
    #[default]
    Inline,
    Flex,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Keyword)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Keyword)]
pub enum FlexWrap {
    #[default]
    Nowrap,
    Wrap,
    WrapReverse,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Keyword)]
pub enum JustifyContent {
    #[default]
    #[keyword(aliases = "start")]
    FlexStart,
    #[keyword(aliases = "end")]
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Keyword)]
pub enum AlignItems {
    #[keyword(aliases = "start")]
    FlexStart,
    #[keyword(aliases = "end")]
    FlexEnd,
    Center,
    #[default]
    Stretch,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Keyword)]
pub enum AlignContent {
    #[keyword(aliases = "start")]
    FlexStart,
    #[keyword(aliases = "end")]
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    #[default]
    Stretch,
}

/// Parses a keyword property, falling back to its initial value.
fn keyword<K: Default + fmt::Debug>(
    style: &ComputedStyle,
    property: &str,
    from_ident: fn(&str) -> Option<K>,
) -> K {
    let value = match style.get(property) {
        Some(v) => v,
        None => return K::default(),
    };
    match from_ident(value) {
        Some(k) => k,
        None => {
            let initial = K::default();
            debug!("Unknown {} value {:?}, using {:?}", property, value, initial);
            initial
        }
    }
}

/// Parses a length given as `<n>px` or a bare number. `auto`, other units and
/// garbage are unconstrained.
pub fn parse_length(value: &str) -> Option<Au> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        return None;
    }
    let number = match value.len().checked_sub(2) {
        Some(i) if value.is_char_boundary(i) && value[i..].eq_ignore_ascii_case("px") => {
            &value[..i]
        }
        _ => value,
    };
    match number.trim_end().parse::<f32>() {
        Ok(px) if px.is_finite() => Some(Au::from_f32_px(px)),
        _ => {
            debug!("Unsupported length {:?}", value);
            None
        }
    }
}

/// The properties of a flex container.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FlexContainerStyle {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
}

impl FlexContainerStyle {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            direction: keyword(style, "flex-direction", FlexDirection::from_ident),
            wrap: keyword(style, "flex-wrap", FlexWrap::from_ident),
            justify_content: keyword(style, "justify-content", JustifyContent::from_ident),
            align_items: keyword(style, "align-items", AlignItems::from_ident),
            align_content: keyword(style, "align-content", AlignContent::from_ident),
        }
    }
}

/// The properties of a flex item.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FlexItemStyle {
    pub order: i32,
    /// The flex grow factor, if any.
    pub flex: Option<f32>,
    /// `None` for `auto`, which defers to the container's `align-items`.
    pub align_self: Option<AlignItems>,
}

impl FlexItemStyle {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            order: style
                .get("order")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            flex: style
                .get("flex")
                .and_then(|v| v.trim().parse::<f32>().ok())
                .filter(|f| f.is_finite() && *f >= 0.0),
            align_self: style.get("align-self").and_then(AlignItems::from_ident),
        }
    }

    pub fn is_flexible(&self) -> bool {
        self.flex.map_or(false, |f| f > 0.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// The used geometry of an element, in physical coordinates.
///
/// Sizes come from the cascade and are then overwritten by layout; the sides
/// are only known for flex items once their container has been laid out.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub width: Option<Au>,
    pub height: Option<Au>,
    pub left: Option<Au>,
    pub right: Option<Au>,
    pub top: Option<Au>,
    pub bottom: Option<Au>,
}

impl ResolvedStyle {
    pub fn from_computed(style: &ComputedStyle) -> Self {
        Self {
            width: style.get("width").and_then(parse_length),
            height: style.get("height").and_then(parse_length),
            ..Default::default()
        }
    }

    pub fn size(&self, dimension: Dimension) -> Option<Au> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub fn set_size(&mut self, dimension: Dimension, size: Au) {
        match dimension {
            Dimension::Width => self.width = Some(size),
            Dimension::Height => self.height = Some(size),
        }
    }

    pub fn side(&self, side: Side) -> Option<Au> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn set_side(&mut self, side: Side, position: Au) {
        match side {
            Side::Left => self.left = Some(position),
            Side::Right => self.right = Some(position),
            Side::Top => self.top = Some(position),
            Side::Bottom => self.bottom = Some(position),
        }
    }

    /// The placed box, once all four sides are known.
    pub fn border_box(&self) -> Option<Box2D<Au>> {
        Some(Box2D::new(
            Point2D::new(self.left?, self.top?),
            Point2D::new(self.right?, self.bottom?),
        ))
    }
}
