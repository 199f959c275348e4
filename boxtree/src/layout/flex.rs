//! Flexbox layout.
//!
//! This is a simplified version of the flex layout algorithm: items are
//! collected into lines, the free space of each line is distributed along
//! the main axis, and lines and items are then placed along the cross axis.
//! There are no margins, min/max sizes or baselines, and `flex` is just the
//! grow factor.
//!
//! Everything is computed on physical sides: the axes map the main and cross
//! directions to the sides of the box they start and end at.

use crate::dom::{Document, NodeId};
use crate::style::{
    AlignContent, AlignItems, Dimension, FlexContainerStyle, FlexDirection, FlexItemStyle,
    FlexWrap, JustifyContent, ResolvedStyle, Side,
};
use app_units::Au;
use std::cmp;

/// One of the two flex axes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Axis {
    /// The dimension measured along this axis.
    pub size: Dimension,
    /// The side items are packed from.
    pub start: Side,
    pub end: Side,
    /// Whether the axis runs against the physical direction, from right to
    /// left or bottom to top.
    pub reversed: bool,
}

impl Axis {
    const LEFT_TO_RIGHT: Self = Self::new(Dimension::Width, Side::Left, Side::Right, false);
    const RIGHT_TO_LEFT: Self = Self::new(Dimension::Width, Side::Right, Side::Left, true);
    const TOP_TO_BOTTOM: Self = Self::new(Dimension::Height, Side::Top, Side::Bottom, false);
    const BOTTOM_TO_TOP: Self = Self::new(Dimension::Height, Side::Bottom, Side::Top, true);

    const fn new(size: Dimension, start: Side, end: Side, reversed: bool) -> Self {
        Self {
            size,
            start,
            end,
            reversed,
        }
    }

    pub fn sign(&self) -> i32 {
        if self.reversed {
            -1
        } else {
            1
        }
    }

    /// The coordinate the first item starts at, given the size of the
    /// container along this axis.
    pub fn base(&self, container_size: Au) -> Au {
        if self.reversed {
            container_size
        } else {
            Au(0)
        }
    }

    /// Moves `from` by `length` in the direction of the axis.
    pub fn advance(&self, from: Au, length: Au) -> Au {
        from + length * self.sign()
    }

    fn reverse(self) -> Self {
        Self::new(self.size, self.end, self.start, !self.reversed)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AxisMapping {
    pub main: Axis,
    pub cross: Axis,
}

impl AxisMapping {
    pub fn new(direction: FlexDirection, wrap: FlexWrap) -> Self {
        let (main, cross) = match direction {
            FlexDirection::Row => (Axis::LEFT_TO_RIGHT, Axis::TOP_TO_BOTTOM),
            FlexDirection::RowReverse => (Axis::RIGHT_TO_LEFT, Axis::TOP_TO_BOTTOM),
            FlexDirection::Column => (Axis::TOP_TO_BOTTOM, Axis::LEFT_TO_RIGHT),
            FlexDirection::ColumnReverse => (Axis::BOTTOM_TO_TOP, Axis::LEFT_TO_RIGHT),
        };
        let cross = match wrap {
            FlexWrap::WrapReverse => cross.reverse(),
            FlexWrap::Nowrap | FlexWrap::Wrap => cross,
        };
        Self { main, cross }
    }
}

/// A child of a flex container: its flex properties and the geometry layout
/// reads from and writes to.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FlexItem {
    pub style: FlexItemStyle,
    pub geometry: ResolvedStyle,
}

/// Items of a line, as indices into the item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexLine {
    pub items: Vec<usize>,
    /// Main-axis space not taken by inflexible items. Negative on overflow.
    pub main_space_remaining: Au,
    /// The largest definite cross size among the inflexible items.
    pub cross_space_used: Au,
}

impl FlexLine {
    fn new(main_space: Au) -> Self {
        Self {
            items: Vec::new(),
            main_space_remaining: main_space,
            cross_space_used: Au(0),
        }
    }

    fn push(&mut self, index: usize, main_size: Au, cross_size: Option<Au>) {
        self.items.push(index);
        self.main_space_remaining -= main_size;
        if let Some(cross_size) = cross_size {
            self.cross_space_used = cmp::max(self.cross_space_used, cross_size);
        }
    }

    /// Flexible items take whatever is left, so they don't use up space.
    fn push_flexible(&mut self, index: usize) {
        self.items.push(index);
    }
}

/// Sets the size of `geometry` along `axis`, and its sides from `start`.
/// Returns the coordinate of the end side.
fn place(geometry: &mut ResolvedStyle, axis: &Axis, start: Au, size: Au) -> Au {
    let end = axis.advance(start, size);
    geometry.set_size(axis.size, size);
    geometry.set_side(axis.start, start);
    geometry.set_side(axis.end, end);
    end
}

fn sum(sizes: impl Iterator<Item = Au>) -> Au {
    sizes.fold(Au(0), |total, size| total + size)
}

/// Collects items into lines. Sizes of inflexible items along the main axis
/// are resolved on the way.
fn collect_lines(
    items: &mut [FlexItem],
    axes: &AxisMapping,
    container_main: Au,
    single_line: bool,
) -> Vec<FlexLine> {
    let mut lines = vec![FlexLine::new(container_main)];
    for (index, item) in items.iter_mut().enumerate() {
        if item.style.is_flexible() {
            if let Some(line) = lines.last_mut() {
                line.push_flexible(index);
            }
            continue;
        }

        let mut main_size = item.geometry.size(axes.main.size).unwrap_or(Au(0));
        if !single_line {
            main_size = cmp::min(main_size, container_main);
            let fits = lines
                .last()
                .map_or(false, |line| line.main_space_remaining >= main_size);
            if !fits {
                lines.push(FlexLine::new(container_main));
            }
        }
        item.geometry.set_size(axes.main.size, main_size);

        let cross_size = item.geometry.size(axes.cross.size);
        if let Some(line) = lines.last_mut() {
            line.push(index, main_size, cross_size);
        }
    }
    lines
}

/// Positions the items of `line` along the main axis.
fn layout_main_axis(
    style: &FlexContainerStyle,
    axis: &Axis,
    container_main: Au,
    line: &FlexLine,
    items: &mut [FlexItem],
) {
    let remaining = line.main_space_remaining;
    let base = axis.base(container_main);

    if remaining < Au(0) {
        let scale = container_main.to_f32_px() / (container_main - remaining).to_f32_px();
        debug!("Flex line overflows by {:?}, scaling by {}", -remaining, scale);
        let mut current = base;
        for &index in &line.items {
            let item = &mut items[index];
            let size = if item.style.is_flexible() {
                Au(0)
            } else {
                item.geometry.size(axis.size).unwrap_or(Au(0)).scale_by(scale)
            };
            current = place(&mut item.geometry, axis, current, size);
        }
        return;
    }

    let flex_total: f32 = line
        .items
        .iter()
        .filter_map(|&index| items[index].style.flex)
        .sum();
    if flex_total > 0.0 {
        let mut current = base;
        for &index in &line.items {
            let item = &mut items[index];
            let size = match item.style.flex {
                Some(flex) if flex > 0.0 => remaining.scale_by(flex / flex_total),
                _ => item.geometry.size(axis.size).unwrap_or(Au(0)),
            };
            current = place(&mut item.geometry, axis, current, size);
        }
        return;
    }

    let count = line.items.len() as i32;
    let (offset, gap) = match style.justify_content {
        JustifyContent::FlexStart => (Au(0), Au(0)),
        JustifyContent::FlexEnd => (remaining, Au(0)),
        JustifyContent::Center => (remaining / 2, Au(0)),
        JustifyContent::SpaceBetween if count > 1 => (Au(0), remaining / (count - 1)),
        JustifyContent::SpaceAround if count > 0 => {
            let gap = remaining / count;
            (gap / 2, gap)
        }
        JustifyContent::SpaceBetween | JustifyContent::SpaceAround => (Au(0), Au(0)),
    };
    let mut current = axis.advance(base, offset);
    for &index in &line.items {
        let item = &mut items[index];
        let size = item.geometry.size(axis.size).unwrap_or(Au(0));
        let end = place(&mut item.geometry, axis, current, size);
        current = axis.advance(end, gap);
    }
}

/// Lays out `items` inside a flex container, updating their geometry and the
/// container's sizes.
///
/// Items are expected in `order` order already.
pub fn layout_items(style: &FlexContainerStyle, container: &mut ResolvedStyle, items: &mut [FlexItem]) {
    let axes = AxisMapping::new(style.direction, style.wrap);
    let (main, cross) = (axes.main, axes.cross);

    let container_main = container.size(main.size);
    let single_line = style.wrap == FlexWrap::Nowrap || container_main.is_none();
    let container_main = match container_main {
        Some(size) => size,
        None => sum(items.iter().filter_map(|item| item.geometry.size(main.size))),
    };
    container.set_size(main.size, container_main);

    let mut lines = collect_lines(items, &axes, container_main, single_line);
    if single_line {
        if let (Some(line), Some(size)) = (lines.first_mut(), container.size(cross.size)) {
            line.cross_space_used = size;
        }
    }
    debug!(
        "Flex container {:?}: {} items in {} lines",
        style,
        items.len(),
        lines.len()
    );

    for line in &lines {
        layout_main_axis(style, &main, container_main, line, items);
    }

    let lines_cross = sum(lines.iter().map(|line| line.cross_space_used));
    let (container_cross, leftover) = match container.size(cross.size) {
        Some(size) => (size, size - lines_cross),
        None => {
            container.set_size(cross.size, lines_cross);
            (lines_cross, Au(0))
        }
    };

    let line_count = lines.len() as i32;
    let mut cross_base = cross.base(container_cross);
    let mut gap = Au(0);
    let mut line_growth = Au(0);
    if style.wrap != FlexWrap::Nowrap && leftover > Au(0) {
        match style.align_content {
            AlignContent::FlexStart => {}
            AlignContent::FlexEnd => cross_base = cross.advance(cross_base, leftover),
            AlignContent::Center => cross_base = cross.advance(cross_base, leftover / 2),
            AlignContent::SpaceBetween => {
                if line_count > 1 {
                    gap = leftover / (line_count - 1);
                }
            }
            AlignContent::SpaceAround => {
                gap = leftover / line_count;
                cross_base = cross.advance(cross_base, gap / 2);
            }
            AlignContent::Stretch => line_growth = leftover / line_count,
        }
    }

    for line in &lines {
        let line_cross = line.cross_space_used + line_growth;
        for &index in &line.items {
            let item = &mut items[index];
            let align = item.style.align_self.unwrap_or(style.align_items);
            let size = match item.geometry.size(cross.size) {
                Some(size) => size,
                None if align == AlignItems::Stretch => line_cross,
                None => Au(0),
            };
            let start = match align {
                AlignItems::FlexStart | AlignItems::Stretch => cross_base,
                AlignItems::FlexEnd => cross.advance(cross_base, line_cross - size),
                AlignItems::Center => cross.advance(cross_base, (line_cross - size) / 2),
            };
            place(&mut item.geometry, &cross, start, size);
        }
        cross_base = cross.advance(cross_base, line_cross + gap);
    }
}

/// Lays out the element children of the flex container `id`.
pub fn layout(document: &mut Document, id: NodeId) {
    let (style, mut geometry) = match document.element(id) {
        Some(element) => (
            FlexContainerStyle::from_computed(&element.computed_style),
            element.resolved_style,
        ),
        None => return,
    };

    let mut children = document
        .child_elements(id)
        .filter_map(|child| {
            let element = document.element(child)?;
            Some((
                child,
                FlexItem {
                    style: FlexItemStyle::from_computed(&element.computed_style),
                    geometry: element.resolved_style,
                },
            ))
        })
        .collect::<Vec<_>>();
    children.sort_by_key(|&(_, ref item)| item.style.order);

    let mut items = children.iter().map(|&(_, item)| item).collect::<Vec<_>>();
    layout_items(&style, &mut geometry, &mut items);

    for (&(child, _), item) in children.iter().zip(items) {
        if let Some(element) = document.element_mut(child) {
            element.resolved_style = item.geometry;
        }
    }
    if let Some(element) = document.element_mut(id) {
        element.resolved_style = geometry;
    }
}
