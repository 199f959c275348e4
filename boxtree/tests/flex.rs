use boxtree::layout::flex::{layout_items, AxisMapping, FlexItem};
use boxtree::style::{
    AlignContent, AlignItems, Dimension, FlexContainerStyle, FlexDirection, FlexItemStyle,
    FlexWrap, JustifyContent, ResolvedStyle, Side,
};
use boxtree::{parse_document, Au, Options};

fn px(px: i32) -> Au {
    Au::from_px(px)
}

fn sized(width: Option<i32>, height: Option<i32>) -> ResolvedStyle {
    ResolvedStyle {
        width: width.map(px),
        height: height.map(px),
        ..Default::default()
    }
}

fn item(width: Option<i32>, height: Option<i32>) -> FlexItem {
    FlexItem {
        style: FlexItemStyle::default(),
        geometry: sized(width, height),
    }
}

fn flexible(flex: f32) -> FlexItem {
    FlexItem {
        style: FlexItemStyle {
            flex: Some(flex),
            ..Default::default()
        },
        geometry: ResolvedStyle::default(),
    }
}

/// (left, right, top, bottom) in px.
fn sides(item: &FlexItem) -> (i32, i32, i32, i32) {
    let g = &item.geometry;
    let side = |s| g.side(s).map_or(-1, |au: Au| au.to_px());
    (
        side(Side::Left),
        side(Side::Right),
        side(Side::Top),
        side(Side::Bottom),
    )
}

fn main_ranges(items: &[FlexItem]) -> Vec<(i32, i32)> {
    items
        .iter()
        .map(|i| {
            let (l, r, _, _) = sides(i);
            (l, r)
        })
        .collect()
}

#[test]
fn axis_mapping() {
    let row = AxisMapping::new(FlexDirection::Row, FlexWrap::Nowrap);
    assert_eq!(row.main.size, Dimension::Width);
    assert_eq!((row.main.start, row.main.end), (Side::Left, Side::Right));
    assert_eq!(row.main.sign(), 1);
    assert_eq!(row.main.base(px(300)), px(0));
    assert_eq!((row.cross.start, row.cross.end), (Side::Top, Side::Bottom));

    let row_reverse = AxisMapping::new(FlexDirection::RowReverse, FlexWrap::Nowrap);
    assert_eq!(
        (row_reverse.main.start, row_reverse.main.end),
        (Side::Right, Side::Left)
    );
    assert_eq!(row_reverse.main.sign(), -1);
    assert_eq!(row_reverse.main.base(px(300)), px(300));

    let column = AxisMapping::new(FlexDirection::ColumnReverse, FlexWrap::WrapReverse);
    assert_eq!(column.main.size, Dimension::Height);
    assert_eq!((column.main.start, column.main.end), (Side::Bottom, Side::Top));
    assert_eq!(column.cross.size, Dimension::Width);
    assert_eq!(
        (column.cross.start, column.cross.end),
        (Side::Right, Side::Left)
    );
    assert_eq!(column.cross.sign(), -1);
    assert_eq!(column.cross.base(px(50)), px(50));
}

#[test]
fn space_between() {
    let style = FlexContainerStyle {
        justify_content: JustifyContent::SpaceBetween,
        ..Default::default()
    };
    let mut container = sized(Some(300), None);
    let mut items = vec![item(Some(60), None); 3];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(main_ranges(&items), vec![(0, 60), (120, 180), (240, 300)]);
}

#[test]
fn space_between_with_a_single_item() {
    let style = FlexContainerStyle {
        justify_content: JustifyContent::SpaceBetween,
        ..Default::default()
    };
    let mut container = sized(Some(300), None);
    let mut items = vec![item(Some(60), None)];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(main_ranges(&items), vec![(0, 60)]);
}

#[test]
fn justify_content_placements() {
    let cases = [
        (JustifyContent::FlexStart, vec![(0, 50), (50, 100)]),
        (JustifyContent::FlexEnd, vec![(100, 150), (150, 200)]),
        (JustifyContent::Center, vec![(50, 100), (100, 150)]),
        (JustifyContent::SpaceAround, vec![(25, 75), (125, 175)]),
    ];
    for (justify_content, expected) in cases.iter() {
        let style = FlexContainerStyle {
            justify_content: *justify_content,
            ..Default::default()
        };
        let mut container = sized(Some(200), Some(10));
        let mut items = vec![item(Some(50), None); 2];
        layout_items(&style, &mut container, &mut items);
        assert_eq!(main_ranges(&items), *expected, "{:?}", justify_content);
    }
}

#[test]
fn overflow_scales_items() {
    let style = FlexContainerStyle::default();
    let mut container = sized(Some(100), None);
    let mut items = vec![item(Some(80), None); 2];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(main_ranges(&items), vec![(0, 50), (50, 100)]);
    assert_eq!(items[0].geometry.width, Some(px(50)));
}

#[test]
fn flex_factors_share_remaining_space() {
    let style = FlexContainerStyle::default();
    let mut container = sized(Some(400), Some(20));
    let mut items = vec![item(Some(100), None), flexible(1.0), flexible(2.0)];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(main_ranges(&items), vec![(0, 100), (100, 200), (200, 400)]);
}

#[test]
fn row_reverse_packs_from_the_right() {
    let style = FlexContainerStyle {
        direction: FlexDirection::RowReverse,
        ..Default::default()
    };
    let mut container = sized(Some(300), Some(10));
    let mut items = vec![item(Some(100), None), item(Some(50), None)];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(main_ranges(&items), vec![(200, 300), (150, 200)]);
}

#[test]
fn column_direction() {
    let style = FlexContainerStyle {
        direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        ..Default::default()
    };
    let mut container = sized(Some(100), Some(100));
    let mut items = vec![item(Some(20), Some(30)), item(Some(40), Some(30))];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(sides(&items[0]), (40, 60, 0, 30));
    assert_eq!(sides(&items[1]), (30, 70, 30, 60));
}

#[test]
fn auto_main_size_is_the_sum_of_items() {
    let style = FlexContainerStyle {
        wrap: FlexWrap::Wrap,
        ..Default::default()
    };
    let mut container = sized(None, None);
    let mut items = vec![item(Some(30), Some(10)), item(Some(40), Some(20))];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(container.width, Some(px(70)));
    assert_eq!(container.height, Some(px(20)));
    assert_eq!(main_ranges(&items), vec![(0, 30), (30, 70)]);
}

#[test]
fn stretch_fills_the_line() {
    let style = FlexContainerStyle::default();
    let mut container = sized(Some(100), Some(40));
    let mut items = vec![item(Some(10), None), item(Some(10), Some(15))];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(sides(&items[0]), (0, 10, 0, 40));
    assert_eq!(sides(&items[1]), (10, 20, 0, 15));
}

#[test]
fn align_self_overrides_align_items() {
    let style = FlexContainerStyle {
        align_items: AlignItems::FlexStart,
        ..Default::default()
    };
    let mut container = sized(Some(100), Some(40));
    let mut end = item(Some(10), Some(10));
    end.style.align_self = Some(AlignItems::FlexEnd);
    let mut items = vec![item(Some(10), Some(10)), end, item(Some(10), None)];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(sides(&items[0]), (0, 10, 0, 10));
    assert_eq!(sides(&items[1]), (10, 20, 30, 40));
    // Not stretched, so no cross size.
    assert_eq!(sides(&items[2]), (20, 30, 0, 0));
}

#[test]
fn wrapping_into_lines() {
    let style = FlexContainerStyle {
        wrap: FlexWrap::Wrap,
        align_content: AlignContent::FlexStart,
        ..Default::default()
    };
    let mut container = sized(Some(100), Some(100));
    let mut items = vec![
        item(Some(60), Some(10)),
        item(Some(60), Some(20)),
        item(Some(30), Some(5)),
        item(Some(150), Some(5)),
    ];
    layout_items(&style, &mut container, &mut items);

    // The last item is clamped to the container.
    assert_eq!(items[3].geometry.width, Some(px(100)));
    assert_eq!(sides(&items[0]), (0, 60, 0, 10));
    assert_eq!(sides(&items[1]), (0, 60, 10, 30));
    assert_eq!(sides(&items[2]), (60, 90, 10, 15));
    assert_eq!(sides(&items[3]), (0, 100, 30, 35));
}

#[test]
fn align_content_stretch_grows_lines() {
    let style = FlexContainerStyle {
        wrap: FlexWrap::Wrap,
        align_items: AlignItems::FlexStart,
        ..Default::default()
    };
    let mut container = sized(Some(100), Some(100));
    let mut items = vec![item(Some(60), Some(10)), item(Some(60), Some(30))];
    layout_items(&style, &mut container, &mut items);

    // 60px of leftover, 30px more per line.
    assert_eq!(sides(&items[0]), (0, 60, 0, 10));
    assert_eq!(sides(&items[1]), (0, 60, 40, 70));
}

#[test]
fn align_content_placements() {
    // Lines of 10px and 20px leave 70px in a 100px container.
    let cases = [
        (AlignContent::FlexEnd, [(70, 80), (80, 100)]),
        (AlignContent::Center, [(35, 45), (45, 65)]),
        (AlignContent::SpaceBetween, [(0, 10), (80, 100)]),
        (AlignContent::SpaceAround, [(17, 27), (62, 82)]),
    ];
    for (align_content, expected) in cases.iter() {
        let style = FlexContainerStyle {
            wrap: FlexWrap::Wrap,
            align_content: *align_content,
            ..Default::default()
        };
        let mut container = sized(Some(100), Some(100));
        let mut items = vec![item(Some(60), Some(10)), item(Some(60), Some(20))];
        layout_items(&style, &mut container, &mut items);
        let cross_ranges = items
            .iter()
            .map(|i| {
                let (_, _, t, b) = sides(i);
                (t, b)
            })
            .collect::<Vec<_>>();
        assert_eq!(cross_ranges, expected.to_vec(), "{:?}", align_content);
    }
}

#[test]
fn column_reverse_packs_from_the_bottom() {
    let style = FlexContainerStyle {
        direction: FlexDirection::ColumnReverse,
        ..Default::default()
    };
    let mut container = sized(Some(100), Some(100));
    let mut items = vec![item(Some(10), Some(30)), item(Some(10), Some(20))];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(sides(&items[0]), (0, 10, 70, 100));
    assert_eq!(sides(&items[1]), (0, 10, 50, 70));
}

#[test]
fn wrap_reverse_stacks_lines_from_the_bottom() {
    let style = FlexContainerStyle {
        wrap: FlexWrap::WrapReverse,
        align_content: AlignContent::FlexStart,
        ..Default::default()
    };
    let mut container = sized(Some(100), Some(100));
    let mut items = vec![item(Some(60), Some(10)), item(Some(60), Some(20))];
    layout_items(&style, &mut container, &mut items);

    assert_eq!(sides(&items[0]), (0, 60, 90, 100));
    assert_eq!(sides(&items[1]), (0, 60, 70, 90));
}

#[test]
fn order_and_text_children_in_a_document() {
    let html = concat!(
        "<style>",
        "#c { display: flex; width: 100px; height: 10px }",
        "#a { width: 10px; order: 2 }",
        "#b { width: 20px }",
        "</style>",
        "<div id=\"c\">text<p id=\"a\"></p><p id=\"b\"></p></div>",
    );
    let document = parse_document(html, &Options::default()).unwrap();
    let geometry = |id: &str| {
        let node = document.find_by_id(id).unwrap();
        document.element(node).unwrap().resolved_style
    };

    let a = geometry("a");
    let b = geometry("b");
    assert_eq!((b.left, b.right), (Some(px(0)), Some(px(20))));
    assert_eq!((a.left, a.right), (Some(px(20)), Some(px(30))));
    assert_eq!(a.height, Some(px(10)));
}

#[test]
fn nested_containers_are_sized_first() {
    let html = concat!(
        "<style>",
        ".flex { display: flex }",
        ".leaf { width: 30px; height: 5px }",
        "</style>",
        "<div class=\"flex\" id=\"outer\">",
        "<div class=\"flex\" id=\"inner\"><i class=\"leaf\"></i><i class=\"leaf\"></i></div>",
        "<i class=\"leaf\"></i>",
        "</div>",
    );
    let document = parse_document(html, &Options::default()).unwrap();
    let geometry = |id: &str| {
        let node = document.find_by_id(id).unwrap();
        document.element(node).unwrap().resolved_style
    };

    let inner = geometry("inner");
    assert_eq!((inner.width, inner.height), (Some(px(60)), Some(px(5))));
    assert_eq!(inner.left, Some(px(0)));
    let outer = geometry("outer");
    assert_eq!((outer.width, outer.height), (Some(px(90)), Some(px(5))));

    let border_box = inner.border_box().unwrap();
    assert_eq!(border_box.max.x, px(60));
    assert_eq!(border_box.max.y, px(5));
}
