use pinlist_core::{NodeId, Rect};
use pinlist_foundation::{
    DiffSnapshot, ListContainerConfig, PropValue, StickyContext, StickyEdge, StickyMode,
    STICKY_ELEVATION,
};
use pinlist_testing::{init_logging, ListContainerTestRule};

fn config(mode: StickyMode) -> ListContainerConfig {
    ListContainerConfig {
        enable_sticky: true,
        sticky_mode: mode,
        ..ListContainerConfig::default()
    }
}

const MODES: [StickyMode; 2] = [StickyMode::Index, StickyMode::ItemKey];

/// `a..d`, 100px each, `b` sticky at the top.
fn abcd(mode: StickyMode) -> (ListContainerTestRule, [NodeId; 4]) {
    init_logging();
    let mut rule = ListContainerTestRule::new(config(mode));
    rule.set_items(DiffSnapshot::from_keys(["a", "b", "c", "d"]).with_sticky_top([1]), 1000.0);
    let ids = [
        rule.insert_item("a", 0.0, 100.0),
        rule.insert_item("b", 100.0, 100.0),
        rule.insert_item("c", 200.0, 100.0),
        rule.insert_item("d", 300.0, 100.0),
    ];
    rule.container_mut().on_node_ready();
    (rule, ids)
}

#[test]
fn sticky_item_pins_once_its_top_reaches_the_line() {
    for mode in MODES {
        let (mut rule, [_, b, _, _]) = abcd(mode);
        assert_eq!(rule.translation_y(b), 0.0);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), None);

        rule.scroll_to(100.0);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(b));
        assert_eq!(rule.translation_y(b), 0.0);
        assert_eq!(rule.translation_z(b), STICKY_ELEVATION);

        for offset in [130.0, 175.0, 260.0] {
            rule.scroll_to(offset);
            // The row follows the offset so it stays on the line.
            assert_eq!(rule.translation_y(b), offset - 100.0, "{mode:?} at {offset}");
        }
        assert_eq!(rule.events().sticky_keys(StickyEdge::Top), vec!["b".to_owned()]);
    }
}

#[test]
fn next_sticky_pushes_the_pinned_one_up() {
    for mode in MODES {
        let mut rule = ListContainerTestRule::new(config(mode));
        let keys = ["r0", "r1", "r2", "r3", "r4", "r5"];
        rule.set_items(DiffSnapshot::from_keys(keys).with_sticky_top([1, 3]), 2000.0);
        let heights = [80.0, 60.0, 120.0, 50.0, 90.0, 70.0];
        let mut top = 0.0;
        let mut ids = Vec::new();
        for (key, height) in keys.iter().zip(heights) {
            ids.push(rule.insert_item(key, top, height));
            top += height;
        }
        // r1 spans 80..140 and r3 starts at 260.
        for offset in [200.0, 210.0, 230.0, 255.0] {
            rule.scroll_to(offset);
            let squash = (60.0 - (260.0 - offset)).max(0.0);
            assert_eq!(rule.translation_y(ids[1]), offset - squash - 80.0, "{mode:?} at {offset}");
        }
        rule.scroll_to(260.0);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(ids[3]));
        assert_eq!(rule.translation_y(ids[1]), 0.0);
    }
}

#[test]
fn sticky_offset_moves_the_line() {
    let mut rule = ListContainerTestRule::new(config(StickyMode::ItemKey));
    rule.container_mut()
        .apply_prop("sticky-offset", &PropValue::Number(20.0))
        .unwrap();
    rule.set_items(DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([1]), 1000.0);
    rule.insert_item("a", 0.0, 100.0);
    let b = rule.insert_item("b", 100.0, 100.0);

    rule.scroll_to(90.0);
    assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(b));
    assert_eq!(rule.translation_y(b), 10.0);
}

#[test]
fn removed_sticky_is_released_and_not_resolved_again() {
    for mode in MODES {
        let (mut rule, [_, b, _, _]) = abcd(mode);
        rule.scroll_to(150.0);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(b));

        assert!(rule.remove(b));
        assert!(rule.pool().contains(b));
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), None);

        rule.scroll_to(160.0);
        let resolution = rule.container_mut().update_sticky_tops(160.0);
        assert_eq!(resolution.active_node(), None);
    }
}

#[test]
fn reinserted_sticky_resolves_like_before() {
    for mode in MODES {
        let (mut rule, [_, b, _, _]) = abcd(mode);
        rule.scroll_to(150.0);
        let before = rule.translation_y(b);
        rule.remove(b);

        let again = rule.insert_item("b", 100.0, 100.0);
        rule.container_mut().on_node_ready();
        assert_eq!(again, b);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(again));
        assert_eq!(rule.translation_y(again), before);
        assert_eq!(rule.events().sticky_keys(StickyEdge::Top), vec!["b".to_owned(), "b".to_owned()]);
    }
}

#[test]
fn recycled_node_does_not_carry_its_old_sticky_role() {
    for mode in MODES {
        let (mut rule, [_, b, _, _]) = abcd(mode);
        rule.scroll_to(150.0);
        rule.remove(b);

        // Same view comes back from the pool for a plain row.
        rule.container_mut()
            .apply_snapshot(DiffSnapshot::from_keys(["a", "b", "c", "d", "e"]).with_sticky_top([1]));
        let e = rule.insert_item("e", 400.0, 100.0);
        assert_eq!(e, b);
        rule.scroll_to(420.0);
        assert_eq!(rule.translation_y(e), 0.0);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), None);
    }
}

#[test]
fn reused_view_picks_up_the_new_sticky_key() {
    for mode in MODES {
        let mut rule = ListContainerTestRule::new(config(mode));
        rule.set_items(DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([2]), 1000.0);
        let view = rule.insert_item("a", 0.0, 100.0);
        rule.insert_item("b", 100.0, 100.0);

        rule.rebind(view, "c", 200.0, 100.0);
        rule.scroll_to(250.0);
        assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(view), "{mode:?}");
        assert_eq!(rule.events().sticky_keys(StickyEdge::Top), vec!["c".to_owned()]);
    }
}

#[test]
fn reorder_keeps_the_sticky_registration() {
    for mode in MODES {
        let (mut rule, [_, b, _, _]) = abcd(mode);
        rule.container_mut()
            .apply_snapshot(DiffSnapshot::from_keys(["a", "c", "d", "b"]).with_sticky_top([3]));
        rule.layout(b, Rect::new(0.0, 300.0, 400.0, 100.0));

        let snapshot = rule.container().snapshot().clone();
        let ctx = StickyContext {
            snapshot: &snapshot,
            key_index: rule.container().key_index(),
        };
        assert_eq!(
            rule.container().sticky_strategy().node_at(StickyEdge::Top, 3, ctx),
            Some(b),
            "{mode:?}"
        );

        rule.scroll_to(350.0);
        assert_eq!(rule.translation_y(b), 50.0);
    }
}

#[test]
fn bottom_sticky_hands_over_between_items() {
    let mut rule = ListContainerTestRule::new(config(StickyMode::ItemKey));
    let keys = ["a", "b", "c", "d", "e", "f", "g"];
    rule.set_items(DiffSnapshot::from_keys(keys).with_sticky_bottom([4, 6]), 700.0);
    let ids: Vec<NodeId> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| rule.insert_item(key, i as f32 * 100.0, 100.0))
        .collect();

    // Viewport 300: line at 300, e (400..500) is pulled up to 200..300.
    rule.container_mut().on_node_ready();
    assert_eq!(rule.translation_y(ids[4]), -200.0);

    // Line at 550: e sits above the line, g is pinned and pushed down by 50.
    rule.scroll_to(250.0);
    assert_eq!(rule.container().last_sticky(StickyEdge::Bottom), Some(ids[6]));
    assert_eq!(rule.translation_y(ids[4]), 0.0);
    assert_eq!(rule.translation_y(ids[6]), 500.0 - 600.0);
    assert_eq!(
        rule.events().sticky_keys(StickyEdge::Bottom),
        vec!["e".to_owned(), "g".to_owned()]
    );
}

#[test]
fn parked_sticky_is_skipped_until_laid_out() {
    let mut rule = ListContainerTestRule::new(config(StickyMode::ItemKey));
    rule.set_items(DiffSnapshot::from_keys(["a", "b", "c"]).with_sticky_top([0, 1]), 1000.0);
    let a = rule.insert_item("a", 0.0, 100.0);
    let b = rule.insert_pending("b");
    rule.container_mut().on_item_node_ready(b, "b");

    let resolution = rule.container_mut().update_sticky_tops(150.0);
    assert_eq!(resolution.active_node(), Some(a));
    assert_eq!(resolution.skipped.as_slice(), &[b]);

    rule.layout(b, Rect::new(0.0, 100.0, 400.0, 100.0));
    rule.scroll_to(150.0);
    assert_eq!(rule.container().last_sticky(StickyEdge::Top), Some(b));
}
