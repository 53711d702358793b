use std::cell::RefCell;
use std::rc::Rc;

use pinlist_core::{NodeId, Orientation, Rect, Size, ThreadStrategy};
use pinlist_foundation::{
    AttachOutcome, AutoScrollParams, ComponentNode, DiffSnapshot, EngineRecycler, ListContainer,
    ListContainerConfig, ListError, ListEvent, MethodStatus, NodePool, NodeRecycler, PropValue,
    ScrollAlign, ScrollState, ScrollToPositionParams, EVENT_SCROLL_END,
};
use pinlist_testing::{init_logging, EngineCall, FakeListEngine, ListContainerTestRule, FRAME_NANOS};

fn rows(rule: &mut ListContainerTestRule, count: usize) -> Vec<NodeId> {
    let keys: Vec<String> = (0..count).map(|i| format!("row-{i}")).collect();
    rule.set_items(
        DiffSnapshot::from_keys(keys.iter().map(String::as_str)),
        count as f32 * 100.0,
    );
    keys.iter()
        .enumerate()
        .map(|(i, key)| rule.insert_item(key, i as f32 * 100.0, 100.0))
        .collect()
}

// ─── Scroll feedback ────────────────────────────────────────────────────

#[test]
fn engine_offset_update_is_applied_without_feedback() {
    init_logging();
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rule.container_mut().update_content_size_and_offset(500.0, 0.0, 20.0);

    assert_eq!(rule.container().surface().scroll_y(), 20.0);
    assert_eq!(rule.container().scroll_sync().suppressed_count(), 1);
    assert!(rule.engine().calls().is_empty());

    // A later platform scroll is reported from the agreed offset.
    rule.scroll_to(50.0);
    assert_eq!(rule.engine().reported_offsets(), vec![(0.0, 50.0)]);
}

#[test]
fn engine_deltas_accumulate() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rule.container_mut().update_content_size_and_offset(2000.0, 0.0, 120.0);
    rule.container_mut().update_content_size_and_offset(2000.0, 0.0, -20.0);

    assert_eq!(rule.container().surface().scroll_y(), 100.0);
    assert_eq!(rule.container().scroll_sync().suppressed_count(), 2);
    assert_eq!(rule.container().surface().content_size().height, 2000.0);
}

#[test]
fn horizontal_rtl_list_reports_mirrored_offsets() {
    let config = ListContainerConfig {
        orientation: Orientation::Horizontal,
        rtl: true,
        ..ListContainerConfig::default()
    };
    let mut rule = ListContainerTestRule::with_viewport(config, Size::new(300.0, 200.0));
    rule.container_mut().update_content_size_and_offset(900.0, 0.0, 0.0);
    assert_eq!(rule.container().surface().scroll_x(), 600.0);
    assert_eq!(rule.container().surface().content_size().height, 200.0);

    rule.scroll_to_x(450.0);
    assert_eq!(
        rule.engine().calls(),
        vec![EngineCall::ScrollBy {
            x: 150.0,
            y: 0.0,
            original_x: 450.0,
            original_y: 0.0
        }]
    );
}

// ─── Child lifecycle ────────────────────────────────────────────────────

#[test]
fn async_layout_defers_attach_and_fades_in() {
    let config = ListContainerConfig {
        thread_strategy: ThreadStrategy::MultiThreads,
        enable_fade_in_animation: true,
        ..ListContainerConfig::default()
    };
    let mut rule = ListContainerTestRule::new(config);
    rule.set_items(DiffSnapshot::from_keys(["a"]), 300.0);
    let id = rule.insert_pending("a");
    assert!(!rule.container().surface().contains_view(id));

    let outcome = rule.layout(id, Rect::new(0.0, 0.0, 400.0, 80.0));
    assert_eq!(outcome, Some(AttachOutcome::Attached));
    let node = rule.container().node(id).unwrap();
    assert!(node.is_attached());
    assert!(node.fade_in_running());

    // Later layout passes leave an attached child alone.
    assert_eq!(rule.layout(id, Rect::new(0.0, 10.0, 400.0, 80.0)), None);
}

#[test]
fn removing_a_parked_child_cancels_the_attach() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    let id = rule.insert_pending("a");
    assert!(rule.remove(id));
    assert!(rule.pool().contains(id));
    assert_eq!(rule.container().surface().child_count(), 0);
    assert!(!rule.remove(id));
}

#[test]
fn removed_children_are_reused_in_release_order() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    let ids = rows(&mut rule, 3);
    rule.remove(ids[2]);
    rule.remove(ids[0]);

    let first = rule.insert_item("row-0", 0.0, 100.0);
    let second = rule.insert_item("row-2", 200.0, 100.0);
    assert_eq!((first, second), (ids[2], ids[0]));
    assert_eq!(rule.container().node(first).unwrap().reuse_count(), 1);
    assert_eq!(rule.pool().recycled_count(), 2);
}

#[test]
fn engine_recycler_hands_nodes_back() {
    let engine = Rc::new(FakeListEngine::new());
    let config = ListContainerConfig::default();
    let recycler = EngineRecycler::new(&engine, config.list_sign, true);
    let mut container = ListContainer::new(config, recycler);
    container.attach_engine(&engine);
    container.insert_child(ComponentNode::new(NodeId(4)).with_item_key("k"));
    container.remove_child(NodeId(4));

    assert_eq!(
        engine.calls(),
        vec![EngineCall::RecycleChild {
            child: NodeId(4),
            async_request: true
        }]
    );
}

#[test]
fn shared_pool_works_as_a_recycler() {
    let pool = Rc::new(RefCell::new(NodePool::new()));
    let mut recycler = pool.clone();
    recycler.recycle(ComponentNode::new(NodeId(9)).with_item_key("gone"));
    let node = pool.borrow_mut().obtain().unwrap();
    assert_eq!(node.item_key(), None);
}

// ─── Methods ────────────────────────────────────────────────────────────

type Slot = Rc<RefCell<Vec<Result<(), ListError>>>>;

fn recorder() -> (Slot, impl Fn() -> Box<dyn FnOnce(Result<(), ListError>)>) {
    let slot: Slot = Rc::default();
    let sink = slot.clone();
    let make = move || {
        let sink = sink.clone();
        let callback: Box<dyn FnOnce(Result<(), ListError>)> =
            Box::new(move |result: Result<(), ListError>| sink.borrow_mut().push(result));
        callback
    };
    (slot, make)
}

#[test]
fn scroll_to_position_passes_offset_in_pixels() {
    let config = ListContainerConfig {
        density: 3.0,
        ..ListContainerConfig::default()
    };
    let mut rule = ListContainerTestRule::new(config);
    rows(&mut rule, 5);
    let (results, callback) = recorder();
    rule.container_mut().scroll_to_position(
        ScrollToPositionParams::new(3)
            .offset(-4.5)
            .align_to(ScrollAlign::Bottom)
            .smooth(true),
        callback(),
    );

    assert_eq!(
        rule.engine().calls().last(),
        Some(&EngineCall::ScrollToPosition {
            position: 3,
            offset: -13.0,
            align: ScrollAlign::Bottom,
            smooth: true
        })
    );
    assert!(results.borrow().is_empty());

    rule.container_mut().on_scroll_state_change(ScrollState::ScrollAnimation);
    rule.container_mut().on_scroll_state_change(ScrollState::Idle);
    assert_eq!(results.borrow().as_slice(), &[Ok(())]);
}

#[test]
fn scroll_end_event_needs_a_subscription() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rows(&mut rule, 5);
    rule.container_mut().on_scroll_state_change(ScrollState::Fling);
    rule.container_mut().on_scroll_state_change(ScrollState::Idle);
    assert!(rule.events().names().is_empty());

    rule.container_mut().set_events(["scrollend"]);
    rule.scroll_to(120.0);
    rule.container_mut().on_scroll_state_change(ScrollState::Fling);
    rule.container_mut().on_scroll_state_change(ScrollState::Idle);
    let events = rule.events().take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        ListEvent::ScrollEnd { detail, .. } => {
            assert_eq!(detail.scroll_top, 120.0);
            assert_eq!(detail.scroll_height, 500.0);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(events[0].name(), EVENT_SCROLL_END);
}

#[test]
fn methods_fail_once_the_engine_is_gone() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rows(&mut rule, 3);
    rule.drop_engine();

    let err = rule.container().get_visible_cells().unwrap_err();
    assert_eq!(err.status(), MethodStatus::InvalidStateError);

    let (results, callback) = recorder();
    rule.container_mut()
        .scroll_to_position(ScrollToPositionParams::new(1), callback());
    assert_eq!(results.borrow().as_slice(), &[Err(ListError::Destroyed)]);
}

#[test]
fn destroy_recycles_children_and_fails_pending_scroll() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rows(&mut rule, 4);
    let (results, callback) = recorder();
    rule.container_mut()
        .scroll_to_position(ScrollToPositionParams::new(3).smooth(true), callback());
    rule.container_mut().destroy();
    rule.container_mut().destroy();

    assert_eq!(results.borrow().as_slice(), &[Err(ListError::Destroyed)]);
    assert_eq!(rule.pool().len(), 4);
    assert!(rule.container().is_destroyed());
}

#[test]
fn invalid_prop_is_reported() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    let err = rule
        .container_mut()
        .apply_prop("sticky", &PropValue::from("yes"))
        .unwrap_err();
    assert_eq!(err.status(), MethodStatus::ParamInvalid);
    assert!(rule
        .container_mut()
        .apply_prop("unknown-prop", &PropValue::Null)
        .is_ok());
}

// ─── Auto scroll ────────────────────────────────────────────────────────

#[test]
fn auto_scroll_runs_on_frames_until_the_end() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rows(&mut rule, 4);
    rule.container_mut()
        .auto_scroll(AutoScrollParams::start("600px"))
        .unwrap();
    assert!(rule.scheduler().has_pending_frame());

    assert!(rule.advance_frame(FRAME_NANOS));
    assert_eq!(rule.container().surface().scroll_y(), 10.0);

    // 100px of range is left after the first step.
    let ran = rule.pump_frames(100);
    assert!(ran < 100);
    assert_eq!(rule.container().surface().scroll_y(), 100.0);
    assert!(!rule.container().is_auto_scrolling());
    assert!(!rule.scheduler().has_pending_frame());
}

#[test]
fn auto_scroll_without_auto_stop_keeps_requesting_frames() {
    let mut rule = ListContainerTestRule::new(ListContainerConfig::default());
    rows(&mut rule, 4);
    rule.scroll_to(100.0);
    rule.container_mut()
        .auto_scroll(AutoScrollParams::start("600px").auto_stop(false))
        .unwrap();

    assert_eq!(rule.pump_frames(5), 5);
    assert!(rule.container().is_auto_scrolling());

    rule.container_mut().auto_scroll(AutoScrollParams::stop()).unwrap();
    assert!(!rule.container().is_auto_scrolling());
    assert_eq!(rule.container().surface().scroll_state(), ScrollState::Idle);
}

#[test]
fn auto_scroll_backwards_with_dp_rate() {
    let config = ListContainerConfig {
        density: 2.0,
        ..ListContainerConfig::default()
    };
    let mut rule = ListContainerTestRule::new(config);
    rows(&mut rule, 4);
    rule.scroll_to(100.0);
    rule.container_mut()
        .auto_scroll(AutoScrollParams::start("-30dp"))
        .unwrap();

    rule.advance_frame(FRAME_NANOS);
    assert_eq!(rule.container().surface().scroll_y(), 99.0);
}
