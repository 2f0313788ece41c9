//! End-to-end behavior of carousels driven through `Runtime<Document>`.

use std::time::Duration;

use carousel::constants::*;
use carousel::{
    default_site_mounts, Carousel, Document, ElementId, Event, InertReason, IntervalScheduler,
    Mount, Page, Runtime, Scheduler,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn active_positions(doc: &Document, elements: &[ElementId]) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, el)| doc.is_active(**el))
        .map(|(i, _)| i)
        .collect()
}

/// Document with one carousel mounted under the root.
fn single(id: &str, slides: usize, indicators: usize, controls: bool) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.mount_carousel(root, id, slides, indicators, controls).unwrap();
    doc
}

fn start(doc: Document, id: &str, interval: u64) -> Runtime<Document> {
    Runtime::start(doc, &[Mount::new(id, ms(interval))])
}

fn assert_single_active(rt: &Runtime<Document>, id: &str, expected: usize) {
    let c = rt.page().get(id).unwrap();
    assert_eq!(c.current_index(), Some(expected));
    assert_eq!(active_positions(rt.surface(), c.slides()), vec![expected]);
    if !c.indicators().is_empty() {
        assert_eq!(active_positions(rt.surface(), c.indicators()), vec![expected]);
    }
}

// === Construction ===

#[test]
fn test_construction_shows_first_slide_and_starts_timer() {
    let rt = start(single("c", 3, 3, true), "c", 5000);
    let c = rt.page().get("c").unwrap();

    assert!(c.is_active());
    assert_single_active(&rt, "c", 0);
    assert_eq!(rt.scheduler().live_count(), 1);
    assert_eq!(rt.scheduler().next_due(c.timer().unwrap()), Some(ms(5000)));
}

#[test]
fn test_missing_container_is_inert() {
    let rt = start(Document::new(), "nowhere", 5000);
    let c = rt.page().get("nowhere").unwrap();

    assert_eq!(c.inert_reason(), Some(InertReason::MissingContainer));
    assert_eq!(c.current_index(), None);
    assert_eq!(rt.scheduler().live_count(), 0);
}

#[test]
fn test_empty_container_mutates_nothing() {
    let mut rt = start(single("empty", 0, 2, true), "empty", 5000);

    assert_eq!(
        rt.page().get("empty").unwrap().inert_reason(),
        Some(InertReason::NoSlides)
    );
    assert_eq!(rt.surface().writes(), 0);
    assert_eq!(rt.scheduler().live_count(), 0);

    let buttons: Vec<ElementId> = {
        let doc = rt.surface();
        let container = doc.get_element_by_id("empty").unwrap();
        doc.descendants(container)
    };
    for el in buttons {
        assert!(!rt.surface().is_listening(el));
        assert_eq!(rt.click(el), 0);
    }
    rt.advance(ms(60_000));
    assert_eq!(rt.surface().writes(), 0);
}

#[test]
fn test_inert_navigation_is_noop() {
    let mut doc = single("empty", 0, 0, false);
    let mut scheduler = IntervalScheduler::new();
    let mut c = Carousel::new("empty", None, &mut doc, &mut scheduler);

    c.next_slide(&mut doc);
    c.prev_slide(&mut doc);
    c.show_slide(5, &mut doc);
    c.start_timer(&mut scheduler);
    c.reset_timer(&mut scheduler);

    assert_eq!(doc.writes(), 0);
    assert_eq!(scheduler.live_count(), 0);
    assert_eq!(c.timer(), None);
}

#[test]
fn test_default_interval_is_five_seconds() {
    let mut doc = single("c", 2, 0, false);
    let mut scheduler = IntervalScheduler::new();
    let c = Carousel::new("c", None, &mut doc, &mut scheduler);
    assert_eq!(c.interval(), ms(5000));
}

// === Index wrapping ===

#[test]
fn test_show_slide_wraps_at_both_ends() {
    for n in 1..=6usize {
        let mut doc = single("c", n, n, false);
        let mut scheduler = IntervalScheduler::new();
        let mut c = Carousel::new("c", None, &mut doc, &mut scheduler);

        c.show_slide(n as isize, &mut doc);
        assert_eq!(c.current_index(), Some(0));
        c.show_slide(-1, &mut doc);
        assert_eq!(c.current_index(), Some(n - 1));

        for target in -(2 * n as isize)..(3 * n as isize) {
            c.show_slide(target, &mut doc);
            let index = c.current_index().unwrap();
            assert!(index < n);
            assert_eq!(active_positions(&doc, c.slides()), vec![index]);
            assert_eq!(active_positions(&doc, c.indicators()), vec![index]);
        }
    }
}

#[test]
fn test_full_cycle_returns_to_start() {
    let mut doc = single("c", 5, 5, true);
    let mut scheduler = IntervalScheduler::new();
    let mut c = Carousel::new("c", None, &mut doc, &mut scheduler);

    for _ in 0..5 {
        c.next_slide(&mut doc);
    }
    assert_eq!(c.current_index(), Some(0));

    c.prev_slide(&mut doc);
    assert_eq!(c.current_index(), Some(4));
}

#[test]
fn test_fewer_indicators_than_slides() {
    let mut doc = single("c", 4, 2, false);
    let mut scheduler = IntervalScheduler::new();
    let mut c = Carousel::new("c", None, &mut doc, &mut scheduler);

    c.show_slide(3, &mut doc);
    assert_eq!(active_positions(&doc, c.slides()), vec![3]);
    assert!(active_positions(&doc, c.indicators()).is_empty());

    c.show_slide(1, &mut doc);
    assert_eq!(active_positions(&doc, c.indicators()), vec![1]);
}

#[test]
fn test_more_indicators_than_slides() {
    let mut rt = start(single("c", 2, 4, false), "c", 1000);
    let extra = rt.page().get("c").unwrap().indicators()[3];

    // An indicator past the last slide sends the carousel back to the start
    assert_eq!(rt.click(extra), 1);
    let c = rt.page().get("c").unwrap();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(active_positions(rt.surface(), c.indicators()), vec![0]);
}

// === Timer lifecycle ===

#[test]
fn test_tick_click_and_timer_restart_scenario() {
    let mut rt = start(single("c", 3, 3, true), "c", 5000);

    rt.advance(ms(5000));
    assert_single_active(&rt, "c", 1);

    rt.advance(ms(1500));
    let first_indicator = rt.page().get("c").unwrap().indicators()[0];
    assert_eq!(rt.click(first_indicator), 1);
    assert_single_active(&rt, "c", 0);

    let timer = rt.page().get("c").unwrap().timer().unwrap();
    assert_eq!(rt.scheduler().next_due(timer), Some(ms(6500 + 5000)));

    // The old schedule would have fired at 10000
    rt.advance(ms(4999));
    assert_single_active(&rt, "c", 0);
    rt.advance(ms(1));
    assert_single_active(&rt, "c", 1);
}

#[test]
fn test_manual_navigation_leaves_exactly_one_timer() {
    let mut rt = start(single("c", 3, 3, true), "c", 5000);
    let (prev, next, dots) = {
        let c = rt.page().get("c").unwrap();
        (
            c.prev_control().unwrap(),
            c.next_control().unwrap(),
            c.indicators().to_vec(),
        )
    };

    let clicks = [next, next, prev, dots[2], dots[0], prev, next, dots[1]];
    for el in clicks {
        let before = rt.page().get("c").unwrap().timer();
        assert_eq!(rt.click(el), 1);
        let after = rt.page().get("c").unwrap().timer();
        assert_eq!(rt.scheduler().live_count(), 1);
        assert_ne!(before, after);
        assert!(!rt.scheduler().is_live(before.unwrap()));
    }
    assert_single_active(&rt, "c", 1);
}

#[test]
fn test_prev_and_next_buttons() {
    let mut rt = start(single("c", 3, 0, true), "c", 5000);
    let c = rt.page().get("c").unwrap();
    let (prev, next) = (c.prev_control().unwrap(), c.next_control().unwrap());

    rt.click(prev);
    assert_single_active(&rt, "c", 2);
    rt.click(next);
    rt.click(next);
    assert_single_active(&rt, "c", 1);
}

#[test]
fn test_two_slides_without_controls_alternate() {
    let mut rt = start(single("c", 2, 0, false), "c", 5000);
    assert_eq!(rt.scheduler().live_count(), 1);

    for step in 1..=10 {
        rt.advance(ms(5000));
        assert_single_active(&rt, "c", step % 2);
    }
}

#[test]
fn test_large_advance_fires_every_missed_tick() {
    let mut rt = start(single("c", 4, 4, false), "c", 1000);
    rt.advance(ms(3500));
    assert_single_active(&rt, "c", 3);
    assert_eq!(rt.now(), ms(3500));
}

#[test]
fn test_stale_tick_is_ignored() {
    let mut doc = single("c", 3, 0, true);
    let mut scheduler = IntervalScheduler::new();
    let mut c = Carousel::new("c", Some(ms(100)), &mut doc, &mut scheduler);

    let old = c.timer().unwrap();
    c.reset_timer(&mut scheduler);
    assert!(!c.handle_tick(old, &mut doc));
    assert_eq!(c.current_index(), Some(0));

    let current = c.timer().unwrap();
    assert!(c.handle_tick(current, &mut doc));
    assert_eq!(c.current_index(), Some(1));
}

#[test]
fn test_start_timer_twice_does_not_leak() {
    let mut doc = single("c", 2, 0, false);
    let mut scheduler = IntervalScheduler::new();
    let mut c = Carousel::new("c", None, &mut doc, &mut scheduler);

    c.start_timer(&mut scheduler);
    c.start_timer(&mut scheduler);
    assert_eq!(scheduler.live_count(), 1);
    assert!(scheduler.is_live(c.timer().unwrap()));
}

// === Multiple instances ===

#[test]
fn test_instances_are_independent() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.mount_carousel(root, "fast", 3, 3, true).unwrap();
    doc.mount_carousel(root, "slow", 3, 3, true).unwrap();
    let mut rt = Runtime::start(doc, &[Mount::new("fast", ms(1000)), Mount::new("slow", ms(3000))]);

    assert_eq!(rt.scheduler().live_count(), 2);
    rt.advance(ms(3000));
    assert_single_active(&rt, "fast", 0);
    assert_single_active(&rt, "slow", 1);

    // Clicking one carousel never touches the other's timer
    let slow_timer = rt.page().get("slow").unwrap().timer();
    let fast_next = rt.page().get("fast").unwrap().next_control().unwrap();
    assert_eq!(rt.click(fast_next), 1);
    assert_eq!(rt.page().get("slow").unwrap().timer(), slow_timer);
    assert_single_active(&rt, "fast", 1);
    assert_single_active(&rt, "slow", 1);
}

#[test]
fn test_queries_do_not_cross_containers() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.mount_carousel(root, "a", 2, 2, false).unwrap();
    doc.mount_carousel(root, "b", 5, 5, true).unwrap();
    let rt = Runtime::start(doc, &[Mount::with_default_interval("a")]);

    let a = rt.page().get("a").unwrap();
    assert_eq!(a.slides().len(), 2);
    assert_eq!(a.indicators().len(), 2);
    assert_eq!(a.prev_control(), None);
}

#[test]
fn test_default_site_with_partial_markup() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.mount_carousel(root, "inicio", 3, 3, false).unwrap();
    doc.mount_carousel(root, "carousel-suite", 4, 4, true).unwrap();
    doc.mount_carousel(root, "carousel-iglu", 0, 0, false).unwrap();

    let mut rt = Runtime::start(doc, &default_site_mounts());
    assert_eq!(rt.page().carousels().len(), 7);
    assert_eq!(rt.page().active_count(), 2);
    assert_eq!(
        rt.page().get("carousel-iglu").unwrap().inert_reason(),
        Some(InertReason::NoSlides)
    );
    assert_eq!(
        rt.page().get("carousel-pareja").unwrap().inert_reason(),
        Some(InertReason::MissingContainer)
    );

    rt.advance(ms(6000));
    assert_single_active(&rt, "inicio", 1);
    assert_single_active(&rt, "carousel-suite", 1);
}

// === Disposal ===

#[test]
fn test_dispose_cancels_timer_and_listeners() {
    let mut rt = start(single("c", 3, 3, true), "c", 5000);
    let clickable: Vec<ElementId> = {
        let c = rt.page().get("c").unwrap();
        let mut els = c.indicators().to_vec();
        els.extend(c.prev_control());
        els.extend(c.next_control());
        els
    };
    assert!(clickable.iter().all(|el| rt.surface().is_listening(*el)));

    rt.shutdown();
    let c = rt.page().get("c").unwrap();
    assert_eq!(c.inert_reason(), Some(InertReason::Disposed));
    assert_eq!(rt.scheduler().live_count(), 0);
    assert!(clickable.iter().all(|el| !rt.surface().is_listening(*el)));

    let writes = rt.surface().writes();
    rt.advance(ms(20_000));
    assert_eq!(rt.click(clickable[0]), 0);
    assert_eq!(rt.surface().writes(), writes);

    // Second dispose is harmless
    rt.shutdown();
}

#[test]
fn test_nested_carousels_share_listener_counts() {
    let mut doc = Document::new();
    let root = doc.root();
    let outer = doc.mount_carousel(root, "outer", 2, 2, false).unwrap();
    doc.mount_carousel(outer, "inner", 2, 2, false).unwrap();

    let mut scheduler = IntervalScheduler::new();
    let mut outer_c = Carousel::new("outer", None, &mut doc, &mut scheduler);
    let inner_c = Carousel::new("inner", None, &mut doc, &mut scheduler);

    // The outer container's query reaches into the nested one
    assert_eq!(outer_c.slides().len(), 4);
    let shared = inner_c.indicators()[0];
    assert_eq!(doc.listener_count(shared), 2);

    outer_c.dispose(&mut doc, &mut scheduler);
    assert_eq!(doc.listener_count(shared), 1);
    assert_eq!(scheduler.live_count(), 1);
    scheduler.clear_interval(inner_c.timer().unwrap());
}

#[test]
fn test_shared_nested_indicator_drives_both_carousels() {
    let mut doc = Document::new();
    let root = doc.root();
    let outer = doc.mount_carousel(root, "outer", 2, 2, false).unwrap();
    doc.mount_carousel(outer, "inner", 2, 2, false).unwrap();

    let mut scheduler = IntervalScheduler::new();
    let mut page = Page::initialize(
        &[Mount::with_default_interval("outer"), Mount::with_default_interval("inner")],
        &mut doc,
        &mut scheduler,
    );
    while let Some(timer) = scheduler.fire_next(ms(5000)) {
        page.dispatch(Event::Tick(timer), &mut doc, &mut scheduler);
    }
    assert_eq!(page.get("outer").unwrap().current_index(), Some(1));
    assert_eq!(page.get("inner").unwrap().current_index(), Some(1));

    let shared = page.get("inner").unwrap().indicators()[0];
    let timers_before: Vec<_> = page.carousels().iter().map(|c| c.timer().unwrap()).collect();

    assert_eq!(page.dispatch(Event::Click(shared), &mut doc, &mut scheduler), 2);

    // Third indicator of the outer carousel, first of the inner one
    assert_eq!(page.get("outer").unwrap().current_index(), Some(2));
    assert_eq!(page.get("inner").unwrap().current_index(), Some(0));
    assert_eq!(scheduler.live_count(), 2);
    for (carousel, old) in page.carousels().iter().zip(timers_before) {
        assert!(!scheduler.is_live(old));
        assert_eq!(scheduler.next_due(carousel.timer().unwrap()), Some(ms(10_000)));
    }
}

#[test]
fn test_element_with_several_bindings_runs_them_in_order() {
    let mut doc = Document::new();
    let root = doc.root();
    let container = doc.mount_carousel(root, "c", 3, 0, false).unwrap();
    // Both the only indicator and the next button
    let both = doc.append(container, &[INDICATOR_CLASS, BUTTON_CLASS, NEXT_CLASS]).unwrap();

    let mut rt = start(doc, "c", 5000);
    rt.advance(ms(5000));
    rt.advance(ms(5000));
    assert_eq!(rt.page().get("c").unwrap().current_index(), Some(2));
    let before = rt.page().get("c").unwrap().timer().unwrap();

    // Show(0) first, then Next
    assert_eq!(rt.click(both), 1);
    let c = rt.page().get("c").unwrap();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(rt.scheduler().live_count(), 1);
    assert!(!rt.scheduler().is_live(before));
    assert_eq!(rt.scheduler().next_due(c.timer().unwrap()), Some(ms(15_000)));
}
