//! End-to-end layout scenarios driven through the public canvas API.

use dashgrid_core::{GridPosition, PixelPoint, intersects};
use dashgrid_layout::{
    Canvas, CancelReason, EnginePolicy, GestureEffect, GesturePhase, GridConfig, PaletteItem,
    PlacementStrategy, ResizeHandle, WidgetDraft, WidgetId, WidgetKind, find_valid_position,
    has_collision,
};
use pretty_assertions::assert_eq;

fn canvas() -> Canvas {
    Canvas::new(GridConfig::default(), EnginePolicy::default(), 1200.0).expect("valid canvas")
}

fn place(canvas: &mut Canvas, x: u32, y: u32, width: u32, height: u32) -> WidgetId {
    let (id, placement) = canvas
        .add_widget(WidgetDraft::new(
            GridPosition::new(x, y, width, height),
            WidgetKind::Text.default_content(),
        ))
        .expect("add");
    assert_eq!(placement.strategy, PlacementStrategy::Preferred);
    id
}

fn px(column: f64, row: f64) -> PixelPoint {
    PixelPoint::new(column * 100.0, row * 100.0)
}

#[test]
fn touching_is_not_colliding() {
    assert!(!intersects(
        &GridPosition::new(0, 0, 4, 3),
        &GridPosition::new(4, 0, 4, 3)
    ));
    assert!(intersects(
        &GridPosition::new(0, 0, 4, 3),
        &GridPosition::new(3, 2, 4, 3)
    ));
}

#[test]
fn insert_onto_empty_canvas_keeps_preferred() {
    let none: Vec<(WidgetId, GridPosition)> = Vec::new();
    let preferred = GridPosition::new(5, 0, 4, 3);
    assert_eq!(find_valid_position(preferred, &none, 12, None), preferred);

    let mut canvas = canvas();
    canvas.begin_insert(PaletteItem::for_kind(WidgetKind::Chart), px(5.5, 0.5));
    let done = canvas.pointer_up(px(5.5, 0.5)).expect("drop");
    assert_eq!(done.to, GesturePhase::Idle);
    assert_eq!(canvas.list()[0].position, preferred);
}

#[test]
fn insert_with_collision_resolves_within_radius() {
    let mut canvas = canvas();
    let a = place(&mut canvas, 0, 0, 4, 3);
    let (_, placement) = canvas
        .add_widget(WidgetDraft::new(
            GridPosition::new(0, 0, 4, 3),
            WidgetKind::Metric.default_content(),
        ))
        .expect("add");

    let a_position = canvas.widgets().position(a).expect("a exists");
    assert!(!intersects(&placement.position, &a_position));
    assert!(placement.position.x <= 10 && placement.position.y <= 10);
    assert_eq!(
        (placement.position.width, placement.position.height),
        (4, 3)
    );
}

#[test]
fn split_insert_halves_target() {
    let mut canvas = canvas();
    let target = place(&mut canvas, 0, 0, 8, 4);
    canvas.begin_insert(PaletteItem::for_kind(WidgetKind::Markdown), px(2.0, 1.0));
    let done = canvas.pointer_up(px(2.0, 1.0)).expect("drop");

    let GestureEffect::SplitInserted { split } = done.effect else {
        panic!("expected split insert, got {:?}", done.effect);
    };
    assert_eq!(split.target, target);
    assert_eq!(split.target_position, GridPosition::new(0, 0, 4, 4));
    assert_eq!(split.position, GridPosition::new(4, 0, 4, 4));
    assert_eq!(
        canvas
            .list()
            .iter()
            .map(|widget| widget.position)
            .collect::<Vec<_>>(),
        vec![GridPosition::new(0, 0, 4, 4), GridPosition::new(4, 0, 4, 4)]
    );
}

#[test]
fn split_insert_leaves_unrelated_widgets_alone() {
    let mut canvas = canvas();
    let target = place(&mut canvas, 0, 0, 6, 2);
    let neighbor = place(&mut canvas, 6, 0, 6, 2);
    canvas.begin_insert(PaletteItem::for_kind(WidgetKind::Filter), px(1.0, 1.0));
    canvas.pointer_up(px(1.0, 1.0)).expect("drop");

    assert_eq!(
        canvas.widgets().position(target),
        Ok(GridPosition::new(0, 0, 3, 2))
    );
    assert_eq!(
        canvas.widgets().position(neighbor),
        Ok(GridPosition::new(6, 0, 6, 2))
    );
    assert!(canvas.check_invariants().is_clean());
}

#[test]
fn resize_clamps_at_minimum() {
    let mut canvas = canvas();
    let id = place(&mut canvas, 2, 0, 2, 3);
    canvas
        .begin_resize(id, ResizeHandle::W, px(2.0, 1.0))
        .expect("begin");
    for column in [3.0, 5.0, 9.0, 40.0] {
        canvas.pointer_move(px(column, 1.0)).expect("move");
        assert_eq!(
            canvas.widgets().position(id),
            Ok(GridPosition::new(2, 0, 2, 3))
        );
    }
    let done = canvas.pointer_up(px(40.0, 1.0)).expect("up");
    assert_eq!(
        done.effect,
        GestureEffect::Committed {
            widget: id,
            start: GridPosition::new(2, 0, 2, 3),
            position: GridPosition::new(2, 0, 2, 3),
        }
    );
}

#[test]
fn drag_across_neighbor_never_overlaps() {
    let mut canvas = canvas();
    let moving = place(&mut canvas, 0, 0, 3, 3);
    place(&mut canvas, 4, 0, 3, 3);
    canvas.begin_move(moving, px(0.5, 0.5)).expect("begin");

    let mut last_valid = GridPosition::new(0, 0, 3, 3);
    for step in 0..=24 {
        let pointer = px(0.5 + f64::from(step) * 0.5, 0.5);
        let transition = canvas.pointer_move(pointer).expect("move");
        if let GestureEffect::Applied { position, .. } = transition.effect {
            last_valid = position;
        }
        assert_eq!(canvas.widgets().position(moving), Ok(last_valid));
        assert!(canvas.check_invariants().is_clean());
    }
    canvas.pointer_up(px(12.5, 0.5)).expect("up");
    assert_eq!(
        canvas.widgets().position(moving),
        Ok(GridPosition::new(9, 0, 3, 3))
    );
}

#[test]
fn second_gesture_does_not_disturb_first() {
    let mut canvas = canvas();
    let a = place(&mut canvas, 0, 0, 4, 3);
    let b = place(&mut canvas, 6, 0, 4, 3);
    canvas.begin_move(a, px(0.0, 0.0)).expect("begin");
    canvas
        .begin_resize(b, ResizeHandle::E, px(10.0, 0.0))
        .expect("ignored");
    canvas.pointer_move(px(0.0, 4.0)).expect("move");
    canvas.pointer_up(px(0.0, 4.0)).expect("up");

    assert_eq!(canvas.widgets().position(a), Ok(GridPosition::new(0, 4, 4, 3)));
    assert_eq!(canvas.widgets().position(b), Ok(GridPosition::new(6, 0, 4, 3)));
}

#[test]
fn canceled_insert_adds_nothing() {
    let mut canvas = canvas();
    canvas.begin_insert(PaletteItem::for_kind(WidgetKind::Iframe), px(3.0, 3.0));
    canvas.pointer_move(px(4.0, 4.0)).expect("move");
    let canceled = canvas.cancel(CancelReason::ReleasedOutside).expect("cancel");
    assert!(matches!(canceled.effect, GestureEffect::Canceled { widget: None, .. }));
    assert!(canvas.list().is_empty());
}

#[test]
fn dense_canvas_falls_back_below_everything() {
    let mut canvas = canvas();
    for row in 0..4 {
        for column in 0..3 {
            place(&mut canvas, column * 4, row * 3, 4, 3);
        }
    }
    let tall = place(&mut canvas, 0, 12, 12, 20);
    let (id, placement) = canvas
        .add_widget(WidgetDraft::new(
            GridPosition::new(4, 14, 4, 3),
            WidgetKind::Chart.default_content(),
        ))
        .expect("add");

    assert_eq!(placement.strategy, PlacementStrategy::BottomFallback);
    assert_eq!(placement.position, GridPosition::new(0, 32, 4, 3));
    assert!(!has_collision(
        &placement.position,
        canvas.list(),
        Some(id)
    ));
    assert!(canvas.widgets().contains(tall));
}

#[test]
fn insert_released_outside_canvas_adds_nothing() {
    let mut canvas = canvas();
    let existing = place(&mut canvas, 0, 0, 4, 3);
    for release in [
        PixelPoint::new(-400.0, -300.0),
        PixelPoint::new(5000.0, 50.0),
        PixelPoint::new(1200.0, 50.0),
    ] {
        canvas.begin_insert(PaletteItem::for_kind(WidgetKind::Chart), px(5.5, 0.5));
        let done = canvas.pointer_up(release).expect("release");
        assert_eq!(done.to, GesturePhase::Idle);
        assert!(matches!(
            done.effect,
            GestureEffect::Canceled {
                widget: None,
                reason: CancelReason::ReleasedOutside,
                restored: None,
            }
        ));
    }
    assert_eq!(canvas.list().len(), 1);
    assert_eq!(
        canvas.widgets().position(existing),
        Ok(GridPosition::new(0, 0, 4, 3))
    );
}
