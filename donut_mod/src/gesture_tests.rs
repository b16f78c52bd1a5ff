// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use donut_geometry::point_on_circle;
use kurbo::{Point, Rect, Vec2};

use crate::{
    DonutState, GestureOutcome, GestureState, MarkMode, Markable, MarkingCommand,
    MarkingOperation, ModConfig, RenderPass, SectorInput, SectorKey, Size, Styling,
};

/// Host marking calls, in order. `None` stands for a clear.
#[derive(Debug, Default)]
struct RecordingHost {
    calls: Vec<(Vec<SectorKey>, Option<MarkMode>)>,
}

impl Markable for RecordingHost {
    fn mark(&mut self, sectors: &[SectorKey], mode: MarkMode) {
        self.calls.push((sectors.to_vec(), Some(mode)));
    }

    fn clear_marking(&mut self) {
        self.calls.push((Vec::new(), None));
    }
}

/// A 640x480 container: the donut is centered at (300, 220) with radii 180 and 90.
fn regions(render_pass: RenderPass) -> DonutState {
    DonutState::build(
        vec![
            SectorInput::new("MW", 304.0, "#6489FA"),
            SectorInput::new("NE", 245.0, "#FA7864"),
            SectorInput::new("SE", 341.0, "#FFDE5C"),
            SectorInput::new("WE", 215.0, "#72ECA6"),
        ],
        Size::new(640.0, 480.0),
        &ModConfig::default(),
        Styling::default(),
        render_pass,
    )
    .unwrap()
}

fn ring_point(state: &DonutState, key: &str) -> Point {
    let sector = state.sector(key).unwrap();
    point_on_circle(state.geometry().center, sector.arc.mid_angle(), 135.0)
}

fn gesture(
    state: &DonutState,
    from: Point,
    to: Point,
    ctrl_key_held: bool,
) -> (GestureState, GestureOutcome) {
    GestureState::Idle
        .pointer_down(from, state.render_pass())
        .pointer_move(to)
        .pointer_up(to, ctrl_key_held, state)
}

fn command(outcome: GestureOutcome) -> MarkingCommand {
    match outcome {
        GestureOutcome::Command(command) => command,
        other => panic!("expected a marking command, got {other:?}"),
    }
}

fn keys(command: &MarkingCommand) -> Vec<&str> {
    command.sectors().iter().map(SectorKey::as_str).collect()
}

#[test]
fn drag_across_two_sectors_marks_both() {
    let state = regions(RenderPass::FIRST);
    let (next, outcome) = gesture(
        &state,
        Point::new(320.0, 100.0),
        Point::new(430.0, 330.0),
        false,
    );
    assert_eq!(next, GestureState::Idle);

    let command = command(outcome);
    assert_eq!(command.operation(), MarkingOperation::ToggleOrAdd);
    assert_eq!(keys(&command), ["MW", "NE"]);
}

#[test]
fn drag_direction_does_not_matter() {
    let state = regions(RenderPass::FIRST);
    let (_, forward) = gesture(
        &state,
        Point::new(320.0, 100.0),
        Point::new(430.0, 330.0),
        false,
    );
    let (_, backward) = gesture(
        &state,
        Point::new(430.0, 330.0),
        Point::new(320.0, 100.0),
        false,
    );
    assert_eq!(forward, backward);
}

#[test]
fn drag_over_empty_canvas_leaves_the_marking_alone() {
    let state = regions(RenderPass::FIRST);
    let (_, outcome) = gesture(&state, Point::new(0.0, 0.0), Point::new(50.0, 50.0), false);
    assert_eq!(outcome, GestureOutcome::Idle);
}

#[test]
fn click_on_a_sector_replaces_and_ctrl_click_toggles() {
    let state = regions(RenderPass::FIRST);
    let ne = ring_point(&state, "NE");

    let plain = command(gesture(&state, ne, ne, false).1);
    assert_eq!(plain.operation(), MarkingOperation::Replace);
    assert_eq!(keys(&plain), ["NE"]);

    // A jitter below the click threshold is still a click.
    let ctrl = command(gesture(&state, ne, ne + Vec2::new(1.0, 1.0), true).1);
    assert_eq!(ctrl.operation(), MarkingOperation::ToggleOrAdd);
    assert_eq!(keys(&ctrl), ["NE"]);
}

#[test]
fn click_on_the_background_clears_the_marking() {
    let state = regions(RenderPass::FIRST);
    let hole = state.geometry().center;
    assert_eq!(
        command(gesture(&state, hole, hole, false).1),
        MarkingCommand::ClearAll
    );

    let corner = Point::new(5.0, 5.0);
    let clear = command(gesture(&state, corner, corner, true).1);
    assert_eq!(clear.operation(), MarkingOperation::ClearAll);

    let mut host = RecordingHost::default();
    clear.apply(&mut host);
    assert_eq!(host.calls, [(Vec::new(), None)]);
}

#[test]
fn release_against_a_newer_render_pass_is_cancelled() {
    let old = regions(RenderPass::FIRST);
    let new = regions(RenderPass::FIRST.next());
    let from = ring_point(&old, "MW");

    let dragging = GestureState::Idle.pointer_down(from, old.render_pass());
    let (next, outcome) = dragging.pointer_up(Point::new(600.0, 440.0), false, &new);
    assert_eq!(next, GestureState::Idle);
    assert_eq!(outcome, GestureOutcome::Cancelled);

    assert_eq!(dragging.invalidate(new.render_pass()), GestureState::Idle);
    assert_eq!(dragging.invalidate(old.render_pass()), dragging);
}

#[test]
fn moves_only_resize_the_rectangle() {
    assert_eq!(
        GestureState::Idle.pointer_move(Point::new(3.0, 4.0)),
        GestureState::Idle
    );
    assert_eq!(GestureState::default().selection_rect(), None);

    let dragging = GestureState::Idle
        .pointer_down(Point::new(50.0, 60.0), RenderPass::FIRST)
        .pointer_move(Point::new(10.0, 90.0));
    assert_eq!(
        dragging.selection_rect(),
        Some(Rect::new(10.0, 60.0, 50.0, 90.0))
    );
}

#[test]
fn release_without_press_does_nothing() {
    let state = regions(RenderPass::FIRST);
    let (next, outcome) = GestureState::Idle.pointer_up(Point::new(300.0, 60.0), false, &state);
    assert_eq!(next, GestureState::Idle);
    assert_eq!(outcome, GestureOutcome::Idle);
}

#[test]
fn drag_command_reaches_the_host_in_one_batch() {
    let state = regions(RenderPass::FIRST);
    let outer = state.geometry().outer_bounds();
    let (_, outcome) = gesture(
        &state,
        Point::new(outer.x0, outer.y0),
        Point::new(outer.x1, outer.y1),
        false,
    );

    let mut host = RecordingHost::default();
    command(outcome).apply(&mut host);
    let all: Vec<SectorKey> = ["MW", "NE", "SE", "WE"].map(SectorKey::from).into();
    assert_eq!(host.calls, [(all, Some(MarkMode::ToggleOrAdd))]);
}
