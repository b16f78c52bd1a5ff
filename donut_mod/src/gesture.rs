// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gestures over the donut.
//!
//! A press starts a rectangle drag, moves only resize it, and the release resolves it against
//! the [`DonutState`] of the pass the drag started in. A release that barely moved is a click.
//! Transitions consume the state and return the next one, so a finished drag cannot be resolved
//! twice.

use donut_geometry::is_click;
use kurbo::{Point, Rect};
use log::debug;

use crate::marking::{MarkingCommand, clear_all, resolve_rectangle_selection, select};
use crate::state::{DonutState, RenderPass};

/// Where a pointer gesture is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No button is held.
    #[default]
    Idle,
    /// A selection rectangle is being drawn.
    Dragging {
        /// Where the press happened.
        origin: Point,
        /// The latest pointer position.
        current: Point,
        /// The pass whose geometry the rectangle refers to.
        render_pass: RenderPass,
    },
}

/// What a finished gesture asks of the host.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to do.
    Idle,
    /// The gesture outlived its render pass and was dropped.
    Cancelled,
    /// Apply this marking change.
    Command(MarkingCommand),
}

impl GestureState {
    /// A button press at `point` while `render_pass` is on screen.
    ///
    /// Any drag in progress is replaced.
    pub fn pointer_down(self, point: Point, render_pass: RenderPass) -> Self {
        Self::Dragging {
            origin: point,
            current: point,
            render_pass,
        }
    }

    /// The pointer moved to `point`.
    ///
    /// Only the rectangle changes; nothing is resolved until release.
    pub fn pointer_move(self, point: Point) -> Self {
        match self {
            Self::Dragging {
                origin,
                render_pass,
                ..
            } => Self::Dragging {
                origin,
                current: point,
                render_pass,
            },
            Self::Idle => Self::Idle,
        }
    }

    /// The host re-rendered; a drag started in an older pass is dropped.
    pub fn invalidate(self, render_pass: RenderPass) -> Self {
        match self {
            Self::Dragging {
                render_pass: started,
                ..
            } if started != render_pass => {
                debug!(
                    "dropping drag from render pass {} (now {})",
                    started.id(),
                    render_pass.id()
                );
                Self::Idle
            }
            other => other,
        }
    }

    /// The rectangle drawn so far, if dragging.
    pub fn selection_rect(&self) -> Option<Rect> {
        match *self {
            Self::Dragging {
                origin, current, ..
            } => Some(Rect::from_points(origin, current)),
            Self::Idle => None,
        }
    }

    /// The button was released at `point`.
    ///
    /// A click on a sector selects it (adding to the marking with ctrl held), and a click on
    /// the background clears the marking. A drag marks every sector the rectangle touches, and
    /// does nothing when it touches none.
    pub fn pointer_up(
        self,
        point: Point,
        ctrl_key_held: bool,
        state: &DonutState,
    ) -> (Self, GestureOutcome) {
        let Self::Dragging {
            origin,
            render_pass,
            ..
        } = self
        else {
            return (Self::Idle, GestureOutcome::Idle);
        };
        if render_pass != state.render_pass() {
            debug!(
                "release ignored: drag started in render pass {}, state is from {}",
                render_pass.id(),
                state.render_pass().id()
            );
            return (Self::Idle, GestureOutcome::Cancelled);
        }

        let rect = Rect::from_points(origin, point);
        let command = if is_click(rect) {
            match state.hit_test(point) {
                Some(sector) => Some(select(&sector.key, ctrl_key_held)),
                None => Some(clear_all()),
            }
        } else {
            let matched = state.resolve_selection(rect);
            debug!("drag {rect:?} matched {} sector(s)", matched.len());
            resolve_rectangle_selection(matched.iter().map(|sector| &sector.key))
        };
        let outcome = command.map_or(GestureOutcome::Idle, GestureOutcome::Command);
        (Self::Idle, outcome)
    }
}
