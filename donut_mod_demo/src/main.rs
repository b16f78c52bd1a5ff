// Copyright 2025 the Donut Mod Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donut mod demo.
//!
//! Builds a donut from a small regional data set, replays a few pointer gestures against an
//! in-memory host, and writes the final render pass to `donut_mod_demo.svg`.
//!
//! Usage: `donut_mod_demo [config.json]`, where the optional file holds a `ModConfig` in its
//! camelCase JSON form. Set `RUST_LOG=debug` to follow the gesture and marking flow.

mod svg;

use std::collections::BTreeSet;
use std::error::Error;

use donut_mod::{
    DonutState, GestureOutcome, GestureState, HeuristicTextMeasurer, MarkMode, Markable,
    ModConfig, RenderPass, SectorInput, SectorKey, Size, Styling,
};
use kurbo::{Point, Rect, Vec2};
use log::info;

const CONTAINER: Size = Size::new(640.0, 480.0);

/// Sample rows: (key, category, value, colour, center value).
const REGIONS: [(&str, &str, f64, &str, f64); 4] = [
    ("MW", "Midwest", 304.0, "#6489FA", 1_215.5),
    ("NE", "Northeast", 245.0, "#FA7864", 980.0),
    ("SE", "South", 341.0, "#FFDE5C", 1_364.25),
    ("WE", "West", 215.0, "#72ECA6", 860.0),
];

/// An in-memory stand-in for the host's data view.
#[derive(Debug, Default)]
struct DemoHost {
    marked: BTreeSet<SectorKey>,
    render_pass: RenderPass,
}

impl Markable for DemoHost {
    fn mark(&mut self, sectors: &[SectorKey], mode: MarkMode) {
        match mode {
            MarkMode::Replace => {
                self.marked = sectors.iter().cloned().collect();
            }
            MarkMode::ToggleOrAdd => {
                for key in sectors {
                    if !self.marked.remove(key) {
                        self.marked.insert(key.clone());
                    }
                }
            }
        }
    }

    fn clear_marking(&mut self) {
        self.marked.clear();
    }
}

impl DemoHost {
    fn rows(&self) -> Vec<SectorInput> {
        REGIONS
            .iter()
            .map(|&(key, category, value, color, center)| {
                let marked = usize::from(self.marked.contains(key));
                SectorInput::new(key, value, color)
                    .with_category(category)
                    .with_marked_row_count(marked)
                    .with_center_value(center, &format!("${center:.2}"))
            })
            .collect()
    }

    /// Renders a new pass from the current marking.
    fn render(&mut self, config: &ModConfig) -> Result<DonutState, Box<dyn Error>> {
        self.render_pass = self.render_pass.next();
        let state = DonutState::build(
            self.rows(),
            CONTAINER,
            config,
            Styling::default(),
            self.render_pass,
        )?;
        Ok(state)
    }
}

fn load_config() -> Result<ModConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let config = serde_json::from_str(&json)?;
            info!("loaded configuration from {path}");
            Ok(config)
        }
        None => Ok(ModConfig::default()),
    }
}

fn replay(
    host: &mut DemoHost,
    state: &DonutState,
    from: Point,
    to: Point,
    ctrl_key_held: bool,
) -> Option<Rect> {
    let dragging = GestureState::Idle
        .pointer_down(from, state.render_pass())
        .pointer_move(to);
    let selection = dragging.selection_rect();
    let (_, outcome) = dragging.pointer_up(to, ctrl_key_held, state);
    match outcome {
        GestureOutcome::Command(command) => {
            info!("{:?} {:?}", command.operation(), command.sectors());
            command.apply(host);
        }
        other => info!("gesture ended with {other:?}"),
    }
    selection
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    let mut host = DemoHost::default();

    let state = host.render(&config)?;
    let c = state.geometry().center;
    let drag = replay(
        &mut host,
        &state,
        c + Vec2::new(20.0, -120.0),
        c + Vec2::new(130.0, 110.0),
        false,
    );

    let state = host.render(&config)?;
    let west = state
        .sector("WE")
        .map(|s| donut_geometry::point_on_circle(c, s.arc.mid_angle(), 135.0))
        .ok_or("missing sector WE")?;
    replay(&mut host, &state, west, west, true);

    // Draw this pass, with the drag rectangle on top, before the background click clears it.
    let state = host.render(&config)?;
    let out = svg::render_svg(&state, &HeuristicTextMeasurer::default(), drag);
    let marked = host.marked.len();
    replay(&mut host, &state, c, c, false);

    let cleared = host.render(&config)?;
    info!("center after clear: {:?}", cleared.center_text().value);

    std::fs::write("donut_mod_demo.svg", out)?;
    println!(
        "wrote donut_mod_demo.svg ({} marked, render pass {})",
        marked,
        state.render_pass().id()
    );
    Ok(())
}
