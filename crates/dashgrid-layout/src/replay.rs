#![forbid(unsafe_code)]

//! Recorded gesture traces and deterministic replay.
//!
//! A [`GestureTrace`] is the pointer-level input of one or more gestures in
//! canvas pixel coordinates. Replaying the same trace against the same
//! canvas always yields the same transitions and the same
//! [`WidgetSet::state_hash`](crate::WidgetSet::state_hash).

use dashgrid_core::PixelPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::Canvas;
use crate::content::WidgetKind;
use crate::error::LayoutError;
use crate::gesture::{CancelReason, GestureTransition, ResizeHandle};
use crate::widget::{PaletteItem, WidgetId};

/// Schema version of recorded traces. Advisory only; replay never rejects a
/// trace on its version.
pub const TRACE_SCHEMA_VERSION: u32 = 1;

const fn trace_schema_version() -> u32 {
    TRACE_SCHEMA_VERSION
}

const fn explicit_cancel() -> CancelReason {
    CancelReason::Explicit
}

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    BeginMove {
        widget: WidgetId,
        x: f64,
        y: f64,
    },
    BeginResize {
        widget: WidgetId,
        handle: ResizeHandle,
        x: f64,
        y: f64,
    },
    /// Palette drag; `width`/`height` override the kind's default footprint.
    BeginInsert {
        kind: WidgetKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Cancel {
        #[serde(default = "explicit_cancel")]
        reason: CancelReason,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureTrace {
    #[serde(default = "trace_schema_version")]
    pub schema_version: u32,
    /// Canvas width the trace was recorded at.
    pub canvas_width_px: f64,
    pub events: Vec<TraceEvent>,
}

impl GestureTrace {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Transitions produced by a replay and the resulting layout hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub transitions: Vec<GestureTransition>,
    pub final_hash: u64,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("trace event {index} failed: {source}")]
    Event {
        index: usize,
        #[source]
        source: LayoutError,
    },
}

/// Feed every event of `trace` to `canvas`, stopping at the first engine
/// error.
pub fn replay_trace(canvas: &mut Canvas, trace: &GestureTrace) -> Result<ReplayOutcome, ReplayError> {
    if trace.schema_version != TRACE_SCHEMA_VERSION {
        tracing::warn!(
            found = trace.schema_version,
            current = TRACE_SCHEMA_VERSION,
            "trace schema version differs, replaying as-is"
        );
    }
    let _span = tracing::debug_span!("replay", events = trace.events.len()).entered();
    canvas.set_canvas_width(trace.canvas_width_px);

    let mut transitions = Vec::with_capacity(trace.events.len());
    for (index, event) in trace.events.iter().enumerate() {
        let transition =
            apply_event(canvas, event).map_err(|source| ReplayError::Event { index, source })?;
        tracing::trace!(index, effect = ?transition.effect, "trace event applied");
        transitions.push(transition);
    }

    let final_hash = canvas.widgets().state_hash();
    tracing::debug!(transitions = transitions.len(), final_hash, "replay finished");
    Ok(ReplayOutcome {
        transitions,
        final_hash,
    })
}

fn apply_event(canvas: &mut Canvas, event: &TraceEvent) -> Result<GestureTransition, LayoutError> {
    match *event {
        TraceEvent::BeginMove { widget, x, y } => canvas.begin_move(widget, PixelPoint::new(x, y)),
        TraceEvent::BeginResize {
            widget,
            handle,
            x,
            y,
        } => canvas.begin_resize(widget, handle, PixelPoint::new(x, y)),
        TraceEvent::BeginInsert {
            kind,
            width,
            height,
            x,
            y,
        } => {
            let base = PaletteItem::for_kind(kind);
            let item = base.clone().with_size(
                width.unwrap_or(base.width),
                height.unwrap_or(base.height),
            );
            Ok(canvas.begin_insert(item, PixelPoint::new(x, y)))
        }
        TraceEvent::PointerMove { x, y } => canvas.pointer_move(PixelPoint::new(x, y)),
        TraceEvent::PointerUp { x, y } => canvas.pointer_up(PixelPoint::new(x, y)),
        TraceEvent::Cancel { reason } => canvas.cancel(reason),
    }
}

#[cfg(test)]
mod tests {
    use dashgrid_core::GridPosition;

    use super::{GestureTrace, ReplayError, TraceEvent, replay_trace};
    use crate::canvas::Canvas;
    use crate::config::{EnginePolicy, GridConfig};
    use crate::gesture::GestureEffect;

    const TRACE: &str = r#"{
        "canvas_width_px": 1200.0,
        "events": [
            {"event": "begin_insert", "kind": "chart", "x": 50.0, "y": 50.0},
            {"event": "pointer_up", "x": 50.0, "y": 50.0},
            {"event": "begin_move", "widget": 1, "x": 50.0, "y": 50.0},
            {"event": "pointer_move", "x": 350.0, "y": 50.0},
            {"event": "pointer_up", "x": 350.0, "y": 50.0},
            {"event": "begin_resize", "widget": 1, "handle": "se", "x": 700.0, "y": 300.0},
            {"event": "pointer_move", "x": 900.0, "y": 400.0},
            {"event": "cancel"}
        ]
    }"#;

    fn canvas() -> Canvas {
        Canvas::new(GridConfig::default(), EnginePolicy::default(), 800.0).expect("valid canvas")
    }

    #[test]
    fn parses_and_replays() {
        let trace = GestureTrace::from_json_str(TRACE).expect("trace parses");
        assert_eq!(trace.schema_version, 1);
        assert_eq!(trace.events.len(), 8);

        let mut canvas = canvas();
        let outcome = replay_trace(&mut canvas, &trace).expect("replay");
        assert_eq!(outcome.transitions.len(), 8);
        assert!(matches!(
            outcome.transitions[1].effect,
            GestureEffect::Inserted { .. }
        ));
        let id = canvas.list()[0].id;
        assert_eq!(
            canvas.widgets().position(id),
            Ok(GridPosition::new(3, 0, 6, 4))
        );
        assert!(matches!(
            outcome.transitions[7].effect,
            GestureEffect::Canceled { restored: None, .. }
        ));
    }

    #[test]
    fn replay_is_deterministic() {
        let trace = GestureTrace::from_json_str(TRACE).expect("trace parses");
        let mut first = canvas();
        let mut second = canvas();
        let a = replay_trace(&mut first, &trace).expect("replay");
        let b = replay_trace(&mut second, &trace).expect("replay");
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_widget_reports_event_index() {
        let trace = GestureTrace {
            schema_version: 1,
            canvas_width_px: 1200.0,
            events: vec![TraceEvent::BeginMove {
                widget: crate::WidgetId::new(5).expect("non-zero id"),
                x: 0.0,
                y: 0.0,
            }],
        };
        let err = replay_trace(&mut canvas(), &trace).expect_err("unknown widget");
        assert!(matches!(err, ReplayError::Event { index: 0, .. }));
    }

    #[test]
    fn schema_version_does_not_gate_replay() {
        let mut trace = GestureTrace::from_json_str(TRACE).expect("trace parses");
        trace.schema_version = 7;
        let outcome = replay_trace(&mut canvas(), &trace).expect("replay");
        assert_eq!(outcome.transitions.len(), 8);
    }
}
