//! Active lateral spans maintained by the face sweep.
//!
//! A span is a solid strip of the face that has been open since `start`
//! along the longitudinal axis. Portal events close spans off into
//! rectangles and reopen them with new lateral bounds.

use glam::Vec2;
use thiserror::Error;

use crate::aabb::Rect2;

use super::portal_edges::LateralExtent;

/// Inconsistent sweep states. Never produced by a well-formed face.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpanFault {
    #[error("no adjacent spans are separated by the ending portal [{0}, {1}]")]
    NoSeparatedPair(f32, f32),

    #[error("no active span is affected by the beginning portal [{0}, {1}]")]
    NoAffectedSpan(f32, f32),

    #[error("{0} active spans remain after the sweep, expected 1")]
    Unclosed(usize),
}

/// Solid strip on the lateral axis, open since `start`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
    pub start: f32,
}

impl Span {
    pub fn new(min: f32, max: f32, start: f32) -> Self {
        Self { min, max, start }
    }

    /// Close the span at `end`. X is longitudinal, Y lateral.
    pub fn to_rect(&self, end: f32) -> Rect2 {
        Rect2::new(Vec2::new(self.start, self.min), Vec2::new(end, self.max))
    }

    fn encompasses(&self, edge: &LateralExtent) -> bool {
        self.min <= edge.min && self.max >= edge.max
    }
}

fn nearly_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

fn separates(edge: &LateralExtent, lower: &Span, upper: &Span, epsilon: f32) -> bool {
    nearly_equal(edge.min, lower.max, epsilon) && nearly_equal(edge.max, upper.min, epsilon)
}

/// Rejoin the two spans split apart by a portal ending at `value`.
///
/// Both spans are emitted up to `value` and replaced by one span covering
/// their combined extent, restarting at `value`.
pub fn merge_spans(
    spans: &mut Vec<Span>,
    edge: &LateralExtent,
    value: f32,
    epsilon: f32,
) -> Result<[Rect2; 2], SpanFault> {
    let i = spans
        .windows(2)
        .position(|pair| separates(edge, &pair[0], &pair[1], epsilon))
        .ok_or(SpanFault::NoSeparatedPair(edge.min, edge.max))?;

    let upper = spans.remove(i + 1);
    let lower = &mut spans[i];
    let rects = [lower.to_rect(value), upper.to_rect(value)];
    lower.max = upper.max;
    lower.start = value;
    Ok(rects)
}

/// Open a gap for a portal beginning at `value`.
///
/// A span that fully contains the portal is emitted and split in two
/// around it. Otherwise every span the portal straddles is emitted and
/// contracted to exclude it.
pub fn split_or_contract_spans(
    spans: &mut Vec<Span>,
    edge: &LateralExtent,
    value: f32,
) -> Result<Vec<Rect2>, SpanFault> {
    let mut rects = Vec::new();
    let mut i = 0;
    while i < spans.len() {
        let span = spans[i];
        if span.encompasses(edge) {
            rects.push(span.to_rect(value));
            spans[i] = Span::new(edge.max, span.max, value);
            spans.insert(i, Span::new(span.min, edge.min, value));
            // No other span can overlap the portal
            break;
        } else if span.min < edge.min && span.max > edge.min {
            rects.push(span.to_rect(value));
            spans[i] = Span::new(span.min, edge.min, value);
        } else if span.min < edge.max && span.max > edge.max {
            rects.push(span.to_rect(value));
            spans[i] = Span::new(edge.max, span.max, value);
        }
        i += 1;
    }

    if rects.is_empty() {
        return Err(SpanFault::NoAffectedSpan(edge.min, edge.max));
    }
    Ok(rects)
}
