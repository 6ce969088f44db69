//! Text line statistics: line pitch per font face and inter-word whitespace.

use std::collections::BTreeMap;

use tracing::debug;

use crate::geometry::{HasRectangle, Rectangle};
use crate::model::{FontFace, TextLine};
use crate::params::StatParams;
use crate::stats::{FloatCounter, float_key};

use super::HasTextLineStatistic;

/// Immutable snapshot of the line spacing and word spacing below some element.
///
/// Line pitches are kept per font face: the distance between the baselines of
/// two consecutive lines of one block that share a face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLineStatistic {
    line_pitches: BTreeMap<FontFace, FloatCounter>,
    whitespace_widths: FloatCounter,
    line_count: usize,
    bounds: Rectangle,
}

impl TextLineStatistic {
    /// Number of lines counted.
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    pub const fn is_empty(&self) -> bool {
        self.line_count == 0
    }

    /// Font faces with at least one recorded line pitch, in face order.
    pub fn font_faces(&self) -> impl Iterator<Item = FontFace> + '_ {
        self.line_pitches.keys().copied()
    }

    pub fn line_pitches(&self, face: FontFace) -> Option<&FloatCounter> {
        self.line_pitches.get(&face)
    }

    /// Most common line pitch for `face`, NaN if none was recorded.
    pub fn most_common_line_pitch(&self, face: FontFace) -> f64 {
        self.line_pitches
            .get(&face)
            .map_or(f64::NAN, FloatCounter::most_common_value)
    }

    pub fn average_line_pitch(&self, face: FontFace) -> f64 {
        self.line_pitches
            .get(&face)
            .map_or(f64::NAN, FloatCounter::average)
    }

    pub const fn whitespace_widths(&self) -> &FloatCounter {
        &self.whitespace_widths
    }

    pub fn most_common_whitespace_width(&self) -> f64 {
        self.whitespace_widths.most_common_value()
    }

    pub fn average_whitespace_width(&self) -> f64 {
        self.whitespace_widths.average()
    }
}

impl HasRectangle for TextLineStatistic {
    fn rectangle(&self) -> Rectangle {
        self.bounds
    }
}

/// Computes `TextLineStatistic`s from the lines of one block, or rolls them up
/// from the statistics of child elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLineStatistician {
    params: StatParams,
}

impl TextLineStatistician {
    pub const fn new(params: StatParams) -> Self {
        Self { params }
    }

    pub const fn params(&self) -> &StatParams {
        &self.params
    }

    /// Scans `lines` in reading order. All lines are taken to belong to one
    /// block, so every consecutive pair sharing a font face yields a pitch.
    pub fn compute<'a, I>(&self, lines: I) -> TextLineStatistic
    where
        I: IntoIterator<Item = &'a TextLine>,
    {
        let q = |v: f64| float_key(self.params.quantize(v));
        let mut stat = TextLineStatistic::default();
        let mut prev: Option<&TextLine> = None;
        for line in lines {
            stat.line_count += 1;
            stat.bounds.expand(&line.rectangle());

            for pair in line.words().windows(2) {
                let gap = pair[1].min_x() - pair[0].max_x();
                if gap >= 0.0 {
                    stat.whitespace_widths.add(q(gap));
                }
            }

            if let Some(prev) = prev {
                match (prev.font_face(), line.font_face()) {
                    (Some(a), Some(b)) if a == b => {
                        let pitch = prev.baseline() - line.baseline();
                        stat.line_pitches.entry(a).or_default().add(q(pitch));
                    }
                    _ => {}
                }
            }
            prev = Some(line);
        }
        debug!(
            lines = stat.line_count,
            faces = stat.line_pitches.len(),
            "computed text line statistic"
        );
        stat
    }

    /// Merges the statistics of `children`. No pitch is recorded across two
    /// children.
    pub fn combine<'a, C, I>(&self, children: I) -> TextLineStatistic
    where
        C: HasTextLineStatistic + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let mut stat = TextLineStatistic::default();
        for child in children {
            let child = child.text_line_statistic();
            for (face, pitches) in &child.line_pitches {
                stat.line_pitches.entry(*face).or_default().combine(pitches);
            }
            stat.whitespace_widths.combine(&child.whitespace_widths);
            stat.line_count += child.line_count;
            stat.bounds.expand(&child.bounds);
        }
        debug!(
            lines = stat.line_count,
            faces = stat.line_pitches.len(),
            "combined text line statistics"
        );
        stat
    }
}
