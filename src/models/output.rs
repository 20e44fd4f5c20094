//! Reduced single-part output

use serde::{Deserialize, Serialize};
use std::fmt;

use super::event::{Event, TieType};
use super::time_signature::TimeSignature;

/// Clef attached to the first output measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Clef {
    Treble,
    Treble8vb,
    Bass,
}

/// One finished measure of the reduction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMeasure {
    /// Index of the source measure
    pub number: usize,

    /// Present only where the time signature changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<TimeSignature>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clef: Option<Clef>,

    pub events: Vec<Event>,
}

impl OutputMeasure {
    pub fn duration(&self) -> f64 {
        self.events.iter().map(Event::end).fold(0.0, f64::max)
    }
}

impl fmt::Display for OutputMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<Measure {}>", self.number)?;
        if let Some(clef) = self.clef {
            writeln!(f, "    {{0.0}} <Clef {:?}>", clef)?;
        }
        if let Some(ts) = self.time_signature {
            writeln!(f, "    {{0.0}} <TimeSignature {}>", ts)?;
        }
        for event in &self.events {
            writeln!(f, "    {}", event)?;
        }
        Ok(())
    }
}

/// Single-part result of a piece reduction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputPart {
    pub measures: Vec<OutputMeasure>,
}

impl OutputPart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a measure; when `ties_from_previous` is set the previous
    /// measure's final event becomes a tie start (or continuation)
    pub fn push_measure(&mut self, measure: OutputMeasure, ties_from_previous: bool) {
        if ties_from_previous {
            if let Some(last) = self.measures.last_mut().and_then(|m| m.events.last_mut()) {
                last.tie = Some(match last.tie {
                    Some(TieType::Stop) | Some(TieType::Continue) => TieType::Continue,
                    _ => TieType::Start,
                });
            }
        }
        self.measures.push(measure);
    }

    /// All events of all measures, in order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.measures.iter().flat_map(|m| m.events.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}

impl fmt::Display for OutputPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for measure in &self.measures {
            write!(f, "{}", measure)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitch::Pitch;

    #[test]
    fn test_push_measure_marks_tie_start() {
        let mut part = OutputPart::new();
        part.push_measure(
            OutputMeasure {
                number: 0,
                events: vec![Event::note(0.0, 4.0, Pitch::new(60))],
                ..Default::default()
            },
            false,
        );
        let mut second = Event::note(0.0, 4.0, Pitch::new(60));
        second.tie = Some(TieType::Stop);
        part.push_measure(
            OutputMeasure {
                number: 1,
                events: vec![second],
                ..Default::default()
            },
            true,
        );
        part.push_measure(
            OutputMeasure {
                number: 2,
                events: vec![Event::note(0.0, 4.0, Pitch::new(60))],
                ..Default::default()
            },
            true,
        );

        assert_eq!(part.measures[0].events[0].tie, Some(TieType::Start));
        assert_eq!(part.measures[1].events[0].tie, Some(TieType::Continue));
        assert_eq!(part.measures[2].events[0].tie, None);
    }

    #[test]
    fn test_push_measure_without_previous_is_harmless() {
        let mut part = OutputPart::new();
        part.push_measure(OutputMeasure::default(), true);
        assert_eq!(part.measures.len(), 1);
    }
}
