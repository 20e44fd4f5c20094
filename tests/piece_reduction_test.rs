// Whole-piece reduction: multi-part input, ties, voicing, clef and JSON boundary
//
// Soprano/alto in one part, bass in another:
//   m0: C major (upper E4 G4 C5, bass C3)
//   m1: C major again          -> tied from m0
//   m2: G major (upper D4 G4 B4, bass G2) with a passing A2 in the bass

use chord_reducer_wasm::models::{parse_pitches, Clef, Event, Measure, OutputPart, Part, Pitch, Score, TieType, TimeSignature};
use chord_reducer_wasm::reduction::json::reduce_score_json;
use chord_reducer_wasm::reduction::{reduce_parts, ReductionOptions, WeightingPolicy};
use chord_reducer_wasm::services::StandardServices;

fn four_four() -> TimeSignature {
    TimeSignature::new(4, 4).unwrap()
}

fn pitch(name: &str) -> Pitch {
    Pitch::from_name(name).unwrap()
}

fn midis(event: &Event) -> Vec<u8> {
    event.pitches().iter().map(|p| p.midi).collect()
}

fn chorale() -> Score {
    let upper = Part {
        name: "Upper".to_string(),
        measures: vec![
            Measure::new(0, vec![Event::chord(0.0, 4.0, parse_pitches("E4 G4 C5").unwrap())])
                .with_time_signature(four_four()),
            Measure::new(1, vec![Event::chord(0.0, 4.0, parse_pitches("E4 G4 C5").unwrap())]),
            Measure::new(2, vec![Event::chord(0.0, 4.0, parse_pitches("D4 G4 B4").unwrap())]),
        ],
    };
    let bass = Part {
        name: "Bass".to_string(),
        measures: vec![
            Measure::new(0, vec![Event::note(0.0, 4.0, pitch("C3"))]).with_time_signature(four_four()),
            Measure::new(1, vec![Event::note(0.0, 4.0, pitch("C3"))]),
            Measure::new(
                2,
                vec![
                    Event::note(0.0, 3.0, pitch("G2")),
                    Event::note(3.0, 1.0, pitch("A2")),
                ],
            ),
        ],
    };
    Score {
        parts: vec![upper, bass],
    }
}

#[test]
fn test_chorale_reduces_to_one_chord_per_measure() {
    let part = reduce_parts(&chorale(), &ReductionOptions::default(), &StandardServices).unwrap();

    assert_eq!(part.measures.len(), 3);
    for measure in &part.measures {
        assert_eq!(measure.events.len(), 1);
        assert!((measure.duration() - 4.0).abs() < 1e-6);
    }

    assert_eq!(midis(&part.measures[2].events[0]), vec![43, 62, 67, 71]);
}

#[test]
fn test_identical_measures_are_tied() {
    let part = reduce_parts(&chorale(), &ReductionOptions::default(), &StandardServices).unwrap();

    let ties: Vec<Option<TieType>> = part.events().map(|e| e.tie).collect();
    assert_eq!(ties, vec![Some(TieType::Start), Some(TieType::Stop), None]);
}

#[test]
fn test_time_signature_only_on_first_measure() {
    let part = reduce_parts(&chorale(), &ReductionOptions::default(), &StandardServices).unwrap();

    assert_eq!(part.measures[0].time_signature, Some(four_four()));
    assert_eq!(part.measures[1].time_signature, None);
    assert_eq!(part.measures[2].time_signature, None);
}

#[test]
fn test_closed_position_output() {
    let options = ReductionOptions::default().with_closed_position(Some(4));

    let part = reduce_parts(&chorale(), &options, &StandardServices).unwrap();

    assert_eq!(midis(&part.measures[0].events[0]), vec![60, 64, 67]);
    assert_eq!(part.measures[0].clef, Some(Clef::Treble));
}

#[test]
fn test_open_voicing_with_low_bass_keeps_treble_from_median() {
    let part = reduce_parts(&chorale(), &ReductionOptions::default(), &StandardServices).unwrap();

    // median of all output pitches sits around G4
    assert_eq!(part.measures[0].clef, Some(Clef::Treble));
}

#[test]
fn test_duration_only_keeps_the_passing_bass_chord() {
    let options = ReductionOptions::default()
        .with_weighting(WeightingPolicy::DurationOnly)
        .with_trim_below(0.3)
        .with_max_chords(2);

    let part = reduce_parts(&chorale(), &options, &StandardServices).unwrap();

    let spans: Vec<(f64, f64)> = part.measures[2].events.iter().map(|e| (e.offset, e.duration)).collect();
    assert_eq!(spans, vec![(0.0, 3.0), (3.0, 1.0)]);
}

#[test]
fn test_json_round_trip_through_the_boundary() {
    let score_json = serde_json::to_string(&chorale()).unwrap();

    let output = reduce_score_json(&score_json, r#"{"closedPosition": true, "forceOctave": 4}"#).unwrap();
    let part: OutputPart = serde_json::from_str(&output).unwrap();

    assert_eq!(part.measures.len(), 3);
    assert_eq!(part.measures[0].events[0].tie, Some(TieType::Start));
}
