// Measure-level reduction: weighting policies, trimming and rhythm rewrite
//
// Input (4/4): upper voice E4 G4 C5 (half) | E4 F4 B4 (quarter) | E4 G4 C5 (quarter)
//              lower voice C4 (whole)
// Chordified:  {0.0} CEGC  {2.0} CEFB  {3.0} CEGC

use chord_reducer_wasm::models::{parse_pitches, Event, Measure, PitchClassKey, Pitch, TimeSignature};
use chord_reducer_wasm::reduction::{
    compute_measure_chord_weights, reduce_measure_to_n_chords, MeasureReducer, ReduceError, WeightingPolicy,
};
use chord_reducer_wasm::services::{NotationServices, StandardServices};

fn four_four() -> TimeSignature {
    TimeSignature::new(4, 4).unwrap()
}

fn chordified_scenario() -> Measure {
    let upper = Measure::new(
        0,
        vec![
            Event::chord(0.0, 2.0, parse_pitches("E4 G4 C5").unwrap()),
            Event::chord(2.0, 1.0, parse_pitches("E4 F4 B4").unwrap()),
            Event::chord(3.0, 1.0, parse_pitches("E4 G4 C5").unwrap()),
        ],
    );
    let lower = Measure::new(0, vec![Event::note(0.0, 4.0, Pitch::from_name("C4").unwrap())]);

    let events = StandardServices.chordify(&[&upper, &lower], &four_four()).unwrap();
    Measure::new(0, events).with_time_signature(four_four())
}

fn c_major() -> PitchClassKey {
    PitchClassKey::from_classes(&[0, 4, 7])
}

fn c_major_seventh_sus() -> PitchClassKey {
    PitchClassKey::from_classes(&[0, 11, 4, 5])
}

#[test]
fn test_consonance_weighted_scores() {
    let measure = chordified_scenario();
    let table = compute_measure_chord_weights(&measure.events, WeightingPolicy::ConsonanceWeighted);

    assert_eq!(table.len(), 2);
    assert!((table.get(&c_major()).unwrap() - 3.0).abs() < 1e-9);
    assert!((table.get(&c_major_seventh_sus()).unwrap() - 0.05).abs() < 1e-9);
}

#[test]
fn test_other_policies_scores() {
    let measure = chordified_scenario();

    let cases = [
        (WeightingPolicy::DurationOnly, 3.0, 1.0),
        (WeightingPolicy::DurationBeatStrength, 2.25, 0.5),
        (WeightingPolicy::DurationBeatStrengthPositional, 3.0, 0.5),
    ];

    for (policy, major, dissonant) in cases {
        let table = compute_measure_chord_weights(&measure.events, policy);
        assert!((table.get(&c_major()).unwrap() - major).abs() < 1e-9, "{}", policy);
        assert!((table.get(&c_major_seventh_sus()).unwrap() - dissonant).abs() < 1e-9, "{}", policy);
    }
}

#[test]
fn test_dissonance_trimmed_to_single_chord() {
    let measure = chordified_scenario();

    let reduced = reduce_measure_to_n_chords(&measure, 3, WeightingPolicy::ConsonanceWeighted, 0.3).unwrap();

    assert_eq!(reduced.len(), 1);
    let only = &reduced.events[0];
    assert_eq!(only.offset, 0.0);
    assert_eq!(only.duration, 4.0);
    assert_eq!(only.pitch_class_key(), c_major());
    assert_eq!(only.pitches(), parse_pitches("C4 E4 G4 C5").unwrap().as_slice());
}

#[test]
fn test_returning_sonority_starts_a_new_chord() {
    let measure = chordified_scenario();

    let reduced = reduce_measure_to_n_chords(&measure, 2, WeightingPolicy::DurationOnly, 0.3).unwrap();

    let spans: Vec<(f64, f64)> = reduced.events.iter().map(|e| (e.offset, e.duration)).collect();
    assert_eq!(spans, vec![(0.0, 2.0), (2.0, 1.0), (3.0, 1.0)]);
    assert_eq!(reduced.distinct_sonorities(), 2);
}

#[test]
fn test_duration_is_conserved_for_all_settings() {
    let measure = chordified_scenario();

    for policy in WeightingPolicy::ALL {
        for max_chords in 1..=4 {
            for trim_below in [0.01, 0.1, 0.3, 0.5, 1.0] {
                let reduced = reduce_measure_to_n_chords(&measure, max_chords, policy, trim_below).unwrap();
                assert!((reduced.duration() - 4.0).abs() < 1e-6);
                assert!(reduced.distinct_sonorities() <= max_chords);
            }
        }
    }
}

#[test]
fn test_raising_trim_never_keeps_more_chords() {
    let measure = chordified_scenario();

    let mut previous = usize::MAX;
    for trim_below in [0.01, 0.1, 0.3, 0.5, 0.9, 1.0] {
        let kept = reduce_measure_to_n_chords(&measure, 3, WeightingPolicy::DurationOnly, trim_below)
            .unwrap()
            .distinct_sonorities();
        assert!(kept <= previous, "trim {} kept {} after {}", trim_below, kept, previous);
        previous = kept;
    }
}

#[test]
fn test_all_rest_measure_becomes_one_rest() {
    let measure = Measure::new(3, vec![Event::rest(0.0, 2.0), Event::rest(2.0, 2.0)]);

    let reduced = MeasureReducer::new(3, WeightingPolicy::default(), 0.3).reduce(&measure).unwrap();

    assert_eq!(reduced.len(), 1);
    assert!(reduced.events[0].is_rest());
    assert_eq!(reduced.events[0].duration, 4.0);
}

#[test]
fn test_leading_rest_is_absorbed_by_first_chord() {
    let mut events = vec![
        Event::rest(0.0, 1.0),
        Event::chord(1.0, 2.0, parse_pitches("C4 E4 G4").unwrap()),
        Event::chord(3.0, 1.0, parse_pitches("D4 F4 A4").unwrap()),
    ];
    for event in &mut events {
        event.consonant = true;
    }
    let measure = Measure::new(0, events);

    let reduced = reduce_measure_to_n_chords(&measure, 1, WeightingPolicy::DurationOnly, 0.3).unwrap();

    assert_eq!(reduced.len(), 1);
    assert_eq!(reduced.events[0].offset, 0.0);
    assert_eq!(reduced.events[0].duration, 4.0);
}

#[test]
fn test_offbeat_entry_is_pulled_onto_the_beat() {
    let measure = Measure::new(
        0,
        vec![
            Event::chord(0.0, 1.25, parse_pitches("C4 E4 G4").unwrap()),
            Event::chord(1.25, 2.75, parse_pitches("F4 A4 C5").unwrap()),
        ],
    );

    let reduced = reduce_measure_to_n_chords(&measure, 2, WeightingPolicy::DurationOnly, 0.3).unwrap();

    let spans: Vec<(f64, f64)> = reduced.events.iter().map(|e| (e.offset, e.duration)).collect();
    assert_eq!(spans, vec![(0.0, 1.0), (1.0, 3.0)]);
}

#[test]
fn test_reduction_is_idempotent() {
    let measure = chordified_scenario();
    let reducer = MeasureReducer::new(2, WeightingPolicy::DurationOnly, 0.3);

    let once = reducer.reduce(&measure).unwrap();
    let twice = reducer.reduce(&Measure::new(0, once.events.clone())).unwrap();

    assert_eq!(once.events, twice.events);
}

#[test]
fn test_empty_and_overlapping_measures_are_rejected() {
    let reducer = MeasureReducer::new(3, WeightingPolicy::default(), 0.3);

    assert!(matches!(
        reducer.reduce(&Measure::new(5, vec![])),
        Err(ReduceError::MalformedMeasure { measure: 5, .. })
    ));

    let overlapping = Measure::new(
        6,
        vec![
            Event::note(0.0, 2.0, Pitch::new(60)),
            Event::note(1.0, 2.0, Pitch::new(62)),
        ],
    );
    assert!(matches!(
        reducer.reduce(&overlapping),
        Err(ReduceError::MalformedMeasure { measure: 6, .. })
    ));
}
