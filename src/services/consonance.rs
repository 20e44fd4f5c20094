//! Consonance classification of notes and chords

use crate::models::PitchContent;

/// Intervals above the bass (mod 12) that make a consonant dyad:
/// minor/major third, perfect fifth, minor/major sixth
const CONSONANT_DYAD_INTERVALS: [u8; 5] = [3, 4, 7, 8, 9];

/// Whether `content` is consonant
///
/// Single pitch classes (notes, octaves, unisons) are consonant. Two pitch
/// classes are consonant when the upper one forms a third, fifth or sixth
/// above the bass. Three pitch classes are consonant when they spell a
/// major or minor triad in any inversion. Rests and everything else are not.
pub fn is_consonant(content: &PitchContent) -> bool {
    let pitches = content.pitches();
    let Some(bass) = pitches.iter().map(|p| p.midi).min() else {
        return false;
    };

    let key = content.pitch_class_key();
    match key.len() {
        1 => true,
        2 => {
            let bass_class = bass % 12;
            key.classes()
                .iter()
                .filter(|&&pc| pc != bass_class)
                .all(|&pc| CONSONANT_DYAD_INTERVALS.contains(&((pc + 12 - bass_class) % 12)))
        }
        3 => is_major_or_minor_triad(key.classes()),
        _ => false,
    }
}

/// True when the three pitch classes form a major or minor triad
fn is_major_or_minor_triad(classes: &[u8]) -> bool {
    classes.iter().any(|&root| {
        let mut intervals: Vec<u8> = classes.iter().map(|&pc| (pc + 12 - root) % 12).collect();
        intervals.sort_unstable();
        intervals == [0, 4, 7] || intervals == [0, 3, 7]
    })
}
