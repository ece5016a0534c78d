//! Resolve a key, scale and degree list into chord slots.
//!
//! Scales are given as semitone steps above the tonic (`[0, 2, 4, 5, 7, 9, 11]`
//! for major) together with the chord type built on each degree. A
//! progression is a list of 1-based degrees such as `[1, 5, 6, 4]`.

use super::chord::ChordSlot;
use super::notes::PitchClass;
use crate::error::ProgressionError;

/// Whether a key spells its accidentals with sharps or flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharp,
    Flat,
}

const KEY_PREFERENCES: &[(&str, Spelling)] = &[
    ("C", Spelling::Sharp),
    ("G", Spelling::Sharp),
    ("D", Spelling::Sharp),
    ("A", Spelling::Sharp),
    ("E", Spelling::Sharp),
    ("B", Spelling::Sharp),
    ("F#", Spelling::Sharp),
    ("C#", Spelling::Sharp),
    ("F", Spelling::Flat),
    ("Bb", Spelling::Flat),
    ("Eb", Spelling::Flat),
    ("Ab", Spelling::Flat),
    ("Db", Spelling::Flat),
    ("Gb", Spelling::Flat),
    ("Cb", Spelling::Flat),
];

/// Keys offered by the control surface, in chromatic order.
pub const KEYS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Major scale as semitone steps above the tonic.
pub const MAJOR_SCALE: &[u8] = &[0, 2, 4, 5, 7, 9, 11];

/// Diatonic triads of the major scale, by degree.
pub const MAJOR_TRIADS: &[&str] = &["maj", "m", "m", "maj", "maj", "m", "dim"];

/// Spelling preference for a key. Keys missing from the table (e.g. `D#`)
/// are unknown.
pub fn key_spelling(key: &str) -> Option<Spelling> {
    KEY_PREFERENCES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, spelling)| *spelling)
}

/// Spell the notes of a scale in `key`.
pub fn scale_notes(key: &str, steps: &[u8]) -> Result<Vec<String>, ProgressionError> {
    let spelling = key_spelling(key).ok_or_else(|| ProgressionError::UnknownKey(key.to_string()))?;
    let tonic = PitchClass::parse(key).ok_or_else(|| ProgressionError::UnknownKey(key.to_string()))?;
    if steps.is_empty() {
        return Err(ProgressionError::EmptyScale);
    }

    Ok(steps
        .iter()
        .map(|&step| {
            let class = PitchClass::from_semitone(tonic.semitone() as i32 + step as i32);
            match spelling {
                Spelling::Sharp => class.sharp_name().to_string(),
                Spelling::Flat => class.flat_name().to_string(),
            }
        })
        .collect())
}

/// Build one chord slot per 1-based `degree`.
///
/// `chord_types[i]` is the chord type on scale degree `i + 1`; a missing
/// entry builds a major chord.
pub fn resolve_progression(
    key: &str,
    steps: &[u8],
    chord_types: &[&str],
    degrees: &[usize],
) -> Result<Vec<ChordSlot>, ProgressionError> {
    let notes = scale_notes(key, steps)?;

    degrees
        .iter()
        .map(|&degree| {
            if degree == 0 || degree > notes.len() {
                return Err(ProgressionError::DegreeOutOfRange {
                    degree,
                    scale_len: notes.len(),
                });
            }
            let chord_type = chord_types.get(degree - 1).copied().unwrap_or("maj");
            let chord_type = if chord_type.is_empty() { "maj" } else { chord_type };
            Ok(ChordSlot::new(notes[degree - 1].clone(), chord_type))
        })
        .collect()
}

/// Parse a progression string such as `"1, 5, 6, 4"`.
pub fn parse_degrees(text: &str) -> Option<Vec<usize>> {
    text.trim()
        .trim_matches('"')
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAJOR: &[u8] = MAJOR_SCALE;

    #[test]
    fn spells_with_key_preference() {
        assert_eq!(scale_notes("D", MAJOR).unwrap(), ["D", "E", "F#", "G", "A", "B", "C#"]);
        assert_eq!(scale_notes("F", MAJOR).unwrap(), ["F", "G", "A", "Bb", "C", "D", "E"]);
        assert_eq!(scale_notes("Eb", &[0, 2, 3]).unwrap(), ["Eb", "F", "Gb"]);
    }

    #[test]
    fn resolves_pop_progression() {
        let degrees = parse_degrees("1, 5, 6, 4").unwrap();
        let slots = resolve_progression("C", MAJOR, MAJOR_TRIADS, &degrees).unwrap();
        let names: Vec<_> = slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["C", "G", "Am", "F"]);
        assert_eq!(slots[2].note, "A");
        assert_eq!(slots[2].chord_type, "m");
    }

    #[test]
    fn missing_chord_types_default_to_major() {
        let slots = resolve_progression("G", MAJOR, &["maj", ""], &[2, 7]).unwrap();
        assert_eq!(slots[0].chord_type, "maj");
        assert_eq!(slots[1].name, "F#");
    }

    #[test]
    fn rejects_out_of_range_degrees() {
        let err = resolve_progression("C", &[0, 3, 5, 7, 10], MAJOR_TRIADS, &[1, 6]).unwrap_err();
        assert_eq!(err, ProgressionError::DegreeOutOfRange { degree: 6, scale_len: 5 });

        let err = resolve_progression("C", MAJOR, MAJOR_TRIADS, &[0]).unwrap_err();
        assert!(matches!(err, ProgressionError::DegreeOutOfRange { degree: 0, .. }));
    }

    #[test]
    fn rejects_unknown_keys_and_empty_scales() {
        assert_eq!(
            scale_notes("H", MAJOR).unwrap_err(),
            ProgressionError::UnknownKey("H".into())
        );
        assert_eq!(scale_notes("C", &[]).unwrap_err(), ProgressionError::EmptyScale);
    }

    #[test]
    fn every_offered_key_resolves() {
        for key in KEYS {
            assert_eq!(scale_notes(key, MAJOR).unwrap().len(), 7, "{key}");
        }
    }

    #[test]
    fn degree_parsing() {
        assert_eq!(parse_degrees("\"2,5,1\""), Some(vec![2, 5, 1]));
        assert_eq!(parse_degrees("1, x"), None);
    }
}
