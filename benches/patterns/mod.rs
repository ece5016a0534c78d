//! Benchmarks for loading patterns and building chords.

use std::hint::black_box;

use chord_looper::sequencing::{
    chord_notes, presets, resolve_progression, ChordSlot, DrumRecord, RhythmPattern,
    RhythmRecord,
};
use criterion::Criterion;

pub fn bench_rhythms(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns/rhythm");

    let codes = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let record = RhythmRecord {
        name: "bench".to_string(),
        left1: codes(&["1W", "0", "0", "0"]),
        left2: codes(&["1H", "0", "1H", "0"]),
        left3: codes(&["1dQ", "0", "1E", "1Q"]),
        left4: codes(&["1Q", "1Q", "1Q", "1Q"]),
        right1: codes(&["0", "1E", "0", "1E"]),
        right2: codes(&["1dH", "0", "0", "1Q"]),
        right3: codes(&["1E", "1E", "1dE", "1E"]),
        right4: codes(&["1W", "0", "0", "0"]),
    };

    group.bench_function("from_record", |b| {
        b.iter(|| RhythmPattern::try_from(black_box(record.clone())))
    });
    group.bench_function("presets", |b| b.iter(presets::rhythms));

    group.finish();
}

pub fn bench_drums(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns/drums");

    let record = DrumRecord {
        name: "bench".to_string(),
        kick: "1000000010100000,1000000010100010,1000000010100000,1000001010100010".to_string(),
        snare: "0000100000001000".to_string(),
        hat_open: "0000000000000010".to_string(),
        hat_closed: "1010101010101010".to_string(),
        ride: String::new(),
        stick: String::new(),
    };

    group.bench_function("from_record", |b| {
        b.iter(|| chord_looper::sequencing::DrumPattern::try_from(black_box(record.clone())))
    });
    group.bench_function("presets", |b| b.iter(presets::drum_patterns));

    group.finish();
}

pub fn bench_chords(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns/chords");

    let slot = ChordSlot::new("Bb", "m7b5");
    group.bench_function("chord_notes", |b| {
        b.iter(|| chord_notes(black_box(&slot), black_box(4)))
    });

    let steps = chord_looper::sequencing::progression::MAJOR_SCALE;
    let types = chord_looper::sequencing::progression::MAJOR_TRIADS;
    group.bench_function("resolve_progression", |b| {
        b.iter(|| resolve_progression(black_box("Eb"), steps, types, black_box(&[1, 6, 4, 5])))
    });

    group.finish();
}
