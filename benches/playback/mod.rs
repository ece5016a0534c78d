//! Benchmarks for tick dispatch.

use std::hint::black_box;

use chord_looper::{
    clock::Transport,
    sequencing::{presets, ChordSlot},
    voices::{ChordVoice, DrumVoice},
    LooperConfig, Sequencer,
};
use chord_looper::sequencing::{DrumLane, Duration, Pitch};
use criterion::{BenchmarkId, Criterion};

use crate::TEMPOS;

/// Voice that only counts triggers, so the benchmark measures dispatch.
#[derive(Default)]
struct CountingVoice {
    triggers: usize,
}

impl ChordVoice for CountingVoice {
    fn trigger(&mut self, notes: &[Pitch], _duration: Duration, _time: f64) {
        self.triggers += notes.len();
    }
}

impl DrumVoice for CountingVoice {
    fn trigger(&mut self, _lane: DrumLane, _duration: Duration, _time: f64, _velocity: f32) {
        self.triggers += 1;
    }
}

fn looper(bpm: f64) -> Sequencer<Transport, CountingVoice, CountingVoice> {
    let mut seq = Sequencer::new(
        Transport::new(bpm),
        CountingVoice::default(),
        CountingVoice::default(),
        LooperConfig::new().with_tempo(bpm).with_seed(42),
    );
    seq.set_chords(vec![
        ChordSlot::new("C", "maj7"),
        ChordSlot::new("A", "m7"),
        ChordSlot::new("D", "m7"),
        ChordSlot::new("G", "7"),
    ]);
    // Busiest built-in patterns
    seq.select_rhythm(presets::rhythms().ok().and_then(|r| r.into_iter().nth(1)));
    seq.select_drums(presets::drum_patterns().ok().and_then(|d| d.into_iter().next()));
    seq
}

pub fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback/tick");

    let mut seq = looper(120.0);
    let mut time = 0.0;
    group.bench_function("on_tick", |b| {
        b.iter(|| {
            seq.on_tick(black_box(time));
            time += 0.125;
        })
    });

    group.finish();
}

pub fn bench_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback/loop");

    for &bpm in TEMPOS {
        // One full 16-step loop plus the lead-in
        let seconds = Duration::WHOLE.to_seconds(bpm) * 2.0;
        group.bench_with_input(BenchmarkId::new("pump", bpm as u32), &bpm, |b, &bpm| {
            b.iter(|| {
                let mut seq = looper(bpm);
                seq.start();
                let ticks = seq.pump(0.0, seconds);
                black_box(ticks + seq.chord_voice().triggers + seq.drum_voice().triggers)
            })
        });
    }

    group.finish();
}
