use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use binauralizer::{HrtfDataset, HrtfEntry, ListenerPosition, SpatializationProcessor};

const QUANTA: &[usize] = &[128usize, 512usize, 1024usize];

/// Roughly the shape of a real dataset: 512-sample impulses padded to 1024 bins, at about 700 directions.
fn synthetic_dataset() -> Arc<HrtfDataset> {
    let bins = 1024;
    let mut entries = vec![];
    for elevation in (-40..=90).step_by(10) {
        for azimuth in (0..360).step_by(7) {
            let response = (0..bins)
                .flat_map(|i| {
                    let phase = (i * (azimuth as usize + 1)) as f32 * 0.001;
                    [phase.cos(), phase.sin()]
                })
                .collect::<Vec<_>>();
            entries.push(HrtfEntry {
                elevation,
                azimuth,
                complex_freq_resp_l: response.clone(),
                complex_freq_resp_r: response,
            });
        }
    }

    Arc::new(HrtfDataset::from_entries(entries).unwrap())
}

pub fn process_quantum(c: &mut Criterion) {
    let dataset = synthetic_dataset();
    let mut group = c.benchmark_group("SpatializationProcessor::process");

    for quantum in QUANTA.iter().copied() {
        group.throughput(Throughput::Elements(quantum as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(quantum),
            &(quantum,),
            |b, (quantum,)| {
                let mut processor = SpatializationProcessor::new(dataset.clone());
                let input = (0..*quantum)
                    .map(|i| (i as f32 * 0.05).sin())
                    .collect::<Vec<_>>();
                let mut left = vec![0.0f32; *quantum];
                let mut right = vec![0.0f32; *quantum];
                let position = ListenerPosition::new(1.5, 2.0, 0.3);

                b.iter(|| {
                    processor
                        .process(
                            &[&input[..]],
                            &mut [&mut left[..], &mut right[..]],
                            position,
                        )
                        .unwrap();
                    black_box(&left);
                    black_box(&right);
                });
            },
        );
    }
}

criterion_group!(benches, process_quantum);
criterion_main!(benches);
