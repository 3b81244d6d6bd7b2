use criterion::{criterion_group, criterion_main, Criterion, black_box};

use brickyard::core::{DVec3, Footprint};
use brickyard::format::{
    editor_to_viewer_layers, standard_brick, viewer_layers_to_editor, EditorBrick, ViewerLayer,
    ViewerLayers,
};
use brickyard::grid::{has_support, is_valid_placement};

/// A solid `side x side` slab of unit bricks at `y`
fn slab(side: u32, y: f64) -> Vec<EditorBrick> {
    (0..side * side)
        .map(|i| EditorBrick {
            id: format!("b{}", i),
            position: DVec3::new((i % side) as f64, y, (i / side) as f64),
            rotation: 0.0,
            size: Footprint::UNIT,
            color: "#ff6b6b".to_string(),
        })
        .collect()
}

fn bench_has_support_32(c: &mut Criterion) {
    let ground = slab(32, 0.0);
    let position = DVec3::new(15.5, 1.0, 15.5);
    let size = Footprint::new(4, 4);

    c.bench_function("has_support_4x4_on_32x32", |b| {
        b.iter(|| has_support(black_box(position), black_box(size), black_box(ground.as_slice())))
    });
}

fn bench_valid_placement_32(c: &mut Criterion) {
    let mut bricks = slab(32, 0.0);
    bricks.extend(slab(16, 1.0));
    let position = DVec3::new(7.5, 2.0, 7.5);
    let size = Footprint::new(2, 2);

    c.bench_function("valid_placement_2x2_on_two_layers", |b| {
        b.iter(|| is_valid_placement(black_box(position), black_box(size), black_box(bricks.as_slice())))
    });
}

fn bench_layer_round_trip(c: &mut Criterion) {
    let layers = ViewerLayers {
        layers: (0..20)
            .map(|layer| ViewerLayer {
                bricks: (0..500)
                    .map(|i| {
                        let center = DVec3::new((i % 25) as f64 * 0.008, 0.0, (i / 25) as f64 * 0.008);
                        standard_brick(center, Footprint::UNIT, "#4a90d9", layer % 3 == 0)
                    })
                    .collect(),
            })
            .collect(),
    };

    c.bench_function("layers_round_trip_10k", |b| {
        b.iter(|| {
            let editor = viewer_layers_to_editor(black_box(&layers));
            editor_to_viewer_layers(&editor)
        })
    });
}

criterion_group!(
    benches,
    bench_has_support_32,
    bench_valid_placement_32,
    bench_layer_round_trip,
);
criterion_main!(benches);
