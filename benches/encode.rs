use criterion::{criterion_group, criterion_main, Criterion};
use image::RgbImage;
use rga_resize::image::encode_jpeg;

pub fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("jpeg");
    for dim in [
        (320, 240),
        (640, 360),
        (640, 480),
        (1280, 720),
        (1920, 1080),
    ]
    .iter()
    {
        let img = RgbImage::new(dim.0, dim.1);
        group.bench_with_input(format!("{}x{}", dim.0, dim.1), &img, |b, img| {
            b.iter(|| encode_jpeg(img, 95).unwrap())
        });
    }
}

criterion_group!(benches, benchmark_encode);
criterion_main!(benches);
