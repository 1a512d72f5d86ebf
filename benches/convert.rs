use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use rga_resize::{
    image::{align_width, pad_right, resize_area},
    resize::prescale_dimensions,
};

pub fn benchmark_prescale(c: &mut Criterion) {
    let dims = [(640, 480), (1280, 720), (1920, 1080), (3840, 2160)];
    let bounds = [(1280, 720), (640, 360)];

    let mut group = c.benchmark_group("prescale");
    for src_dim in dims.iter() {
        let src = RgbImage::from_fn(src_dim.0, src_dim.1, |x, y| {
            Rgb([x as u8, y as u8, (x ^ y) as u8])
        });
        for bound in bounds.iter() {
            let (w, h) = prescale_dimensions(*src_dim, *bound, (320, 180));
            group.bench_with_input(
                format!("{}x{}-{}x{}", src_dim.0, src_dim.1, w, h),
                &src,
                |b, src| {
                    b.iter(|| {
                        let mid = resize_area(src, w, h).unwrap();
                        pad_right(&mid, align_width(w)).unwrap()
                    })
                },
            );
        }
    }
}

criterion_group!(benches, benchmark_prescale);
criterion_main!(benches);
