//! Example: build one octave from a synthetic blob image and print per-level
//! statistics.
//!
//! Run from the workspace root:
//!   cargo run -p scale-space --example octave_stats
//!   RUST_LOG=debug cargo run -p scale-space --example octave_stats

use std::time::Instant;

use scale_space::{GaussianFilter, Image, LowPassFilter, Octave, Result, scale_sigma};

const WIDTH: usize = 256;
const HEIGHT: usize = 192;
const SCALES_PER_OCTAVE: usize = 3;
const SEED_BLUR: f64 = 1.6;
const INPUT_BLUR: f64 = 0.5;

/// Dark background with a few bright discs of different radii.
fn blobs() -> Result<Image> {
    let discs = [(64.0, 64.0, 3.0), (160.0, 80.0, 6.0), (96.0, 140.0, 12.0)];
    let mut img = Image::new(WIDTH, HEIGHT)?;
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let inside = discs.iter().any(|&(cx, cy, r)| {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                dx * dx + dy * dy <= r * r
            });
            if inside {
                img.set(x, y, 1.0)?;
            }
        }
    }
    Ok(img)
}

fn min_max(img: &Image) -> (f32, f32) {
    img.data()
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

fn main() -> Result<()> {
    env_logger::init();

    let filter = GaussianFilter::new();
    let input = blobs()?;

    // Bring the input from its assumed camera blur up to the seed blur.
    let seed = filter.filter(&input, filter.sigma_difference(INPUT_BLUR, SEED_BLUR)?)?;

    let t0 = Instant::now();
    let octave = Octave::create(&seed, SCALES_PER_OCTAVE, SEED_BLUR, &filter)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    println!(
        "octave {}x{}, {} scales per octave, built in {elapsed_ms:.2} ms",
        octave.width(),
        octave.height(),
        octave.scales_per_octave()
    );
    for (i, img) in octave.scale_images().iter().enumerate() {
        let (lo, hi) = min_max(img);
        let sigma = scale_sigma(SEED_BLUR, SCALES_PER_OCTAVE, i);
        println!("scale {i}: sigma {sigma:6.3}  min {lo:8.5}  max {hi:8.5}");
    }
    for (i, dog) in octave.difference_of_gaussians().iter().enumerate() {
        let (lo, hi) = min_max(dog);
        println!("dog   {i}: min {lo:9.6}  max {hi:9.6}");
    }

    Ok(())
}
