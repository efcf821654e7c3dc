//! Behavioral checks shared by both blur variants.

use gaussblur::{
    full_convolve, full_convolve_into, separable_convolve, separable_convolve_into, BlurError,
    BlurResult, Convolver, Full2dScalar, RasterImage, RasterView, SeparableScalar, Variant,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type IntoFn = for<'a> fn(RasterView<'a>, &mut RasterImage) -> BlurResult<()>;

const VARIANTS: [(&str, IntoFn); 2] = [
    ("full_2d", full_convolve_into),
    ("separable", separable_convolve_into),
];

fn random_image(width: usize, height: usize, seed: u64) -> RasterImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|_| [rng.random(), rng.random(), rng.random()])
        .collect();
    RasterImage::new(data, width, height).unwrap()
}

fn is_border(x: usize, y: usize, width: usize, height: usize) -> bool {
    x < 2 || y < 2 || x + 2 >= width || y + 2 >= height
}

#[test]
fn border_pixels_keep_destination_contents() {
    let (width, height) = (13, 9);
    let src = random_image(width, height, 7);
    let marker = [1u8, 2, 3];

    for (name, convolve_into) in VARIANTS {
        let mut dst = RasterImage::filled(width, height, marker).unwrap();
        convolve_into(src.view(), &mut dst).unwrap();
        for y in 0..height {
            for x in 0..width {
                if is_border(x, y, width, height) {
                    assert_eq!(dst.get(x, y), Some(&marker), "{name} wrote border ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn zero_image_blurs_to_zero() {
    let src = RasterImage::zeros(16, 11).unwrap();
    for (name, convolve_into) in VARIANTS {
        let mut dst = RasterImage::filled(16, 11, [9, 9, 9]).unwrap();
        convolve_into(src.view(), &mut dst).unwrap();
        for y in 2..9 {
            for x in 2..14 {
                assert_eq!(dst.get(x, y), Some(&[0; 3]), "{name} at ({x}, {y})");
            }
        }
    }
}

#[test]
fn constant_image_is_invariant_in_interior() {
    for value in [0u8, 1, 127, 200, 255] {
        let src = RasterImage::filled(10, 8, [value; 3]).unwrap();
        for out in [
            full_convolve(src.view()).unwrap(),
            separable_convolve(src.view()).unwrap(),
        ] {
            for y in 2..6 {
                for x in 2..8 {
                    assert_eq!(out.get(x, y), Some(&[value; 3]));
                }
            }
        }
    }
}

#[test]
fn seven_by_seven_fills_three_by_three_interior() {
    let src = RasterImage::filled(7, 7, [127; 3]).unwrap();
    for out in [
        full_convolve(src.view()).unwrap(),
        separable_convolve(src.view()).unwrap(),
    ] {
        for y in 0..7 {
            for x in 0..7 {
                let inside = (2..=4).contains(&x) && (2..=4).contains(&y);
                let expected = if inside { [127; 3] } else { [0; 3] };
                assert_eq!(out.get(x, y), Some(&expected), "pixel ({x}, {y})");
            }
        }
    }
}

#[test]
fn images_below_kernel_size_are_untouched() {
    let src = random_image(4, 4, 11);
    for (name, convolve_into) in VARIANTS {
        let mut dst = RasterImage::filled(4, 4, [42, 43, 44]).unwrap();
        let before = dst.clone();
        convolve_into(src.view(), &mut dst).unwrap();
        assert_eq!(dst, before, "{name}");
    }

    let narrow = random_image(4, 12, 12);
    let short = random_image(12, 4, 13);
    for src in [narrow, short] {
        let zeros = RasterImage::zeros(src.width(), src.height()).unwrap();
        assert_eq!(full_convolve(src.view()).unwrap(), zeros);
        assert_eq!(separable_convolve(src.view()).unwrap(), zeros);
    }
}

#[test]
fn separable_stays_within_two_levels_of_full_2d() {
    for (seed, (width, height)) in [(1u64, (32usize, 24usize)), (2, (5, 5)), (3, (57, 41))] {
        let src = random_image(width, height, seed);
        let full = full_convolve(src.view()).unwrap();
        let sep = separable_convolve(src.view()).unwrap();

        let mut max_delta = 0u8;
        for y in 2..height - 2 {
            for x in 2..width - 2 {
                let a = full.get(x, y).unwrap();
                let b = sep.get(x, y).unwrap();
                for c in 0..3 {
                    max_delta = max_delta.max(a[c].abs_diff(b[c]));
                    // Two truncations can only lose value relative to one.
                    assert!(b[c] <= a[c], "seed {seed} ({x}, {y}) channel {c}");
                }
            }
        }
        assert!(max_delta <= 2, "seed {seed}: delta {max_delta}");
    }
}

#[test]
fn channels_are_blurred_independently() {
    let src = RasterImage::filled(9, 9, [10, 100, 250]).unwrap();
    let out = full_convolve(src.view()).unwrap();
    assert_eq!(out.get(4, 4), Some(&[10, 100, 250]));
    let out = separable_convolve(src.view()).unwrap();
    assert_eq!(out.get(4, 4), Some(&[10, 100, 250]));
}

#[test]
fn strided_source_matches_contiguous_source() {
    let src = random_image(12, 10, 21);
    let stride = 15;
    let mut padded = vec![[0u8; 3]; stride * 10];
    for y in 0..10 {
        padded[y * stride..y * stride + 12].copy_from_slice(src.row(y).unwrap());
    }
    let view = RasterView::new(&padded, 12, 10, stride).unwrap();

    assert_eq!(
        full_convolve(view).unwrap(),
        full_convolve(src.view()).unwrap()
    );
    assert_eq!(
        separable_convolve(view).unwrap(),
        separable_convolve(src.view()).unwrap()
    );
}

#[test]
fn mismatched_destination_fails_before_writing() {
    let src = random_image(8, 8, 5);
    for (name, convolve_into) in VARIANTS {
        let mut dst = RasterImage::filled(8, 7, [3, 3, 3]).unwrap();
        let err = convolve_into(src.view(), &mut dst).unwrap_err();
        assert_eq!(
            err,
            BlurError::DestinationSizeMismatch {
                src_width: 8,
                src_height: 8,
                dst_width: 8,
                dst_height: 7,
            },
            "{name}"
        );
        assert!(dst.data().iter().all(|px| *px == [3, 3, 3]));
    }
}

#[test]
fn repeated_calls_reuse_destination() {
    let src = random_image(20, 20, 9);
    let expected = separable_convolve(src.view()).unwrap();
    let mut dst = RasterImage::zeros(20, 20).unwrap();
    for _ in 0..3 {
        separable_convolve_into(src.view(), &mut dst).unwrap();
        assert_eq!(dst, expected);
    }
}

#[test]
fn trait_and_variant_dispatch_agree() {
    let src = random_image(11, 9, 4);
    assert_eq!(Full2dScalar::VARIANT, Variant::Full2d);
    assert_eq!(SeparableScalar::VARIANT, Variant::Separable);

    for variant in Variant::ALL {
        let mut dst = RasterImage::zeros(11, 9).unwrap();
        variant.convolve_into(src.view(), &mut dst, false).unwrap();
        let expected = match variant {
            Variant::Full2d => Full2dScalar::convolve(src.view()).unwrap(),
            Variant::Separable => SeparableScalar::convolve(src.view()).unwrap(),
        };
        assert_eq!(dst, expected);
    }
}

#[cfg(not(feature = "rayon"))]
#[test]
fn parallel_request_without_rayon_is_rejected() {
    let src = random_image(8, 8, 1);
    let mut dst = RasterImage::zeros(8, 8).unwrap();
    let err = Variant::Full2d
        .convolve_into(src.view(), &mut dst, true)
        .unwrap_err();
    assert_eq!(err, BlurError::FeatureDisabled("rayon"));
}
