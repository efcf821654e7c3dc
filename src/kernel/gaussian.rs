//! Fixed 5x5 Gaussian weights and their 1x5 separable factor.
//!
//! The 2D table is the outer product of the 1D vector, so a horizontal pass
//! followed by a vertical pass with `KERNEL_1D` applies the same weighting
//! as one pass with `KERNEL_2D`. Each table is normalized by the sum of its
//! own weights.

/// Kernel radius: taps reach this far on each side of the center.
pub const RADIUS: usize = 2;

/// Number of taps along one axis.
pub const TAPS: usize = 2 * RADIUS + 1;

/// Separable 1x5 weights.
pub const KERNEL_1D: [u32; TAPS] = [1, 2, 4, 2, 1];

/// Normalization divisor for one 1x5 pass.
pub const KERNEL_1D_SUM: u32 = sum_1d(&KERNEL_1D);

/// Full 5x5 weights: `KERNEL_2D[i][j] == KERNEL_1D[i] * KERNEL_1D[j]`.
pub const KERNEL_2D: [[u32; TAPS]; TAPS] = outer(&KERNEL_1D);

/// Normalization divisor for the 5x5 pass.
pub const KERNEL_2D_SUM: u32 = sum_2d(&KERNEL_2D);

const fn sum_1d(k: &[u32; TAPS]) -> u32 {
    let mut sum = 0;
    let mut i = 0;
    while i < TAPS {
        sum += k[i];
        i += 1;
    }
    sum
}

const fn outer(k: &[u32; TAPS]) -> [[u32; TAPS]; TAPS] {
    let mut out = [[0; TAPS]; TAPS];
    let mut i = 0;
    while i < TAPS {
        let mut j = 0;
        while j < TAPS {
            out[i][j] = k[i] * k[j];
            j += 1;
        }
        i += 1;
    }
    out
}

const fn sum_2d(k: &[[u32; TAPS]; TAPS]) -> u32 {
    let mut sum = 0;
    let mut i = 0;
    while i < TAPS {
        sum += sum_1d(&k[i]);
        i += 1;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::{KERNEL_1D, KERNEL_1D_SUM, KERNEL_2D, KERNEL_2D_SUM, TAPS};

    #[test]
    fn tables_match_known_weights() {
        assert_eq!(KERNEL_1D_SUM, 10);
        assert_eq!(KERNEL_2D[2][2], 16);
        assert_eq!(KERNEL_2D[0][0], 1);
        assert_eq!(KERNEL_2D[4][4], 1);
        assert_eq!(KERNEL_2D[1], [2, 4, 8, 4, 2]);
        assert_eq!(KERNEL_2D_SUM, KERNEL_1D_SUM * KERNEL_1D_SUM);
    }

    #[test]
    fn table_is_symmetric_outer_product() {
        for i in 0..TAPS {
            assert_eq!(KERNEL_1D[i], KERNEL_1D[TAPS - 1 - i]);
            for j in 0..TAPS {
                assert_eq!(KERNEL_2D[i][j], KERNEL_1D[i] * KERNEL_1D[j]);
                assert_eq!(KERNEL_2D[i][j], KERNEL_2D[j][i]);
            }
        }
    }

    #[test]
    fn accumulator_cannot_overflow_u32() {
        let worst = u64::from(u8::MAX) * u64::from(KERNEL_2D_SUM);
        assert!(worst < u64::from(u32::MAX));
    }
}
