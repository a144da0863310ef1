//! Random outline colors

use rand::Rng;

use crate::foundation::math::{Vec3, Vec4};

/// Random opaque color whose RGB part has unit Euclidean length
///
/// Each channel is drawn uniformly from [0, 1) before normalizing. The
/// all-zero draw cannot be normalized and is drawn again.
pub fn random_unit_color<R: Rng + ?Sized>(rng: &mut R) -> Vec4 {
    loop {
        let rgb = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        if let Some(unit) = rgb.try_normalize(f32::EPSILON) {
            return Vec4::new(unit.x, unit.y, unit.z, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn test_unit_length_and_opaque() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let color = random_unit_color(&mut rng);
            assert_relative_eq!(color.xyz().norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(color.w, 1.0);
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    /// Yields zero for the first `zeroes` words, then all ones
    struct ZeroesFirst {
        zeroes: usize,
    }

    impl RngCore for ZeroesFirst {
        fn next_u32(&mut self) -> u32 {
            if self.zeroes > 0 {
                self.zeroes -= 1;
                0
            } else {
                u32::MAX
            }
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.next_u32() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_zero_draw_is_redrawn() {
        let mut rng = ZeroesFirst { zeroes: 3 };

        let color = random_unit_color(&mut rng);
        assert_relative_eq!(color.xyz().norm(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(color.x, color.y);
        assert_eq!(rng.zeroes, 0);
    }
}
