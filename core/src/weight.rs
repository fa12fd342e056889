use std::fmt::Debug;
use std::ops::Add;

/// Edge weight: ordered, additive, with a zero and a sign check.
///
/// Implemented for the primitive integer and float types. Floats use
/// `PartialOrd`, so NaN is rejected by [`Weight::is_valid`] along with
/// negative values.
pub trait Weight: Copy + Debug + PartialOrd + Add<Output = Self> {
    fn zero() -> Self;

    /// Sum of two weights, None if it does not fit the type.
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// True if the weight may be stored on a link (non-negative, not NaN).
    fn is_valid(&self) -> bool {
        *self >= Self::zero()
    }
}

macro_rules! impl_weight {
    (int: $($t:ty),*; float: $($f:ty),* $(;)?) => {
        $(
            impl Weight for $t {
                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
        $(
            impl Weight for $f {
                #[inline]
                fn zero() -> Self {
                    0.0
                }

                // overflow saturates to infinity
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
            }
        )*
    };
}

impl_weight! {
    int: u8, u16, u32, u64, usize, i8, i16, i32, i64, isize;
    float: f32, f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_validity() {
        assert!(0i32.is_valid());
        assert!(5i64.is_valid());
        assert!(!(-1i32).is_valid());
    }

    #[test]
    fn test_float_validity() {
        assert!(0.0f64.is_valid());
        assert!(2.5f32.is_valid());
        assert!(!(-0.5f64).is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(f64::INFINITY.is_valid());
    }

    #[test]
    fn test_unsigned_always_valid() {
        assert!(u32::MAX.is_valid());
        assert_eq!(u64::zero(), 0);
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Weight::checked_add(3u32, 4), Some(7));
        assert_eq!(Weight::checked_add(u32::MAX, 1), None);
        assert_eq!(Weight::checked_add(i8::MAX, 0), Some(i8::MAX));
        assert_eq!(Weight::checked_add(1.5f64, 2.0), Some(3.5));
        assert_eq!(Weight::checked_add(f32::MAX, f32::MAX), Some(f32::INFINITY));
    }
}
