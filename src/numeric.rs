//! 权重 / 容量的数值运算
//!
//! 算法对权重类型泛型化，只依赖这里定义的运算：
//! - `Weight`：零值、加法、全序比较，以及可选的"不可达"哨兵值
//! - `Capacity`：在 `Weight` 之上增加减法（最大流需要）
//!
//! 原生数值类型已内置实现；其他类型需要显式实现这两个 trait。

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};

/// 最短路径算法使用的权重运算
pub trait Weight: Clone + Debug {
    /// 加法单位元
    fn zero() -> Self;

    /// 累加两个权重
    fn combine(&self, other: &Self) -> Self;

    /// 全序比较
    fn compare(&self, other: &Self) -> Ordering;

    /// 不可达哨兵值，Bellman-Ford 和 Floyd-Warshall 需要
    fn infinity() -> Option<Self> {
        None
    }

    fn is_zero(&self) -> bool {
        self.compare(&Self::zero()) == Ordering::Equal
    }

    /// 严格大于零
    fn is_positive(&self) -> bool {
        self.compare(&Self::zero()) == Ordering::Greater
    }

    fn is_negative(&self) -> bool {
        self.compare(&Self::zero()) == Ordering::Less
    }

    /// 取较小者（相等时保留 self）
    fn min_of(self, other: Self) -> Self {
        if other.compare(&self) == Ordering::Less {
            other
        } else {
            self
        }
    }
}

/// 最大流算法使用的容量运算
pub trait Capacity: Weight {
    fn subtract(&self, other: &Self) -> Self;
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn zero() -> Self {
                    0
                }

                fn combine(&self, other: &Self) -> Self {
                    self.saturating_add(*other)
                }

                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn infinity() -> Option<Self> {
                    Some(<$t>::MAX)
                }
            }

            impl Capacity for $t {
                fn subtract(&self, other: &Self) -> Self {
                    self.saturating_sub(*other)
                }
            }
        )*
    };
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn zero() -> Self {
                    0.0
                }

                fn combine(&self, other: &Self) -> Self {
                    self + other
                }

                fn compare(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }

                fn infinity() -> Option<Self> {
                    Some(<$t>::INFINITY)
                }

                // total_cmp 区分 -0.0 和 0.0，符号判断按数值比较
                fn is_zero(&self) -> bool {
                    *self == 0.0
                }

                fn is_positive(&self) -> bool {
                    *self > 0.0
                }

                fn is_negative(&self) -> bool {
                    *self < 0.0
                }
            }

            impl Capacity for $t {
                fn subtract(&self, other: &Self) -> Self {
                    self - other
                }
            }
        )*
    };
}

impl_integer_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_weight!(f32, f64);

/// 代币数量 (256位大整数)
///
/// 非原生权重类型的示例：显式实现 `Weight` 和 `Capacity`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    pub fn from_u64(v: u64) -> Self {
        TokenAmount(U256::from(v))
    }

    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, crate::Error> {
        U256::from_str_radix(s, radix)
            .map(TokenAmount)
            .map_err(|e| crate::Error::ParseError(e.to_string()))
    }

    pub fn low_u64(&self) -> u64 {
        self.0.low_u64()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Weight for TokenAmount {
    fn zero() -> Self {
        TokenAmount(U256::zero())
    }

    fn combine(&self, other: &Self) -> Self {
        TokenAmount(self.0.saturating_add(other.0))
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    fn infinity() -> Option<Self> {
        Some(TokenAmount(U256::MAX))
    }
}

impl Capacity for TokenAmount {
    fn subtract(&self, other: &Self) -> Self {
        TokenAmount(self.0.saturating_sub(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Hops(u32);

    impl Weight for Hops {
        fn zero() -> Self {
            Hops(0)
        }

        fn combine(&self, other: &Self) -> Self {
            Hops(self.0 + other.0)
        }

        fn compare(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    #[test]
    fn test_integer_defaults() {
        assert_eq!(<i32 as Weight>::zero(), 0);
        assert_eq!(3i64.combine(&4), 7);
        assert_eq!(<u8 as Weight>::infinity(), Some(u8::MAX));
        assert_eq!(u8::MAX.combine(&1), u8::MAX);
        assert_eq!(5u32.subtract(&2), 3);
    }

    #[test]
    fn test_float_defaults() {
        assert_eq!(<f64 as Weight>::infinity(), Some(f64::INFINITY));
        assert_eq!(1.5f64.compare(&2.5), Ordering::Less);
        assert!(Weight::is_zero(&-0.0f64));
        assert!(Weight::is_positive(&2.0f32));
        assert!(!Weight::is_positive(&0.0f32));
        assert!(Weight::is_negative(&-1.0f64));
        assert!(!Weight::is_negative(&-0.0f64));
        assert!(Weight::is_negative(&f64::NEG_INFINITY));
    }

    #[test]
    fn test_custom_weight_has_no_infinity() {
        assert!(Hops::infinity().is_none());
        assert_eq!(Hops(2).combine(&Hops(3)), Hops(5));
        assert_eq!(Hops(4).min_of(Hops(1)), Hops(1));
    }

    #[test]
    fn test_token_amount() {
        let a = TokenAmount::from_u64(10);
        let b = TokenAmount::from_u64(4);
        assert_eq!(a.subtract(&b), TokenAmount::from_u64(6));
        assert_eq!(a.combine(&b).low_u64(), 14);
        assert_eq!(TokenAmount::infinity(), Some(TokenAmount(U256::MAX)));
        assert_eq!(TokenAmount::from_str_radix("ff", 16).unwrap().low_u64(), 255);
    }
}
