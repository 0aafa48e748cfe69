/// Fixed-arity numeric value types that cross the wire as flat number arrays.
///
/// Component order is fixed per type and decoding is positional: a slice whose
/// length differs from `ARITY` is rejected, never truncated or padded.
pub trait Aggregate: Copy + Sized {
    const ARITY: usize;
    const NAME: &'static str;

    fn components(&self) -> Vec<f64>;

    fn from_components(components: &[f64]) -> Option<Self>;
}

macro_rules! impl_aggregate {
    ($ty:ident, $name:literal, $scalar:ty, [$($field:ident),+]) => {
        impl $crate::Aggregate for $ty {
            const ARITY: usize = [$(stringify!($field)),+].len();
            const NAME: &'static str = $name;

            fn components(&self) -> Vec<f64> {
                vec![$(self.$field as f64),+]
            }

            fn from_components(components: &[f64]) -> Option<Self> {
                match components {
                    [$($field),+] => Some(Self { $($field: *$field as $scalar),+ }),
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use impl_aggregate;
