pub trait Zero {
    fn zero() -> Self;
}

macro_rules! impl_nums_zero {
    ( $( $num:ty )+ ) => {
        $(
            impl Zero for $num {
                fn zero() -> Self {
                    0 as $num
                }
            }
        )+
    };
}

impl_nums_zero! { u8 u16 u32 u64 usize }
impl_nums_zero! { i8 i16 i32 i64 isize }
impl_nums_zero! { f32 f64 }
