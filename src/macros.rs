/// Build a `Default` value of `$t`, overriding the listed fields
#[macro_export]
macro_rules! new_t {
    ($t:ty, $($k:ident = $v:expr),+ $(,)?) => {{
        let mut c = <$t>::default();
        $(c.$k = $v;)+
        c
    }};
}

/// Define one test per listed type, with the type available in the body as `T`
#[macro_export]
macro_rules! test_t {
    ($name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
        ::paste::paste! {
            #[test]
            fn [<test_ $name _ $impl:snake>]() {
                type T = $impl;
                $body
            }
        }
    )+};
}

#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {
        $crate::assert_f64_approx!($l, $r, eps = f64::EPSILON)
    };
    ($l:expr, $r:expr, eps = $eps:expr) => {{
        let (l, r): (f64, f64) = ($l, $r);
        assert!((l - r).abs() < $eps, "assertion failed: {} !~ {}", l, r)
    }};
}
