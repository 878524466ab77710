macro_rules! nutype_string {
    ($ident:ident($($arg:ident $args:tt),* $(,)?)) => {
        #[::nutype::nutype(
            $($arg $args,)*
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                AsRef,
                Deref,
                Display,
                TryFrom,
                Serialize,
                Deserialize,
            )
        )]
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
