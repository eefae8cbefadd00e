//! `define_port_error!` declares a port error enum with a `thiserror`
//! message per variant and a snake_case constructor for each.
//!
//! Struct variants get constructors taking `impl Into<T>` per field, so
//! adapters can write `UserPersistenceError::query(err.to_string())` or
//! `UserPersistenceError::query("boom")` alike. Unit variants get
//! zero-argument constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Missing => "record missing",
            Rejected { reason: String } => "rejected: {reason}",
            Throttled { reason: String, retry_secs: u64 } => "throttled: {reason} ({retry_secs}s)",
        }
    }

    #[rstest]
    fn unit_variant_has_zero_argument_constructor() {
        assert_eq!(SamplePortError::missing(), SamplePortError::Missing);
        assert_eq!(SamplePortError::missing().to_string(), "record missing");
    }

    #[rstest]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::rejected("bad token");
        assert_eq!(err.to_string(), "rejected: bad token");
    }

    #[rstest]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::throttled("slow down", 30_u64);
        assert_eq!(err.to_string(), "throttled: slow down (30s)");
    }
}
