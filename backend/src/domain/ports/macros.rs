//! Helper macro for generating domain port error enums.
//!
//! Every driven port defines a small thiserror enum whose variants carry
//! message fields. The macro also emits snake_case constructor functions so
//! adapters can write `UserRepositoryError::connection("...")` instead of
//! spelling out struct variants.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExamplePortError {
            Transport { message: String } => "transport failed: {message}",
            Status { code: u16 } => "unexpected status: {code}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::transport("connection refused");
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExamplePortError::status(502_u16);
        assert_eq!(err.to_string(), "unexpected status: 502");
    }
}
