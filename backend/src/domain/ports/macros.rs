//! Helper macro for declaring driven-port error enums.
//!
//! Each variant names the [`ErrorCode`](crate::domain::ErrorCode) it surfaces
//! as, so services can lift adapter failures into domain errors with `?`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $code:ident : $message:expr
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

            /// Domain error category this failure surfaces as.
            pub fn code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                            $crate::domain::ErrorCode::$code,
                    )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(value: $name) -> Self {
                $crate::domain::Error::new(value.code(), value.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::{Error, ErrorCode};

    define_port_error! {
        pub enum SamplePortError {
            Offline => InternalError: "store offline",
            Taken { key: String } => Conflict: "{key} already taken",
            Broken { message: String, attempts: u32 } =>
                InternalError: "broken after {attempts}: {message}",
        }
    }

    #[test]
    fn constructors_accept_into_values() {
        assert_eq!(SamplePortError::taken("slug").to_string(), "slug already taken");
        assert_eq!(
            SamplePortError::broken("io", 3_u32).to_string(),
            "broken after 3: io"
        );
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
    }

    #[test]
    fn variants_report_their_domain_code() {
        assert_eq!(SamplePortError::offline().code(), ErrorCode::InternalError);
        assert_eq!(SamplePortError::taken("slug").code(), ErrorCode::Conflict);
    }

    #[test]
    fn lifts_into_domain_error() {
        let error: Error = SamplePortError::taken("slug").into();
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "slug already taken");
    }
}
