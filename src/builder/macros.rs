//! Macros for declaring machine states.

/// Generate a `State` implementation for a plain enum.
///
/// The enum gets `Clone`, `PartialEq`, `Debug`, `Serialize` and
/// `Deserialize`; further attributes are applied after those derives, so
/// `#[serde(..)]` options work. The state name is the variant name.
///
/// The serde derives go through this crate's re-export, so callers do not
/// need their own `serde` dependency.
///
/// # Example
///
/// ```
/// use machine_store::core::State;
/// use machine_store::state_enum;
///
/// state_enum! {
///     #[derive(Copy)]
///     pub enum Door {
///         Open,
///         Closed,
///         Broken,
///     }
///     final: [Broken]
///     error: [Broken]
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// assert!(Door::Broken.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        #[derive(
            Clone,
            PartialEq,
            Debug,
            $crate::__serde::Serialize,
            $crate::__serde::Deserialize
        )]
        #[serde(crate = "machine_store::__serde")]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
