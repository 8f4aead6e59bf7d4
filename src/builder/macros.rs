//! Macros for declaring phase enums.

/// Declare a fieldless enum that implements [`State`](crate::core::State).
///
/// Derives `Clone`, `PartialEq`, `Debug` and the serde traits; extra derives
/// go in the attributes. `name()` returns the variant identifier.
///
/// ```
/// use chance::state_enum;
/// use chance::core::State;
///
/// state_enum! {
///     #[derive(Copy)]
///     pub enum Lamp {
///         Off,
///         On,
///     }
/// }
///
/// assert_eq!(Lamp::On.name(), "On");
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
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
        }
    };
}
