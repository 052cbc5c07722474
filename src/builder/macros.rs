//! Macros for declaring state enums.

/// Declare a fieldless state enum and implement [`State`](crate::core::State) for it.
///
/// Each variant names its upper-case label. The macro also generates an
/// `ALL` constant listing every variant in declaration order, ready to be
/// returned from [`Machine::states`](crate::core::Machine::states).
///
/// # Example
///
/// ```
/// use statecraft::state_enum;
/// use statecraft::core::State;
///
/// state_enum! {
///     pub enum Valve {
///         Shut => "SHUT",
///         Flowing => "FLOWING",
///         Jammed => "JAMMED",
///     }
/// }
///
/// assert_eq!(Valve::Flowing.label(), "FLOWING");
/// assert_eq!(Valve::Jammed.name(), "Jammed");
/// assert_eq!(Valve::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }
    };
}
