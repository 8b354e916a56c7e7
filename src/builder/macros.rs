//! Macros for ergonomic state machine construction.

/// Generate a State trait implementation for simple enums.
///
/// # Example
///
/// ```
/// use pollfsm::state_enum;
///
/// state_enum! {
///     pub enum PumpState {
///         Stopped,
///         Priming,
///         Running,
///     }
/// }
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

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Waiting,
            Sending,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Waiting.name(), "Waiting");
        assert_eq!(TestState::Sending.name(), "Sending");
    }

    #[test]
    fn state_enum_supports_visibility_and_docs() {
        state_enum! {
            /// States of a publicly visible machine.
            pub enum PublicState {
                A,
                B,
            }
        }

        let state = PublicState::A;
        assert_eq!(state.name(), "A");
        assert_ne!(PublicState::A, PublicState::B);
    }
}
