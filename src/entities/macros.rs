//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed
//! for each registrable entity: its field enum, its status-like enums and
//! its [`Entity`](crate::core::entity::Entity) implementation.

/// Declare the field enum of an entity with its `QueryField` implementation
///
/// Variants are listed with their stable snake_case key; the declaration
/// order is the order of [`QueryField::all`](crate::core::field::QueryField::all).
///
/// # Example
///
/// ```rust,ignore
/// query_fields! {
///     /// Fields of an animal
///     pub enum AnimalField {
///         Code => "code",
///         Breed => "breed",
///         BirthDate => "birth_date",
///     }
/// }
///
/// assert_eq!(AnimalField::parse("birthDate"), Some(AnimalField::BirthDate));
/// ```
#[macro_export]
macro_rules! query_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $key:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $crate::core::field::QueryField for $name {
            fn key(&self) -> &'static str {
                match self {
                    $( $name::$variant => $key ),+
                }
            }

            fn all() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn index(&self) -> usize {
                *self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::field::QueryField::key(self))
            }
        }
    };
}

/// Declare a closed set of string values (statuses, kinds, sexes)
///
/// Generates serde renames, `as_str`, `VALUES` (for `in_list` validation),
/// `FromStr`, `Display` and a conversion into `FieldValue`.
///
/// # Example
///
/// ```rust,ignore
/// value_enum! {
///     pub enum Sex {
///         Male => "male",
///         Female => "female",
///     }
/// }
///
/// assert_eq!("female".parse::<Sex>(), Ok(Sex::Female));
/// ```
#[macro_export]
macro_rules! value_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $value:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $( $(#[$variant_meta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order
            pub const VALUES: &'static [&'static str] = &[ $( $value ),+ ];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    other => Err(format!("valor inválido para {}: '{}'", stringify!($name), other)),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for $crate::core::field::FieldValue {
            fn from(value: $name) -> Self {
                $crate::core::field::FieldValue::String(value.as_str().to_string())
            }
        }
    };
}

/// Implement `Entity` for a struct with `id`, `created_at` and a typed `status`
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(Buyer, "buyer", "buyers");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $type_name:expr, $resource_name:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn entity_type() -> &'static str {
                $type_name
            }

            fn resource_name() -> &'static str {
                $resource_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn status(&self) -> &str {
                self.status.as_str()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::field::{FieldValue, QueryField};

    query_fields! {
        enum SampleField {
            Name => "name",
            BirthDate => "birth_date",
        }
    }

    value_enum! {
        enum Color {
            Red => "red",
            DarkBlue => "dark_blue",
        }
    }

    #[test]
    fn test_query_fields_macro() {
        assert_eq!(SampleField::all(), &[SampleField::Name, SampleField::BirthDate]);
        assert_eq!(SampleField::BirthDate.index(), 1);
        assert_eq!(SampleField::BirthDate.to_string(), "birth_date");
        assert_eq!(SampleField::parse("birthDate"), Some(SampleField::BirthDate));
        assert!(SampleField::BirthDate.is_date_like());
        assert!(!SampleField::Name.is_date_like());
    }

    #[test]
    fn test_value_enum_macro() {
        assert_eq!(Color::VALUES, &["red", "dark_blue"]);
        assert_eq!("dark_blue".parse::<Color>(), Ok(Color::DarkBlue));
        assert!("blue".parse::<Color>().is_err());
        assert_eq!(FieldValue::from(Color::Red), FieldValue::from("red"));
        assert_eq!(serde_json::to_string(&Color::DarkBlue).unwrap(), "\"dark_blue\"");
    }
}
