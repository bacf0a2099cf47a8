//! Domain records and their field accessor tables.
//!
//! Every record variant exposes its fields through a closed enum that
//! implements [`FieldKey`]. Search, sort, edit and export all address
//! fields through that enum, never by runtime property names.

pub use customer::{ContactPerson, Customer, CustomerField, CustomerStatus, PRIMARY_CONTACT_ROLE};
pub use machine::{Machine, MachineField, MachineStatus};
pub use proposal::{Proposal, ProposalField, ProposalStatus};
pub(crate) use proposal::parse_amount;

use crate::error::{CoreError, CoreResult};
use crate::query::SortSpec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// The record variants managed by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Customer companies.
    Customer,
    /// Machines installed at customers.
    Machine,
    /// Commercial proposals.
    Proposal,
}

impl RecordKind {
    /// Returns the lowercase singular name.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Customer => "customer",
            RecordKind::Machine => "machine",
            RecordKind::Proposal => "proposal",
        }
    }

    /// Returns the Portuguese plural used in file names and headings.
    pub fn plural_pt(self) -> &'static str {
        match self {
            RecordKind::Customer => "empresas",
            RecordKind::Machine => "maquinas",
            RecordKind::Proposal => "propostas",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customer" | "customers" | "empresas" => Ok(RecordKind::Customer),
            "machine" | "machines" | "maquinas" => Ok(RecordKind::Machine),
            "proposal" | "proposals" | "propostas" => Ok(RecordKind::Proposal),
            _ => Err(CoreError::UnknownKind {
                name: s.to_string(),
            }),
        }
    }
}

/// How a field's values compare when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Natural, locale-aware string comparison.
    Text,
    /// Numeric comparison.
    Number,
    /// Chronological comparison; unparseable dates sort last.
    Date,
}

/// A borrowed view of one field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text.
    Text(Cow<'a, str>),
    /// A number.
    Number(f64),
    /// A date in its stored textual form.
    Date(&'a str),
}

impl<'a> FieldValue<'a> {
    /// Borrows a string as a text value.
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }

    /// Renders the value as text.
    pub fn to_text(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Date(date) => Cow::Borrowed(date),
        }
    }
}

/// How free-text search terms are matched against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// The whole term must be contained in at least one searchable value.
    AnyField,
    /// Every whitespace-separated keyword must be contained in the
    /// concatenation of all searchable values.
    AllKeywords,
}

/// A closed set of field names for one record variant.
pub trait FieldKey:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr<Err = CoreError> + Send + Sync + 'static
{
    /// Every field, in display column order.
    const ALL: &'static [Self];

    /// Wire name of the field (camelCase, as serialized).
    fn name(self) -> &'static str;

    /// Column label shown to users.
    fn label(self) -> &'static str;

    /// Comparison semantics of the field.
    fn kind(self) -> FieldKind;
}

/// The categorical status enumeration of a record variant.
pub trait RecordStatus:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + FromStr<Err = CoreError> + Send + Sync + 'static
{
    /// Every status, in declaration order.
    const ALL: &'static [Self];

    /// Returns the status label.
    fn as_str(self) -> &'static str;
}

/// A domain record with a stable, unique string identifier.
///
/// Equality is deep and structural: two records are equal when every
/// field matches, including the order of nested lists.
pub trait Record:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Field accessor table of this variant.
    type Field: FieldKey;
    /// Status enumeration of this variant.
    type Status: RecordStatus;

    /// Which variant this is.
    const KIND: RecordKind;
    /// How search terms are matched.
    const SEARCH_MODE: SearchMode;

    /// Returns the unique identifier.
    fn id(&self) -> &str;

    /// Returns the categorical status.
    fn status(&self) -> Self::Status;

    /// Reads one field.
    fn field(&self, field: Self::Field) -> FieldValue<'_>;

    /// Writes one field from user input.
    ///
    /// The identifier is immutable and rejected with
    /// [`CoreError::ImmutableField`].
    fn set_field(&mut self, field: Self::Field, value: &str) -> CoreResult<()>;

    /// Fields that take part in free-text search.
    fn searchable_fields() -> &'static [Self::Field];

    /// Human-readable name used in notifications.
    fn display_name(&self) -> &str;

    /// Values matched by free-text search.
    fn search_values(&self) -> Vec<Cow<'_, str>> {
        Self::searchable_fields()
            .iter()
            .map(|field| self.field(*field).to_text())
            .collect()
    }

    /// Sort applied when a list is first shown.
    fn default_sort() -> Option<SortSpec<Self::Field>> {
        None
    }
}

/// Declares a field enum and its [`FieldKey`] implementation.
macro_rules! record_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $kind:path {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($key:literal, $label:literal, $fkind:ident)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::record::FieldKey for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn kind(self) -> $crate::record::FieldKind {
                match self {
                    $($name::$variant => $crate::record::FieldKind::$fkind),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::record::FieldKey>::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::record::FieldKey>::ALL
                    .iter()
                    .copied()
                    .find(|field| {
                        <Self as $crate::record::FieldKey>::name(*field).eq_ignore_ascii_case(s)
                    })
                    .ok_or_else(|| $crate::error::CoreError::UnknownField {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }
    };
}

/// Declares a status enum and its [`RecordStatus`] implementation.
macro_rules! record_status {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::record::RecordStatus for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::record::RecordStatus>::as_str(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::record::RecordStatus>::ALL
                    .iter()
                    .copied()
                    .find(|status| {
                        <Self as $crate::record::RecordStatus>::as_str(*status)
                            .eq_ignore_ascii_case(s.trim())
                    })
                    .ok_or_else(|| $crate::error::CoreError::UnknownStatus {
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub(crate) use record_fields;
pub(crate) use record_status;

mod customer;
mod machine;
mod proposal;

/// Rejects writes to the identifier field.
pub(crate) fn immutable(field: &'static str) -> CoreResult<()> {
    Err(CoreError::ImmutableField { field })
}
