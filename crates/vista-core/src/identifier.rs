//! Interned identifiers for semantic elements.
//!
//! Every semantic element is addressed by an [`ElementId`]. Identifiers are
//! interned in a process-wide table, so they are `Copy` and compare and hash
//! as integers.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Separator placed between the segments of a nested identifier.
pub const SEPARATOR: &str = "::";

/// Global string interner backing every [`ElementId`].
///
/// # Thread Safety
///
/// Access is serialized through a `Mutex`.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Stable identifier of a semantic element.
///
/// Identifiers are unique within one model instance. Nested elements carry
/// qualified identifiers built with [`ElementId::nested`], e.g.
/// `catalog::Product`.
///
/// # Examples
///
/// ```
/// use vista_core::identifier::ElementId;
///
/// let package = ElementId::new("catalog");
/// let class = package.nested("Product");
///
/// assert_eq!(class, "catalog::Product");
/// assert_eq!(class.last_segment(), "Product");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from its string form.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates an identifier for an element that has no name of its own.
    ///
    /// Anonymous identifiers use a `__` prefix that cannot be written in the
    /// model language, so they never collide with user-chosen names.
    ///
    /// ```
    /// use vista_core::identifier::ElementId;
    ///
    /// assert_eq!(ElementId::from_anonymous(3), "__3");
    /// ```
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Creates the identifier of a child named `child` inside `self`.
    pub fn nested(&self, child: &str) -> Self {
        let symbol = with_interner(|interner| {
            let parent = interner
                .resolve(self.0)
                .expect("interned symbols always resolve");
            let nested = format!("{parent}{SEPARATOR}{child}");
            interner.get_or_intern(nested)
        });
        Self(symbol)
    }

    /// Returns the last `::`-separated segment of the identifier.
    pub fn last_segment(&self) -> String {
        self.with_str(|value| {
            value
                .rsplit(SEPARATOR)
                .next()
                .unwrap_or(value)
                .to_string()
        })
    }

    /// Runs `f` with the string form of this identifier.
    fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        with_interner(|interner| {
            let value = interner
                .resolve(self.0)
                .expect("interned symbols always resolve");
            f(value)
        })
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Copy out of the interner so the lock is not held while formatting.
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl FromStr for ElementId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ElementId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for ElementId {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ElementId {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with_str(|value| serializer.serialize_str(value))
    }
}
