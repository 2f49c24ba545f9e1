//! Declarative markers attached to types, operations and parameter slots.
//!
//! Markers carry no behavior. They are attached once when a declaration is
//! built (from source attributes or through the builder API) and are only
//! read afterwards.

/// A single declarative marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Free-text description. `None` means the text was intentionally left unset.
    Description(Option<String>),
    /// Tags an operation as part of the public API surface.
    Method,
    /// Whether a parameter or return value must be supplied.
    Required(bool),
    /// Optional integer bounds for a numeric parameter or return value.
    IntValidation {
        min: Option<i64>,
        max: Option<i64>,
    },
}

/// The declaration site a marker is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerTarget {
    Type,
    Operation,
    Parameter,
    Return,
}

impl Marker {
    /// Attribute name used for this marker kind in source code.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Marker::Description(_) => "api_description",
            Marker::Method => "api_method",
            Marker::Required(_) => "api_required",
            Marker::IntValidation { .. } => "api_int_validation",
        }
    }

    /// Sites this marker kind may be attached to.
    pub fn targets(&self) -> &'static [MarkerTarget] {
        match self {
            Marker::Description(_) => &[
                MarkerTarget::Type,
                MarkerTarget::Operation,
                MarkerTarget::Parameter,
                MarkerTarget::Return,
            ],
            Marker::Method => &[MarkerTarget::Operation],
            Marker::Required(_) | Marker::IntValidation { .. } => {
                &[MarkerTarget::Parameter, MarkerTarget::Return]
            }
        }
    }

    pub fn applies_to(&self, target: MarkerTarget) -> bool {
        self.targets().contains(&target)
    }

    fn same_kind(&self, other: &Marker) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Markers attached to one declaration site, in attachment order.
///
/// At most one marker of each kind is kept: a duplicate kind is ignored and
/// the first one attached wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a marker. Returns `false` if a marker of the same kind was
    /// already present, in which case the set is unchanged.
    pub fn insert(&mut self, marker: Marker) -> bool {
        if self.markers.iter().any(|m| m.same_kind(&marker)) {
            return false;
        }
        self.markers.push(marker);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// The description marker, if attached. The inner option is the text.
    pub fn description_marker(&self) -> Option<Option<&str>> {
        self.markers.iter().find_map(|m| match m {
            Marker::Description(text) => Some(text.as_deref()),
            _ => None,
        })
    }

    /// Description text, absent when there is no description marker or its
    /// text is unset.
    pub fn description(&self) -> Option<&str> {
        self.description_marker().flatten()
    }

    pub fn is_method(&self) -> bool {
        self.markers.iter().any(|m| matches!(m, Marker::Method))
    }

    /// Literal value of the required marker, if attached.
    pub fn required(&self) -> Option<bool> {
        self.markers.iter().find_map(|m| match m {
            Marker::Required(required) => Some(*required),
            _ => None,
        })
    }

    /// `(min, max)` of the range marker, if attached.
    pub fn int_validation(&self) -> Option<(Option<i64>, Option<i64>)> {
        self.markers.iter().find_map(|m| match m {
            Marker::IntValidation { min, max } => Some((*min, *max)),
            _ => None,
        })
    }
}

impl FromIterator<Marker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        let mut set = MarkerSet::new();
        for marker in iter {
            set.insert(marker);
        }
        set
    }
}
