/// Three-state update for an optional task field.
///
/// `NoChange` keeps the current value, `Set` replaces it and `Clear` removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Builds an update from a command-line style pair: a value to set and a
    /// flag asking to clear. Setting wins over clearing.
    pub fn from_parts(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (Some(value), _) => FieldUpdate::Set(value),
            (None, true) => FieldUpdate::Clear,
            (None, false) => FieldUpdate::NoChange,
        }
    }
}
