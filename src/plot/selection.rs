//! Named hover selections
//!
//! A [`Selection`] is the single named state slot that links two views. The
//! view carrying [`Selection::param`] writes it; every view that filters or
//! conditions on [`Selection::predicate`] reads it. The renderer resolves the
//! binding by name, so the views never reference each other directly.
//!
//! [`HoverState`] models the same slot on the Rust side. Together with
//! [`Selection::admits`] it reproduces which rows a dependent view shows for
//! a given pointer position.

use serde_json::{json, Value};

/// A point selection over one field, driven by pointer hover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    name: String,
    field: String,
    nearest: bool,
    /// Whether an empty selection admits every row
    empty: bool,
}

impl Selection {
    /// Hover selection: nearest point on pointer-over, cleared on pointer-out,
    /// and an empty selection admits nothing.
    pub fn hover(name: &str, field: &str) -> Self {
        Self {
            name: name.to_string(),
            field: field.to_string(),
            nearest: true,
            empty: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Param definition for the view that owns the selection
    pub fn param(&self) -> Value {
        json!({
            "name": self.name,
            "select": {
                "type": "point",
                "fields": [self.field],
                "nearest": self.nearest,
                "on": "pointerover",
                "clear": "pointerout"
            }
        })
    }

    /// Predicate for filters in dependent views
    pub fn predicate(&self) -> Value {
        json!({"param": self.name, "empty": self.empty})
    }

    /// Conditional channel value: `selected` while the predicate holds,
    /// `otherwise` when it does not.
    ///
    /// Both arguments are channel definitions such as `{"value": 1}` or a
    /// field definition.
    pub fn condition(&self, selected: Value, otherwise: Value) -> Value {
        let mut condition = self.predicate();
        merge(&mut condition, selected);

        let mut result = json!({});
        merge(&mut result, otherwise);
        result["condition"] = condition;
        result
    }

    /// Whether a dependent view shows a row whose selection field is `value`
    pub fn admits(&self, state: &HoverState, value: i64) -> bool {
        match state.hovered_year() {
            Some(year) => year == value,
            None => self.empty,
        }
    }
}

fn merge(target: &mut Value, source: Value) {
    if let (Some(target), Value::Object(source)) = (target.as_object_mut(), source) {
        target.extend(source);
    }
}

/// State of a hover selection: the hovered year, or nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    hovered_year: Option<i64>,
}

impl HoverState {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection already set to `year`
    pub fn at(year: i64) -> Self {
        Self {
            hovered_year: Some(year),
        }
    }

    pub fn hovered_year(&self) -> Option<i64> {
        self.hovered_year
    }

    pub fn is_empty(&self) -> bool {
        self.hovered_year.is_none()
    }

    /// Pointer over the trend at horizontal `position` (in year units):
    /// select the nearest of `years`, preferring the earlier year on a tie.
    pub fn pointer_over(&mut self, years: &[i64], position: f64) {
        self.hovered_year = years.iter().copied().min_by(|a, b| {
            let da = (*a as f64 - position).abs();
            let db = (*b as f64 - position).abs();
            da.total_cmp(&db).then(a.cmp(b))
        });
    }

    /// Pointer left every interactive element
    pub fn pointer_out(&mut self) {
        self.hovered_year = None;
    }
}
