//! Vega-Lite chart builders
//!
//! # Example
//!
//! ```rust,ignore
//! use healthviz::plot::{Chart, Field, FieldType, Mark, MarkType};
//!
//! let base = Chart::new("trend").encode("x", Field::new("YearStart", FieldType::Ordinal));
//! let line = base.mark(Mark::new(MarkType::Line));
//! let points = base.mark(Mark::new(MarkType::Point));
//! ```

use super::selection::Selection;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Vega-Lite measurement type of an encoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Ordinal,
    Nominal,
}

/// Vega-Lite mark type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Bar,
    Geoshape,
    Line,
    Point,
    Rect,
    Rule,
    Text,
}

/// Mark type plus static mark properties (color, size, stroke, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    kind: MarkType,
    properties: Map<String, Value>,
}

impl Mark {
    pub fn new(kind: MarkType) -> Self {
        Self {
            kind,
            properties: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> MarkType {
        self.kind
    }

    pub fn to_value(&self) -> Value {
        let mut obj = self.properties.clone();
        obj.insert("type".to_string(), json!(self.kind));
        Value::Object(obj)
    }
}

/// Field definition for an encoding channel
#[derive(Debug, Clone, PartialEq)]
pub struct Field(Map<String, Value>);

impl Field {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        let mut obj = Map::new();
        obj.insert("field".to_string(), json!(name));
        obj.insert("type".to_string(), json!(field_type));
        Self(obj)
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    /// Axis or legend title; `Value::Null` hides it
    pub fn title(self, title: impl Into<Value>) -> Self {
        self.set("title", title.into())
    }

    pub fn axis(self, axis: Value) -> Self {
        self.set("axis", axis)
    }

    pub fn legend(self, legend: Value) -> Self {
        self.set("legend", legend)
    }

    pub fn scale(self, scale: Value) -> Self {
        self.set("scale", scale)
    }

    /// Explicit category order
    pub fn sort(self, order: &[String]) -> Self {
        self.set("sort", json!(order))
    }

    /// d3 number format, used by tooltips and text marks
    pub fn format(self, format: &str) -> Self {
        self.set("format", json!(format))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("field").and_then(Value::as_str)
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        Value::Object(field.0)
    }
}

/// A single view: one dataset, one mark, its encodings and transforms
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    data: Option<String>,
    mark: Option<Mark>,
    encoding: Map<String, Value>,
    transform: Vec<Value>,
    params: Vec<Value>,
    properties: Map<String, Value>,
}

impl Chart {
    /// New chart reading from a named dataset
    pub fn new(dataset: &str) -> Self {
        Self {
            data: Some(dataset.to_string()),
            ..Default::default()
        }
    }

    pub fn mark(&self, mark: Mark) -> Self {
        let mut chart = self.clone();
        chart.mark = Some(mark);
        chart
    }

    /// Set (or replace) one encoding channel
    pub fn encode(&self, channel: &str, definition: impl Into<Value>) -> Self {
        let mut chart = self.clone();
        chart
            .encoding
            .insert(channel.to_string(), definition.into());
        chart
    }

    pub fn tooltip(&self, fields: Vec<Field>) -> Self {
        let fields: Vec<Value> = fields.into_iter().map(Value::from).collect();
        self.encode("tooltip", Value::Array(fields))
    }

    /// Declare the selection param on this view
    pub fn add_selection(&self, selection: &Selection) -> Self {
        let mut chart = self.clone();
        chart.params.push(selection.param());
        chart
    }

    /// Keep only rows admitted by the selection
    pub fn filter(&self, selection: &Selection) -> Self {
        self.transform(json!({"filter": selection.predicate()}))
    }

    /// Join extra fields from a secondary source on `key`
    pub fn lookup(&self, key: &str, from: Value) -> Self {
        self.transform(json!({"lookup": key, "from": from}))
    }

    fn transform(&self, transform: Value) -> Self {
        let mut chart = self.clone();
        chart.transform.push(transform);
        chart
    }

    pub fn property(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut chart = self.clone();
        chart.properties.insert(key.to_string(), value.into());
        chart
    }

    pub fn title(&self, title: &str) -> Self {
        self.property("title", title)
    }

    pub fn size(&self, width: u32, height: u32) -> Self {
        self.property("width", width).property("height", height)
    }

    pub fn dataset(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn mark_type(&self) -> Option<MarkType> {
        self.mark.as_ref().map(Mark::kind)
    }

    pub fn encoding(&self, channel: &str) -> Option<&Value> {
        self.encoding.get(channel)
    }

    pub fn transforms(&self) -> &[Value] {
        &self.transform
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn to_value(&self) -> Value {
        let mut obj = self.properties.clone();
        if let Some(data) = &self.data {
            obj.insert("data".to_string(), json!({"name": data}));
        }
        if let Some(mark) = &self.mark {
            obj.insert("mark".to_string(), mark.to_value());
        }
        if !self.encoding.is_empty() {
            obj.insert("encoding".to_string(), Value::Object(self.encoding.clone()));
        }
        if !self.transform.is_empty() {
            obj.insert("transform".to_string(), json!(self.transform));
        }
        if !self.params.is_empty() {
            obj.insert("params".to_string(), json!(self.params));
        }
        Value::Object(obj)
    }
}

/// Charts drawn on top of each other in a shared coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    layers: Vec<Chart>,
    properties: Map<String, Value>,
}

impl Layer {
    pub fn property(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut layer = self.clone();
        layer.properties.insert(key.to_string(), value.into());
        layer
    }

    pub fn title(&self, title: &str) -> Self {
        self.property("title", title)
    }

    pub fn size(&self, width: u32, height: u32) -> Self {
        self.property("width", width).property("height", height)
    }

    pub fn charts(&self) -> &[Chart] {
        &self.layers
    }
}

pub fn layer(charts: Vec<Chart>) -> Layer {
    Layer {
        layers: charts,
        properties: Map::new(),
    }
}

/// Composed chart specification
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Unit(Chart),
    Layer(Layer),
    /// Views stacked top to bottom
    VConcat(Vec<ChartSpec>),
}

pub fn vconcat(specs: Vec<ChartSpec>) -> ChartSpec {
    ChartSpec::VConcat(specs)
}

impl From<Chart> for ChartSpec {
    fn from(chart: Chart) -> Self {
        ChartSpec::Unit(chart)
    }
}

impl From<Layer> for ChartSpec {
    fn from(layer: Layer) -> Self {
        ChartSpec::Layer(layer)
    }
}

impl ChartSpec {
    /// All unit charts, depth first, top to bottom
    pub fn units(&self) -> Vec<&Chart> {
        match self {
            ChartSpec::Unit(chart) => vec![chart],
            ChartSpec::Layer(layer) => layer.layers.iter().collect(),
            ChartSpec::VConcat(specs) => specs.iter().flat_map(ChartSpec::units).collect(),
        }
    }

    /// Names of every dataset referenced by a unit chart
    pub fn datasets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .units()
            .into_iter()
            .filter_map(Chart::dataset)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn to_value(&self) -> Value {
        match self {
            ChartSpec::Unit(chart) => chart.to_value(),
            ChartSpec::Layer(layer) => {
                let mut obj = layer.properties.clone();
                let charts: Vec<Value> = layer.layers.iter().map(Chart::to_value).collect();
                obj.insert("layer".to_string(), Value::Array(charts));
                Value::Object(obj)
            }
            ChartSpec::VConcat(specs) => {
                let views: Vec<Value> = specs.iter().map(ChartSpec::to_value).collect();
                json!({"vconcat": views})
            }
        }
    }
}
