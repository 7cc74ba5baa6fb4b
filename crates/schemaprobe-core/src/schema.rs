/// Property-graph schema model shared by inferred and reference schemas.
///
/// The same shape is produced by the oracle, by the deterministic deriver, and
/// by ground-truth extraction, so the comparator never needs to know where a
/// schema came from. Fields outside the core shape (`raw_type_string`,
/// `dataset_name`, model-specific annotations, ...) are preserved through
/// `extra` maps rather than rejected.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::value::ScalarKind;

/// A complete schema: node types plus edge types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Node type definitions.
    #[serde(default)]
    pub node_types: Vec<NodeTypeDef>,
    /// Edge type definitions.
    #[serde(default)]
    pub edge_types: Vec<EdgeTypeDef>,
    /// Unknown top-level fields, preserved on round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A schema document that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("line {line}, column {column}: {source}")]
pub struct SchemaLoadError {
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure.
    pub column: usize,
    /// Underlying parser error.
    #[source]
    pub source: serde_json::Error,
}

impl Schema {
    /// Parses a schema document. A leading byte-order mark is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError`] when `text` is not JSON or does not have
    /// the schema shape.
    pub fn from_json(text: &str) -> Result<Self, SchemaLoadError> {
        let body = text.strip_prefix('\u{feff}').unwrap_or(text);
        serde_json::from_str(body).map_err(|source| SchemaLoadError {
            line: source.line(),
            column: source.column(),
            source,
        })
    }
}

/// A node type definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeDef {
    /// Explicit type name.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Label aliases; the first label names the type when `name` is absent.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub labels: Vec<String>,
    /// Declared properties.
    #[serde(default, deserialize_with = "lenient::properties")]
    pub properties: Vec<PropertyDef>,
    /// Unknown fields, preserved on round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An edge type definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypeDef {
    /// Relationship type, the preferred name source.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub edge_type: Option<String>,
    /// Fallback name when `type` is absent.
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Declared properties.
    #[serde(default, deserialize_with = "lenient::properties")]
    pub properties: Vec<PropertyDef>,
    /// Allowed endpoint label sets. Accepted and carried, never compared.
    #[serde(default, deserialize_with = "lenient::topology")]
    pub topology: Vec<TopologyConstraint>,
    /// Unknown fields, preserved on round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One allowed `(sources, targets)` pairing for an edge type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConstraint {
    /// Labels permitted at the edge source.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allowed_sources: Vec<String>,
    /// Labels permitted at the edge target.
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub allowed_targets: Vec<String>,
}

/// A property declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name. Properties without a name are ignored by comparison.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Declared value type.
    #[serde(rename = "type", default, deserialize_with = "lenient::property_type")]
    pub property_type: PropertyType,
    /// `true` when the property is expected on (nearly) every member.
    #[serde(default, deserialize_with = "lenient::flag")]
    pub mandatory: bool,
    /// Unknown fields, preserved on round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Declared property value type.
///
/// The four scalar types are recognised; anything else (for example
/// `"StringArray"` or `"Unknown"` in exported ground truth) is kept verbatim
/// in [`PropertyType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// `"String"`.
    #[default]
    String,
    /// `"Long"`.
    Long,
    /// `"Double"`.
    Double,
    /// `"Boolean"`.
    Boolean,
    /// Any other type string.
    Other(String),
}

impl PropertyType {
    /// Returns the serialized spelling of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Other(s) => s.as_str(),
        }
    }

    fn from_name(v: &str) -> Option<Self> {
        match v {
            "String" => Some(Self::String),
            "Long" => Some(Self::Long),
            "Double" => Some(Self::Double),
            "Boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

impl From<&str> for PropertyType {
    fn from(v: &str) -> Self {
        Self::from_name(v).unwrap_or_else(|| Self::Other(v.to_owned()))
    }
}

impl From<ScalarKind> for PropertyType {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::String => Self::String,
            ScalarKind::Integer => Self::Long,
            ScalarKind::Float => Self::Double,
            ScalarKind::Boolean => Self::Boolean,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyTypeVisitor;

        impl de::Visitor<'_> for PropertyTypeVisitor {
            type Value = PropertyType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string naming a property type")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(PropertyType::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(PropertyType::from_name(&v).unwrap_or(PropertyType::Other(v)))
            }
        }

        deserializer.deserialize_str(PropertyTypeVisitor)
    }
}

impl NodeTypeDef {
    /// Returns the name used to index this type: `name` if non-empty, else
    /// the first label, else `""`.
    pub fn canonical_name(&self) -> &str {
        non_empty(self.name.as_deref())
            .or_else(|| self.labels.first().map(String::as_str))
            .unwrap_or("")
    }
}

impl EdgeTypeDef {
    /// Returns the name used to index this type: `type` if non-empty, else
    /// `name`, else `""`.
    pub fn canonical_name(&self) -> &str {
        non_empty(self.edge_type.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or("")
    }
}

impl PropertyDef {
    /// Creates a named property.
    pub fn new(name: impl Into<String>, property_type: PropertyType, mandatory: bool) -> Self {
        Self {
            name: Some(name.into()),
            property_type,
            mandatory,
            extra: serde_json::Map::new(),
        }
    }

    /// Returns the property name if present and non-empty.
    pub fn named(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Field readers for schema documents written by hand or by a model.
///
/// Only the top-level `node_types` / `edge_types` lists must have the right
/// shape. Inside an entry, a field holding an unexpected JSON shape degrades
/// to the closest usable value (or the field default) instead of failing the
/// whole document.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{PropertyDef, PropertyType, TopologyConstraint};

    /// A string, or `None` for any other shape.
    pub(super) fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Value::deserialize(d)?.as_str().map(str::to_owned))
    }

    /// A list of strings. A lone string is a one-element list; non-string
    /// items are skipped.
    pub(super) fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let value = Value::deserialize(d)?;
        if let Some(s) = value.as_str() {
            return Ok(vec![s.to_owned()]);
        }
        Ok(value
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_owned).collect())
            .unwrap_or_default())
    }

    /// A boolean, also accepting `"true"` / `"false"` in any case.
    pub(super) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(value
            .as_bool()
            .or_else(|| value.as_str().map(|s| s.trim().eq_ignore_ascii_case("true")))
            .unwrap_or(false))
    }

    /// A type name. A list takes its first string (the strict export form);
    /// `null` is the default type; any other shape is kept as text in
    /// [`PropertyType::Other`].
    pub(super) fn property_type<'de, D: Deserializer<'de>>(d: D) -> Result<PropertyType, D::Error> {
        let value = Value::deserialize(d)?;
        if value.is_null() {
            return Ok(PropertyType::default());
        }
        let name = value
            .as_str()
            .or_else(|| value.as_array().and_then(|a| a.iter().find_map(Value::as_str)));
        Ok(name.map_or_else(|| PropertyType::Other(value.to_string()), PropertyType::from))
    }

    /// Property entries. A bare string is a property of that name; entries
    /// of any other non-object shape are skipped.
    pub(super) fn properties<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PropertyDef>, D::Error> {
        let value = Value::deserialize(d)?;
        let Some(items) = value.as_array() else {
            return Ok(Vec::new());
        };
        Ok(items
            .iter()
            .filter_map(|item| {
                if let Some(name) = item.as_str() {
                    return Some(PropertyDef::new(name, PropertyType::default(), false));
                }
                item.as_object()?;
                PropertyDef::deserialize(item).ok()
            })
            .collect())
    }

    /// Topology entries. Anything other than a list of objects is dropped.
    pub(super) fn topology<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Vec<TopologyConstraint>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok(value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .filter_map(|item| TopologyConstraint::deserialize(item).ok())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn canonical_name_prefers_name_then_first_label() {
        let named = NodeTypeDef {
            name: Some("Neuron".to_owned()),
            labels: vec!["Cell".to_owned()],
            ..NodeTypeDef::default()
        };
        assert_eq!(named.canonical_name(), "Neuron");

        let labelled = NodeTypeDef {
            name: Some(String::new()),
            labels: vec!["Segment".to_owned(), "Neuron".to_owned()],
            ..NodeTypeDef::default()
        };
        assert_eq!(labelled.canonical_name(), "Segment");

        assert_eq!(NodeTypeDef::default().canonical_name(), "");
    }

    #[test]
    fn edge_canonical_name_prefers_type() {
        let e = EdgeTypeDef {
            edge_type: Some("ConnectsTo".to_owned()),
            name: Some("Other".to_owned()),
            ..EdgeTypeDef::default()
        };
        assert_eq!(e.canonical_name(), "ConnectsTo");

        let by_name = EdgeTypeDef {
            name: Some("Contains".to_owned()),
            ..EdgeTypeDef::default()
        };
        assert_eq!(by_name.canonical_name(), "Contains");
    }

    #[test]
    fn property_type_keeps_unknown_spellings() {
        let json = r#"[{"name":"a","type":"Long","mandatory":true},
                       {"name":"b","type":"StringArray","mandatory":false},
                       {"name":null,"type":"Unknown"}]"#;
        let props: Vec<PropertyDef> = serde_json::from_str(json).expect("parse");
        assert_eq!(props[0].property_type, PropertyType::Long);
        assert!(props[0].mandatory);
        assert_eq!(
            props[1].property_type,
            PropertyType::Other("StringArray".to_owned())
        );
        assert_eq!(props[2].named(), None);
        assert!(!props[2].mandatory);
    }

    #[test]
    fn reference_schema_with_topology_and_extras_parses() {
        let json = r#"{
            "dataset_name": "fib25",
            "node_types": [
                {"labels": ["Neuron"], "raw_type_string": "Neuron",
                 "properties": [{"name": "bodyId", "type": "Long", "mandatory": true}]}
            ],
            "edge_types": [
                {"type": "ConnectsTo", "properties": [],
                 "topology": [{"allowed_sources": ["Neuron"], "allowed_targets": ["Neuron"]}]}
            ]
        }"#;
        let schema: Schema = serde_json::from_str(json).expect("parse");
        assert_eq!(schema.node_types[0].canonical_name(), "Neuron");
        assert_eq!(schema.edge_types[0].topology.len(), 1);
        assert_eq!(
            schema.extra.get("dataset_name"),
            Some(&serde_json::Value::String("fib25".to_owned()))
        );

        let out = serde_json::to_value(&schema).expect("serialize");
        assert_eq!(out["node_types"][0]["raw_type_string"], "Neuron");
        assert_eq!(out["dataset_name"], "fib25");
    }

    #[test]
    fn off_shape_entry_fields_degrade_instead_of_failing() {
        let json = r#"{
            "node_types": [
                {"name": 7, "labels": "Neuron", "properties": [
                    {"name": "bodyId", "type": null, "mandatory": "TRUE"},
                    {"name": "roiInfo", "type": {"kind": "map"}, "mandatory": 1},
                    {"name": "rois", "type": ["StringArray"]},
                    "status",
                    42
                ]}
            ],
            "edge_types": [
                {"type": "ConnectsTo", "properties": {"weight": "Long"},
                 "topology": {"source": "Neuron", "target": "Neuron"}},
                {"type": "Contains", "properties": [],
                 "topology": ["Neuron", {"allowed_sources": "Meta", "allowed_targets": ["Neuron", 3]}]}
            ]
        }"#;
        let schema = Schema::from_json(json).expect("lenient parse");

        let node = &schema.node_types[0];
        assert_eq!(node.name, None);
        assert_eq!(node.canonical_name(), "Neuron");
        let names: Vec<_> = node.properties.iter().filter_map(PropertyDef::named).collect();
        assert_eq!(names, ["bodyId", "roiInfo", "rois", "status"]);
        assert_eq!(node.properties[0].property_type, PropertyType::String);
        assert!(node.properties[0].mandatory);
        assert_eq!(
            node.properties[1].property_type,
            PropertyType::Other(r#"{"kind":"map"}"#.to_owned())
        );
        assert!(!node.properties[1].mandatory);
        assert_eq!(
            node.properties[2].property_type,
            PropertyType::Other("StringArray".to_owned())
        );

        let connects = &schema.edge_types[0];
        assert!(connects.properties.is_empty());
        assert!(connects.topology.is_empty());

        let contains = &schema.edge_types[1];
        assert_eq!(
            contains.topology,
            [TopologyConstraint {
                allowed_sources: vec!["Meta".to_owned()],
                allowed_targets: vec!["Neuron".to_owned()],
            }]
        );
    }

    #[test]
    fn top_level_lists_must_be_lists() {
        assert!(Schema::from_json(r#"{"node_types": "Neuron"}"#).is_err());
        assert!(Schema::from_json(r#"{"edge_types": {"type": "R"}}"#).is_err());
    }

    #[test]
    fn from_json_reports_location() {
        let err = Schema::from_json("{\n  \"node_types\": ]\n}").expect_err("bad json");
        assert_eq!(err.line, 2);
        assert!(err.to_string().starts_with("line 2, column"));

        let schema = Schema::from_json("\u{feff}{\"node_types\": []}").expect("bom is ignored");
        assert!(schema.node_types.is_empty());
        assert!(schema.edge_types.is_empty());
    }

    #[test]
    fn scalar_kind_maps_to_schema_types() {
        assert_eq!(PropertyType::from(ScalarKind::Integer), PropertyType::Long);
        assert_eq!(PropertyType::from(ScalarKind::Float), PropertyType::Double);
        assert_eq!(
            PropertyType::from(ScalarKind::Boolean),
            PropertyType::Boolean
        );
        assert_eq!(PropertyType::from(ScalarKind::String), PropertyType::String);
    }
}
