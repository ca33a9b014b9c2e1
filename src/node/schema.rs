use serde::{Deserialize, Serialize};

pub const NODE_NAME: &str = "SVGPreview";

pub const DEFAULT_SIZE: u32 = 100;
pub const MIN_SIZE: u32 = 16;
pub const MAX_SIZE: u32 = 2048;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueKind {
    String,
    Int,
    Boolean,
    Image,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DefaultValue {
    Text(&'static str),
    Int(u32),
    Bool(bool),
}

/// Declaration of a single node parameter as the host UI renders it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InputSpec {
    #[serde(skip)]
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NodeInputs {
    #[serde(serialize_with = "serialize_specs")]
    pub required: Vec<InputSpec>,
}

/// Everything the host reads once at registration time.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NodeSchema {
    pub name: &'static str,
    pub display_name: &'static str,
    pub function: &'static str,
    pub category: &'static str,
    pub input: NodeInputs,
    #[serde(serialize_with = "serialize_specs")]
    pub widgets: Vec<InputSpec>,
    #[serde(rename = "output")]
    pub return_types: Vec<ValueKind>,
    pub output_name: Vec<&'static str>,
}

fn serialize_specs<S>(specs: &[InputSpec], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(specs.len()))?;
    for spec in specs {
        map.serialize_entry(spec.name, spec)?;
    }
    map.end()
}

impl NodeSchema {
    pub fn svg_preview() -> Self {
        NodeSchema {
            name: NODE_NAME,
            display_name: "SVG Preview",
            function: "preview_svg",
            category: "💎TOSVG",
            input: NodeInputs {
                required: vec![InputSpec {
                    name: "svg_input",
                    kind: ValueKind::String,
                    default: DefaultValue::Text(""),
                    multiline: Some(false),
                    min: None,
                    max: None,
                }],
            },
            widgets: vec![
                size_widget("width"),
                size_widget("height"),
                InputSpec {
                    name: "transparency",
                    kind: ValueKind::Boolean,
                    default: DefaultValue::Bool(true),
                    multiline: None,
                    min: None,
                    max: None,
                },
            ],
            return_types: vec![ValueKind::Image],
            output_name: vec!["IMAGE"],
        }
    }
}

fn size_widget(name: &'static str) -> InputSpec {
    InputSpec {
        name,
        kind: ValueKind::Int,
        default: DefaultValue::Int(DEFAULT_SIZE),
        multiline: None,
        min: Some(MIN_SIZE),
        max: Some(MAX_SIZE),
    }
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_transparency() -> bool {
    true
}

/// Arguments of one node invocation. Widget values the host leaves out fall
/// back to their declared defaults; bounds are not enforced here.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NodeParams {
    pub svg_input: String,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default = "default_transparency")]
    pub transparency: bool,
}

impl Default for NodeParams {
    fn default() -> Self {
        NodeParams {
            svg_input: String::new(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            transparency: true,
        }
    }
}
