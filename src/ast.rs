use serde::Serialize;

/// Field names the store generates for every table.
pub const RESERVED_FIELD_NAMES: [&str; 2] = ["id", "_version"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub unique: bool,
    pub not_indexed: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            unique: false,
            not_indexed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Int,
    String,
    Text,
}

impl FieldType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "int" => Some(Self::Int),
            "string" => Some(Self::String),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::String => "string",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignKey {
    pub field_name: String,
    pub pointed_table: String,
    /// Action token passed through to the server untouched.
    pub on_delete: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStatement {
    pub table: String,
    /// Projection. Empty means every field.
    pub fields: Vec<String>,
    pub expand: bool,
    pub distinct: bool,
    pub start_index: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Filter {
    None,
    /// `where:` section.
    Single { group: FilterGroup },
    /// `where1:` .. `where4:` sections combined by one joiner.
    Multi {
        joiner: Joiner,
        groups: Vec<FilterGroup>,
    },
}

impl Filter {
    pub fn groups(&self) -> &[FilterGroup] {
        match self {
            Filter::None => &[],
            Filter::Single { group } => std::slice::from_ref(group),
            Filter::Multi { groups, .. } => groups,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterGroup {
    pub conditions: Vec<FilterCondition>,
}

impl FilterGroup {
    /// The joiner shared by every condition after the first, if there is more than one.
    pub fn joiner(&self) -> Option<Joiner> {
        self.conditions.iter().find_map(|c| c.joiner)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCondition {
    /// `None` on the first condition of a group.
    pub joiner: Option<Joiner>,
    pub field_name: String,
    pub relation: String,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    Value(String),
    /// Only produced for the `in` relation.
    Values(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}
