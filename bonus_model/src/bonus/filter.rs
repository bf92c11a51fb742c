//! Typed filter entries attached to a bonus definition.
//!
//! Definitions are authored as a JSON object from filter key to a
//! key-specific value. Each entry is parsed on its own: an unknown key or a
//! value of the wrong shape becomes an `Err` entry instead of failing the
//! whole definition, so the engine can reject just that bonus.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Every filter key the engine knows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum FilterKind {
    ItemTypes,
    #[strum(to_string = "baseWeapons", serialize = "baseweapons")]
    BaseWeapons,
    DamageTypes,
    SpellSchools,
    Abilities,
    SpellComponents,
    SpellLevels,
    AttackTypes,
    WeaponProperties,
    SaveAbilities,
    ThrowTypes,
    ArbitraryComparison,
    StatusEffects,
    TargetEffects,
    CreatureTypes,
    ItemRequirements,
}

/// Errors produced while reading a single filter entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter key `{0}`")]
    UnknownKey(String),

    #[error("malformed `{kind}` filter: {message}")]
    Malformed { kind: FilterKind, message: String },

    #[error("filters must be an object, found {0}")]
    NotAnObject(String),
}

/// How the listed spell components must be matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchMode {
    /// Every listed component must be present.
    All,
    /// At least one listed component must be present.
    Any,
    /// Any other value. Never matches.
    Unrecognized(String),
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::Unrecognized(String::new())
    }
}

impl From<String> for MatchMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ALL" => MatchMode::All,
            "ANY" => MatchMode::Any,
            _ => MatchMode::Unrecognized(value),
        }
    }
}

impl From<MatchMode> for String {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::All => "ALL".to_string(),
            MatchMode::Any => "ANY".to_string(),
            MatchMode::Unrecognized(value) => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellComponentsFilter {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, rename = "match")]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponPropertiesFilter {
    /// The weapon must have at least one of these.
    #[serde(default)]
    pub needed: Vec<String>,
    /// The weapon must have none of these.
    #[serde(default)]
    pub unfit: Vec<String>,
}

/// Required equipped/attuned state. `None` fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attuned: Option<bool>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ComparisonOperator {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

/// One `{one, other, operator}` triple of an arbitrary comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub one: String,
    #[serde(default)]
    pub other: String,
    pub operator: ComparisonOperator,
}

impl Comparison {
    pub fn new(
        one: impl Into<String>,
        operator: ComparisonOperator,
        other: impl Into<String>,
    ) -> Self {
        Self {
            one: one.into(),
            other: other.into(),
            operator,
        }
    }
}

/// A filter with its typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    ItemTypes(Vec<String>),
    BaseWeapons(Vec<String>),
    DamageTypes(Vec<String>),
    SpellSchools(Vec<String>),
    Abilities(Vec<String>),
    SpellComponents(SpellComponentsFilter),
    /// Levels coerced to numbers. Unparseable entries are NaN and never match.
    SpellLevels(Vec<f64>),
    AttackTypes(Vec<String>),
    WeaponProperties(WeaponPropertiesFilter),
    SaveAbilities(Vec<String>),
    ThrowTypes(Vec<String>),
    ArbitraryComparison(Vec<Comparison>),
    StatusEffects(Vec<String>),
    TargetEffects(Vec<String>),
    CreatureTypes(Vec<String>),
    ItemRequirements(ItemRequirements),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::ItemTypes(_) => FilterKind::ItemTypes,
            Filter::BaseWeapons(_) => FilterKind::BaseWeapons,
            Filter::DamageTypes(_) => FilterKind::DamageTypes,
            Filter::SpellSchools(_) => FilterKind::SpellSchools,
            Filter::Abilities(_) => FilterKind::Abilities,
            Filter::SpellComponents(_) => FilterKind::SpellComponents,
            Filter::SpellLevels(_) => FilterKind::SpellLevels,
            Filter::AttackTypes(_) => FilterKind::AttackTypes,
            Filter::WeaponProperties(_) => FilterKind::WeaponProperties,
            Filter::SaveAbilities(_) => FilterKind::SaveAbilities,
            Filter::ThrowTypes(_) => FilterKind::ThrowTypes,
            Filter::ArbitraryComparison(_) => FilterKind::ArbitraryComparison,
            Filter::StatusEffects(_) => FilterKind::StatusEffects,
            Filter::TargetEffects(_) => FilterKind::TargetEffects,
            Filter::CreatureTypes(_) => FilterKind::CreatureTypes,
            Filter::ItemRequirements(_) => FilterKind::ItemRequirements,
        }
    }

    /// Check whether the filter constrains nothing. Empty filters always pass.
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::ItemTypes(keys)
            | Filter::BaseWeapons(keys)
            | Filter::DamageTypes(keys)
            | Filter::SpellSchools(keys)
            | Filter::Abilities(keys)
            | Filter::AttackTypes(keys)
            | Filter::SaveAbilities(keys)
            | Filter::ThrowTypes(keys)
            | Filter::StatusEffects(keys)
            | Filter::TargetEffects(keys)
            | Filter::CreatureTypes(keys) => keys.is_empty(),
            Filter::SpellComponents(filter) => filter.types.is_empty(),
            Filter::SpellLevels(levels) => levels.is_empty(),
            Filter::WeaponProperties(filter) => filter.needed.is_empty() && filter.unfit.is_empty(),
            Filter::ArbitraryComparison(comparisons) => comparisons.is_empty(),
            Filter::ItemRequirements(req) => req.equipped.is_none() && req.attuned.is_none(),
        }
    }

    /// Parse one `key: value` entry of a definition's filter object.
    ///
    /// A `null` value is read as the empty filter of that kind.
    pub fn parse(key: &str, value: Value) -> Result<Self, FilterError> {
        let kind =
            FilterKind::from_str(key).map_err(|_| FilterError::UnknownKey(key.to_string()))?;

        let filter = match kind {
            FilterKind::ItemTypes => Filter::ItemTypes(payload(kind, value)?),
            FilterKind::BaseWeapons => Filter::BaseWeapons(payload(kind, value)?),
            FilterKind::DamageTypes => Filter::DamageTypes(payload(kind, value)?),
            FilterKind::SpellSchools => Filter::SpellSchools(payload(kind, value)?),
            FilterKind::Abilities => Filter::Abilities(payload(kind, value)?),
            FilterKind::SpellComponents => Filter::SpellComponents(payload(kind, value)?),
            FilterKind::SpellLevels => Filter::SpellLevels(spell_levels(value)?),
            FilterKind::AttackTypes => Filter::AttackTypes(payload(kind, value)?),
            FilterKind::WeaponProperties => Filter::WeaponProperties(payload(kind, value)?),
            FilterKind::SaveAbilities => Filter::SaveAbilities(payload(kind, value)?),
            FilterKind::ThrowTypes => Filter::ThrowTypes(payload(kind, value)?),
            FilterKind::ArbitraryComparison => Filter::ArbitraryComparison(payload(kind, value)?),
            FilterKind::StatusEffects => Filter::StatusEffects(payload(kind, value)?),
            FilterKind::TargetEffects => Filter::TargetEffects(payload(kind, value)?),
            FilterKind::CreatureTypes => Filter::CreatureTypes(payload(kind, value)?),
            FilterKind::ItemRequirements => Filter::ItemRequirements(payload(kind, value)?),
        };
        Ok(filter)
    }

    /// The JSON value this filter is authored as.
    pub fn to_value(&self) -> Value {
        let value = match self {
            Filter::ItemTypes(keys)
            | Filter::BaseWeapons(keys)
            | Filter::DamageTypes(keys)
            | Filter::SpellSchools(keys)
            | Filter::Abilities(keys)
            | Filter::AttackTypes(keys)
            | Filter::SaveAbilities(keys)
            | Filter::ThrowTypes(keys)
            | Filter::StatusEffects(keys)
            | Filter::TargetEffects(keys)
            | Filter::CreatureTypes(keys) => serde_json::to_value(keys),
            Filter::SpellComponents(filter) => serde_json::to_value(filter),
            Filter::SpellLevels(levels) => serde_json::to_value(levels),
            Filter::WeaponProperties(filter) => serde_json::to_value(filter),
            Filter::ArbitraryComparison(comparisons) => serde_json::to_value(comparisons),
            Filter::ItemRequirements(req) => serde_json::to_value(req),
        };
        value.unwrap_or(Value::Null)
    }
}

fn payload<T: DeserializeOwned + Default>(kind: FilterKind, value: Value) -> Result<T, FilterError> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| FilterError::Malformed {
        kind,
        message: e.to_string(),
    })
}

/// Coerce spell level keys (`"3"` or `3`) to numbers.
fn spell_levels(value: Value) -> Result<Vec<f64>, FilterError> {
    let malformed = |message: String| FilterError::Malformed {
        kind: FilterKind::SpellLevels,
        message,
    };

    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => return Err(malformed(format!("expected an array, found {other}"))),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Number(n) => n.as_f64().ok_or_else(|| malformed(format!("invalid number {n}"))),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(0.0)
                } else {
                    // Only finite numbers can equal a level.
                    Ok(trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|level| level.is_finite())
                        .unwrap_or(f64::NAN))
                }
            }
            other => Err(malformed(format!("expected a level, found {other}"))),
        })
        .collect()
}

/// The filters of one bonus definition.
///
/// Entries keep the order they were read in. Entries that failed to parse
/// are kept as errors so they can reject the definition at evaluation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    entries: Vec<Result<Filter, FilterError>>,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every entry of an authored filter object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| Filter::parse(&key, value))
                .collect(),
        }
    }

    /// Add a filter, replacing any entry of the same kind.
    pub fn insert(&mut self, filter: Filter) {
        let kind = filter.kind();
        let existing = self.entries.iter().position(|entry| match entry {
            Ok(f) => f.kind() == kind,
            Err(FilterError::Malformed { kind: k, .. }) => *k == kind,
            Err(FilterError::UnknownKey(_) | FilterError::NotAnObject(_)) => false,
        });
        match existing {
            Some(index) => self.entries[index] = Ok(filter),
            None => self.entries.push(Ok(filter)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Result<Filter, FilterError>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether any entry failed to parse.
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Result::is_err)
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for filter in iter {
            set.insert(filter);
        }
        set
    }
}

/// `null` and arrays read as no filters. Any other non-object becomes a
/// single error entry, so only the definition holding it is rejected.
impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => FilterSet::from_map(map),
            Value::Null | Value::Array(_) => FilterSet::new(),
            other => FilterSet {
                entries: vec![Err(FilterError::NotAnObject(other.to_string()))],
            },
        })
    }
}

/// Only well-formed entries are written back.
impl Serialize for FilterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .filter_map(|entry| entry.as_ref().ok())
            .map(|filter| (filter.kind().to_string(), filter.to_value()))
            .collect();
        map.serialize(serializer)
    }
}
