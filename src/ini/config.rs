use {
    crate::*,
    static_assertions::assert_impl_all,
    std::collections::{hash_map, BTreeMap, HashMap},
};

/// Separates the section name and the key in a composite key.
pub const COMPOSITE_KEY_SEPARATOR: char = '.';

/// Builds the composite key (`section.key`) used to index the parsed values.
pub fn composite_key(section: &str, key: &str) -> String {
    let mut result = String::with_capacity(section.len() + key.len() + 1);

    result.push_str(section);
    result.push(COMPOSITE_KEY_SEPARATOR);
    result.push_str(key);

    result
}

/// Splits the composite key at the first separator into the section name and the key.
/// Returns `None` if `composite_key` contains no separator.
pub fn split_composite_key(composite_key: &str) -> Option<(&str, &str)> {
    let idx = composite_key.find(COMPOSITE_KEY_SEPARATOR)?;

    Some((
        &composite_key[..idx],
        &composite_key[idx + COMPOSITE_KEY_SEPARATOR.len_utf8()..],
    ))
}

/// A trait implemented by objects which receive the key / value pairs
/// parsed by the [`.ini parser`](struct.IniParser.html).
pub trait IniConfig {
    /// Returns `true` if the `key` was already added to the `section`.
    fn contains_key(&self, section: &str, key: &str) -> bool;

    /// Adds the `value` at `key` in the `section`.
    /// `overwrite` is `true` if the `key` was already added to the `section`
    /// and the duplicate key policy calls for the new value to replace it.
    fn add_value(&mut self, section: &str, key: &str, value: String, overwrite: bool);
}

impl IniConfig for HashMap<String, String> {
    fn contains_key(&self, section: &str, key: &str) -> bool {
        HashMap::contains_key(self, &composite_key(section, key))
    }

    fn add_value(&mut self, section: &str, key: &str, value: String, _overwrite: bool) {
        self.insert(composite_key(section, key), value);
    }
}

/// Flat mapping from composite keys (`section.key`) to string values,
/// parsed from an `.ini` config.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct IniMap(HashMap<String, String>);

assert_impl_all!(IniMap: Send, Sync);

impl IniMap {
    /// Creates a new empty [`map`](struct.IniMap.html).
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Parses the `.ini` config `string` using default parsing options.
    pub fn from_ini(string: &str) -> Result<Self, IniError> {
        Self::from_ini_parser(IniParser::new(string))
    }

    /// Parses the `.ini` config using the (configured) [`.ini parser`](struct.IniParser.html).
    /// Returns no partial result on error.
    pub fn from_ini_parser(parser: IniParser<'_>) -> Result<Self, IniError> {
        let mut map = IniMap::new();

        parser.parse(&mut map)?;

        Ok(map)
    }

    /// Returns the value at the composite key (`section.key`), if any.
    pub fn get(&self, composite_key: &str) -> Option<&str> {
        self.0.get(composite_key).map(String::as_str)
    }

    /// Returns the value at `key` in the `section`, if any.
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.get(&composite_key(section, key))
    }

    /// Returns the number of parsed values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(composite key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Consumes the map, returning the underlying `HashMap` of composite keys to values.
    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }

    /// Tries to serialize this [`map`](struct.IniMap.html) to an `.ini` string
    /// which parses back to an equal map with default parsing options.
    ///
    /// Composite keys are split into the section name and the key at the first `'.'`.
    /// Sections and keys are written in alphabetical order.
    pub fn to_ini_string(&self) -> Result<String, ToIniStringError> {
        let mut sections = BTreeMap::<&str, BTreeMap<&str, &str>>::new();

        for (composite_key, value) in self.iter() {
            let (section, key) = split_composite_key(composite_key)
                .ok_or_else(|| ToIniStringError::MissingSection(composite_key.into()))?;

            sections.entry(section).or_default().insert(key, value);
        }

        let mut result = String::new();

        for (idx, (section, keys)) in sections.into_iter().enumerate() {
            if idx > 0 {
                result.push('\n');
            }

            write_ini_section(&mut result, section)?;

            for (key, value) in keys.into_iter() {
                write_ini_key_value(&mut result, key, value)?;
            }
        }

        result.shrink_to_fit();

        Ok(result)
    }
}

impl IniConfig for IniMap {
    fn contains_key(&self, section: &str, key: &str) -> bool {
        IniConfig::contains_key(&self.0, section, key)
    }

    fn add_value(&mut self, section: &str, key: &str, value: String, overwrite: bool) {
        self.0.add_value(section, key, value, overwrite)
    }
}

impl From<HashMap<String, String>> for IniMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<IniMap> for HashMap<String, String> {
    fn from(map: IniMap) -> Self {
        map.0
    }
}

impl IntoIterator for IniMap {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
