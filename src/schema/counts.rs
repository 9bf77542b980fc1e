use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{collections::HashMap, fmt};

/// Ordered `label → count` mapping.
///
/// Serializes as a JSON object whose key order is the entry order, which is
/// what the front-end relies on for "top N" lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts(Vec<(String, u64)>);

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally `labels`, then order by descending count with ties broken by
    /// ascending label.
    pub fn tally<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut by_label: HashMap<&str, u64> = HashMap::new();
        for label in labels {
            *by_label.entry(label).or_default() += 1;
        }
        Self::ranked(by_label.into_iter().map(|(l, c)| (l.to_string(), c)))
    }

    /// Order `(label, count)` pairs by descending count, then ascending label.
    pub fn ranked<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut entries: Vec<(String, u64)> = pairs.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self(entries)
    }

    /// Keep only the first `n` entries.
    pub fn truncated(mut self, n: usize) -> Self {
        self.0.truncate(n);
        self
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    /// Keeps the given order; use `ranked` to sort.
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, c)| (l.into(), c)).collect())
    }
}

impl Serialize for Counts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

struct CountsVisitor;

impl<'de> Visitor<'de> for CountsVisitor {
    type Value = Counts;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of label to count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Counts, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, count)) = access.next_entry::<String, u64>()? {
            entries.push((label, count));
        }
        Ok(Counts(entries))
    }
}

impl<'de> Deserialize<'de> for Counts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_orders_by_count_then_label() {
        let counts = Counts::tally(["US", "FR", "IT", "FR", "US", "CH"]);
        let got: Vec<_> = counts.iter().collect();
        assert_eq!(got, vec![("FR", 2), ("US", 2), ("CH", 1), ("IT", 1)]);
        assert_eq!(counts.truncated(3).len(), 3);
    }

    #[test]
    fn json_keeps_entry_order() {
        let counts: Counts = vec![("SEH", 25), ("V1H", 22), ("BE", 1)].into_iter().collect();
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"SEH":25,"V1H":22,"BE":1}"#);

        let back: Counts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }
}
