use std::collections::BTreeMap;
use std::str::FromStr;

use crate::state::ResourceKind;

/// Resource amounts an ability consumes from the shelter ledger.
///
/// Serialized as a plain table of resource names to amounts, e.g.
/// `{ medical = 3, cash = 12 }`. Unknown resource names are rejected at load.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Cost(BTreeMap<ResourceKind, u32>);

impl Cost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add `amount` of `resource` (zero amounts are dropped).
    pub fn with(mut self, resource: ResourceKind, amount: u32) -> Self {
        if amount > 0 {
            *self.0.entry(resource).or_insert(0) += amount;
        }
        self
    }

    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        self.0.iter().map(|(resource, amount)| (*resource, *amount))
    }
}

impl TryFrom<BTreeMap<String, u32>> for Cost {
    type Error = String;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .try_fold(Cost::new(), |cost, (name, amount)| {
                let resource = ResourceKind::from_str(&name)
                    .map_err(|_| format!("unknown resource `{name}` in cost"))?;
                Ok(cost.with(resource, amount))
            })
    }
}

impl From<Cost> for BTreeMap<String, u32> {
    fn from(cost: Cost) -> Self {
        cost.0
            .into_iter()
            .map(|(resource, amount)| (resource.to_string(), amount))
            .collect()
    }
}

impl FromIterator<(ResourceKind, u32)> for Cost {
    fn from_iter<I: IntoIterator<Item = (ResourceKind, u32)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Cost::new(), |cost, (resource, amount)| cost.with(resource, amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_resource_names() {
        let raw = BTreeMap::from([("medical".to_string(), 3), ("gold".to_string(), 1)]);
        let err = Cost::try_from(raw).unwrap_err();
        assert!(err.contains("gold"));
    }

    #[test]
    fn zero_amounts_are_not_stored() {
        let cost = Cost::new()
            .with(ResourceKind::Cash, 0)
            .with(ResourceKind::Food, 2);
        assert_eq!(cost.iter().count(), 1);
        assert_eq!(cost.get(ResourceKind::Cash), 0);
    }
}
