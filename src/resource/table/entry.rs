//! Entries and their configured value slots.

use std::cmp::Ordering;

use crate::resource::{ConfigDescription, Symbol, Value};

/// One (configuration, product) slot of an entry.
///
/// The value is `None` only for slots created through
/// [`ResourceEntry::find_or_create_value`] and not filled yet. The key is fixed at
/// creation; only the value can be changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceConfigValue {
    config: ConfigDescription,
    product: String,
    /// The stored value
    pub value: Option<Value>,
}

impl ResourceConfigValue {
    /// Creates an empty slot.
    pub fn new(config: ConfigDescription, product: impl Into<String>) -> Self {
        ResourceConfigValue {
            config,
            product: product.into(),
            value: None,
        }
    }

    /// Configuration the value applies to.
    #[must_use]
    pub fn config(&self) -> &ConfigDescription {
        &self.config
    }

    /// Product the value applies to, empty for every product.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    fn cmp_key(&self, config: &ConfigDescription, product: &str) -> Ordering {
        self.config
            .cmp(config)
            .then_with(|| self.product.as_str().cmp(product))
    }
}

/// A named resource and all of its configured values.
///
/// Slots are kept sorted by (configuration, product) with at most one slot per key.
#[derive(Debug, Clone, Default)]
pub struct ResourceEntry {
    name: String,
    /// Assigned entry id, the low 16 bits of the resource id
    pub id: Option<u16>,
    /// Declared visibility
    pub symbol: Symbol,
    values: Vec<ResourceConfigValue>,
}

impl ResourceEntry {
    /// Creates an entry with no values, no id and an undefined symbol.
    pub fn new(name: impl Into<String>) -> Self {
        ResourceEntry {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, config: &ConfigDescription, product: &str) -> Result<usize, usize> {
        self.values
            .binary_search_by(|slot| slot.cmp_key(config, product))
    }

    /// Finds the slot for `config` with the empty product.
    #[must_use]
    pub fn find_value(&self, config: &ConfigDescription) -> Option<&ResourceConfigValue> {
        self.find_value_with_product(config, "")
    }

    /// Finds the slot for exactly (`config`, `product`).
    #[must_use]
    pub fn find_value_with_product(
        &self,
        config: &ConfigDescription,
        product: &str,
    ) -> Option<&ResourceConfigValue> {
        self.search(config, product)
            .ok()
            .map(|index| &self.values[index])
    }

    /// Mutable variant of [`ResourceEntry::find_value`].
    pub fn find_value_mut(
        &mut self,
        config: &ConfigDescription,
    ) -> Option<&mut ResourceConfigValue> {
        self.find_value_with_product_mut(config, "")
    }

    /// Mutable variant of [`ResourceEntry::find_value_with_product`].
    pub fn find_value_with_product_mut(
        &mut self,
        config: &ConfigDescription,
        product: &str,
    ) -> Option<&mut ResourceConfigValue> {
        match self.search(config, product) {
            Ok(index) => Some(&mut self.values[index]),
            Err(_) => None,
        }
    }

    /// Returns the slot for (`config`, `product`), inserting an empty one if absent.
    pub fn find_or_create_value(
        &mut self,
        config: &ConfigDescription,
        product: &str,
    ) -> &mut ResourceConfigValue {
        let index = match self.search(config, product) {
            Ok(index) => index,
            Err(index) => {
                self.values
                    .insert(index, ResourceConfigValue::new(config.clone(), product));
                index
            }
        };
        &mut self.values[index]
    }

    /// Returns every slot for `config`, across all products.
    #[must_use]
    pub fn find_all_values(&self, config: &ConfigDescription) -> Vec<&ResourceConfigValue> {
        // Slots sharing a configuration are contiguous.
        let start = self.values.partition_point(|slot| slot.config < *config);
        self.values[start..]
            .iter()
            .take_while(|slot| slot.config == *config)
            .collect()
    }

    /// Returns every slot matching `predicate`, in slot order.
    pub fn find_values_if<P>(&self, mut predicate: P) -> Vec<&ResourceConfigValue>
    where
        P: FnMut(&ResourceConfigValue) -> bool,
    {
        self.values.iter().filter(|slot| predicate(slot)).collect()
    }

    /// All slots, sorted by (configuration, product).
    #[must_use]
    pub fn values(&self) -> &[ResourceConfigValue] {
        &self.values
    }

    /// Mutable iteration over all slots; keys cannot be changed through it.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Option<Value>> {
        self.values.iter_mut().map(|slot| &mut slot.value)
    }

    /// Removes the slot for (`config`, `product`) and returns it.
    pub fn remove_value(
        &mut self,
        config: &ConfigDescription,
        product: &str,
    ) -> Option<ResourceConfigValue> {
        self.search(config, product)
            .ok()
            .map(|index| self.values.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resource::StringPool, Source};

    fn string(pool: &StringPool, text: &str) -> Value {
        Value::string(pool.intern(text), Source::new("strings.xml"))
    }

    #[test]
    fn test_find_or_create_value_is_idempotent() {
        let mut entry = ResourceEntry::new("greeting");
        let config = ConfigDescription::from("fr");

        entry.find_or_create_value(&config, "");
        entry.find_or_create_value(&config, "");
        assert_eq!(entry.values().len(), 1);
        assert!(entry.find_value(&config).unwrap().value.is_none());
    }

    #[test]
    fn test_slots_sorted_and_isolated() {
        let pool = StringPool::new();
        let mut entry = ResourceEntry::new("greeting");
        let default = ConfigDescription::default();
        let fr = ConfigDescription::from("fr");

        entry.find_or_create_value(&fr, "tablet").value = Some(string(&pool, "Salut tablette"));
        entry.find_or_create_value(&fr, "").value = Some(string(&pool, "Salut"));
        entry.find_or_create_value(&default, "").value = Some(string(&pool, "Hello"));

        let keys: Vec<(String, String)> = entry
            .values()
            .iter()
            .map(|slot| (slot.config().to_string(), slot.product().to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("DEFAULT".to_string(), "".to_string()),
                ("fr".to_string(), "".to_string()),
                ("fr".to_string(), "tablet".to_string()),
            ]
        );

        assert_eq!(
            entry.find_value(&fr).unwrap().value,
            Some(string(&pool, "Salut"))
        );
        assert!(entry.find_value_with_product(&default, "tablet").is_none());
        assert_eq!(entry.find_all_values(&fr).len(), 2);
        assert_eq!(entry.find_all_values(&ConfigDescription::from("de")).len(), 0);
    }

    #[test]
    fn test_find_values_if() {
        let pool = StringPool::new();
        let mut entry = ResourceEntry::new("greeting");
        for product in ["", "phone", "tablet"] {
            entry
                .find_or_create_value(&ConfigDescription::default(), product)
                .value = Some(string(&pool, product));
        }

        let products = entry.find_values_if(|slot| !slot.product().is_empty());
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product(), "phone");
    }

    #[test]
    fn test_mutation_through_slots() {
        let pool = StringPool::new();
        let mut entry = ResourceEntry::new("greeting");
        let default = ConfigDescription::default();

        entry.find_or_create_value(&default, "").value = Some(string(&pool, "a"));
        if let Some(slot) = entry.find_value_mut(&default) {
            slot.value = Some(string(&pool, "b"));
        }
        for value in entry.values_mut().flatten() {
            value.comment = "edited".to_string();
        }

        let stored = entry.find_value(&default).unwrap().value.as_ref().unwrap();
        assert_eq!(*stored, string(&pool, "b"));
        assert_eq!(stored.comment, "edited");

        assert!(entry.remove_value(&default, "").is_some());
        assert!(entry.values().is_empty());
    }

    #[test]
    fn test_keys_stay_unique_after_mutable_access() {
        let pool = StringPool::new();
        let mut entry = ResourceEntry::new("greeting");
        let default = ConfigDescription::default();
        let fr = ConfigDescription::from("fr");

        entry.find_or_create_value(&fr, "").value = Some(string(&pool, "Bonjour"));
        entry.find_or_create_value(&default, "").value = Some(string(&pool, "Hello"));

        let slot = entry.find_value_mut(&default).unwrap();
        assert_eq!(slot.config(), &default);
        slot.value = Some(string(&pool, "Hi"));

        let slot = entry.find_or_create_value(&default, "");
        assert_eq!(slot.value, Some(string(&pool, "Hi")));
        assert!(entry.find_value_with_product_mut(&fr, "").is_some());

        let keys: Vec<String> = entry
            .values()
            .iter()
            .map(|slot| slot.config().to_string())
            .collect();
        assert_eq!(keys, vec!["DEFAULT".to_string(), "fr".to_string()]);
    }
}
