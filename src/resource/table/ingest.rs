//! Parallel parsing with serial insertion.
//!
//! Parsing resource inputs is independent per input and only needs the interning pool,
//! which is `Sync`. Inserting into the table needs exclusive access. [`ResourceTable::ingest`]
//! runs the parse step on the rayon pool and then applies the results on the calling
//! thread in input order, so the table ends up the same regardless of scheduling.

use rayon::prelude::*;
use tracing::debug;

use crate::{
    diagnostics::Diagnostics,
    resource::{ConfigDescription, ResourceId, ResourceName, ResourceTable, StringPool, Value},
};

/// A parsed resource waiting to be added to a table.
#[derive(Debug, Clone)]
pub struct PendingResource {
    /// Name to add under
    pub name: ResourceName,
    /// Optional id to check and record
    pub id: Option<ResourceId>,
    /// Configuration key
    pub config: ConfigDescription,
    /// Product key, empty for all products
    pub product: String,
    /// The parsed value
    pub value: Value,
}

impl PendingResource {
    /// Creates a pending addition with no id and the empty product.
    pub fn new(name: ResourceName, config: ConfigDescription, value: Value) -> Self {
        PendingResource {
            name,
            id: None,
            config,
            product: String::new(),
            value,
        }
    }

    /// Sets the id to record.
    #[must_use]
    pub fn with_id(mut self, id: ResourceId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the product key.
    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }
}

impl ResourceTable {
    /// Parses `inputs` in parallel and adds the results in input order.
    ///
    /// `parse` receives one input and the table's pool and returns the resources it
    /// declares, in declaration order.
    ///
    /// Returns `true` if every addition succeeded. Failed additions are reported to
    /// `diag` and do not stop the remaining ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restable::resource::PendingResource;
    /// use restable::{ConfigDescription, Diagnostics, ResourceTable, Source, Value};
    ///
    /// let mut table = ResourceTable::new();
    /// let diag = Diagnostics::new();
    ///
    /// let inputs = vec!["one", "two", "three"];
    /// let ok = table.ingest(inputs, |entry, pool| {
    ///     let name = format!("app:string/{}", entry).parse().unwrap();
    ///     let value = Value::string(pool.intern(entry), Source::new("strings.xml"));
    ///     vec![PendingResource::new(name, ConfigDescription::default(), value)]
    /// }, &diag);
    ///
    /// assert!(ok);
    /// assert_eq!(table.packages()[0].types()[0].entries().len(), 3);
    /// ```
    pub fn ingest<I, F>(&mut self, inputs: Vec<I>, parse: F, diag: &Diagnostics) -> bool
    where
        I: Send,
        F: Fn(I, &StringPool) -> Vec<PendingResource> + Sync,
    {
        let pool = &self.string_pool;
        let parsed: Vec<Vec<PendingResource>> = inputs
            .into_par_iter()
            .map(|input| parse(input, pool))
            .collect();

        let total: usize = parsed.iter().map(Vec::len).sum();
        debug!(inputs = parsed.len(), resources = total, "applying parsed resources");

        let mut all_added = true;
        for pending in parsed.into_iter().flatten() {
            all_added &= self.add_resource(
                &pending.name,
                pending.id,
                &pending.config,
                &pending.product,
                pending.value,
                diag,
            );
        }
        all_added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resource::ValueData, Source};

    fn parse_line(line: &str, pool: &StringPool) -> Vec<PendingResource> {
        line.split(';')
            .filter_map(|item| item.split_once('='))
            .map(|(name, text)| {
                PendingResource::new(
                    format!("app:string/{}", name).parse().unwrap(),
                    ConfigDescription::default(),
                    Value::string(pool.intern(text), Source::new(line)),
                )
            })
            .collect()
    }

    #[test]
    fn test_ingest_applies_in_input_order() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();

        let inputs: Vec<String> = (0..64)
            .map(|i| format!("shared=v{};own_{}=x", i, i))
            .collect();
        assert!(table.ingest(inputs, |line, pool| parse_line(&line, pool), &diag));

        let shared = table
            .find_resource(&"app:string/shared".parse().unwrap())
            .unwrap();
        let value = shared
            .entry
            .find_value(&ConfigDescription::default())
            .unwrap()
            .value
            .as_ref()
            .unwrap();
        match &value.data {
            ValueData::String(text) => assert_eq!(text.as_str(), "v63"),
            other => panic!("unexpected value {}", other),
        }
        assert_eq!(table.packages()[0].types()[0].entries().len(), 65);
        assert!(!diag.has_any());
    }

    #[test]
    fn test_ingest_reports_failures() {
        let mut table = ResourceTable::new();
        let diag = Diagnostics::new();

        let inputs = vec!["good=a", "bad name=b", "other=c"];
        assert!(!table.ingest(inputs, parse_line, &diag));
        assert_eq!(diag.error_count(), 1);
        assert_eq!(table.packages()[0].types()[0].entries().len(), 2);
    }

    #[test]
    fn test_pending_builders() {
        let pool = StringPool::new();
        let pending = PendingResource::new(
            "app:string/a".parse().unwrap(),
            ConfigDescription::default(),
            Value::string(pool.intern("a"), Source::new("a.xml")),
        )
        .with_id(ResourceId::new(0x7f01_0000))
        .with_product("tablet");

        assert_eq!(pending.id, Some(ResourceId::new(0x7f01_0000)));
        assert_eq!(pending.product, "tablet");
    }
}
