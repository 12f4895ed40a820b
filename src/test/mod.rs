use crate::{
    diagnostics::Diagnostics,
    resource::{Attribute, ConfigDescription, FormatFlags, ResourceName, ResourceTable, StringPool},
    Source, Value,
};

// Helper function to parse a resource name
pub fn create_name(text: &str) -> ResourceName {
    text.parse().unwrap()
}

// Helper function to create a processed string value
pub fn create_string(pool: &StringPool, text: &str, path: &str) -> Value {
    Value::string(pool.intern(text), Source::new(path))
}

// Helper function to create a strong attribute accepting `mask`
pub fn create_attribute(mask: FormatFlags, path: &str) -> Value {
    Value::attribute(Attribute::new(mask), Source::new(path))
}

// Helper function to create a table holding `(name, text)` strings in the default config
pub fn create_table_with_strings(strings: &[(&str, &str)]) -> ResourceTable {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();

    for (name, text) in strings {
        let value = create_string(&table.string_pool, text, "res/values/strings.xml");
        assert!(table.add_resource(
            &create_name(name),
            None,
            &ConfigDescription::default(),
            "",
            value,
            &diag
        ));
    }

    table
}
