//! Integration tests for the add/find/collision lifecycle of a resource table.
//!
//! Each test walks one realistic sequence of operations a resource compiler performs
//! while merging resource definitions, checking both the stored state and the
//! diagnostics produced along the way.

use restable::{prelude::*, Result};

fn string(table: &ResourceTable, text: &str, path: &str) -> Value {
    Value::string(table.string_pool.intern(text), Source::new(path))
}

fn stored_text(table: &ResourceTable, name: &ResourceName, config: &ConfigDescription) -> String {
    let entry = table.find_resource(name).unwrap().entry;
    match &entry.find_value(config).unwrap().value.as_ref().unwrap().data {
        ValueData::String(text) => text.to_string(),
        other => panic!("expected a string, found {}", other),
    }
}

/// Adds a default and a French string, redeclares the default, then tries a conflicting kind.
#[test]
fn test_string_lifecycle() -> Result<()> {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();
    let app_name: ResourceName = "app:string/app_name".parse()?;
    let default = ConfigDescription::default();
    let french = ConfigDescription::from("fr");

    // A first declaration in the default configuration.
    let hello = string(&table, "Hello", "res/values/strings.xml");
    assert!(table.add_resource(&app_name, None, &default, "", hello, &diag));
    assert_eq!(stored_text(&table, &app_name, &default), "Hello");

    // A translation lands in its own slot.
    let bonjour = string(&table, "Bonjour", "res/values-fr/strings.xml");
    assert!(table.add_resource(&app_name, None, &french, "", bonjour, &diag));

    let entry = table.find_resource(&app_name).unwrap().entry;
    assert_eq!(entry.values().len(), 2);
    let defaults = entry.find_all_values(&default);
    assert_eq!(defaults.len(), 1);
    assert_eq!(
        defaults[0].value.as_ref().unwrap(),
        &string(&table, "Hello", "")
    );

    // Redeclaring the same kind replaces the value.
    let hello2 = string(&table, "Hello2", "lib/res/values/strings.xml");
    assert!(table.add_resource(&app_name, None, &default, "", hello2, &diag));
    assert_eq!(stored_text(&table, &app_name, &default), "Hello2");
    assert_eq!(stored_text(&table, &app_name, &french), "Bonjour");
    assert!(!diag.has_any());

    // A reference at the same key is a different kind: conflict.
    let reference = Value::reference(
        Reference::new("app:string/other".parse::<ResourceName>()?),
        Source::new("res/values/overlay.xml").with_line(7),
    );
    assert!(!table.add_resource(&app_name, None, &default, "", reference, &diag));
    assert_eq!(stored_text(&table, &app_name, &default), "Hello2");

    let sources: Vec<String> = diag
        .iter()
        .filter_map(|d| d.source.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(
        sources,
        vec!["res/values/overlay.xml:7", "lib/res/values/strings.xml"]
    );
    assert_eq!(diag.error_count(), 1);
    assert_eq!(diag.by_category(DiagnosticCategory::Collision).len(), 2);

    Ok(())
}

/// A resource id, once recorded, rejects a different id for the same resource.
#[test]
fn test_id_conflict_keeps_first_id() -> Result<()> {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();
    let x: ResourceName = "app:id/x".parse()?;
    let default = ConfigDescription::default();

    let first: ResourceId = "0x7f010000".parse()?;
    let second: ResourceId = "0x7f010001".parse()?;

    let a = Value::id(Source::new("a.xml"));
    assert!(table.add_resource(&x, Some(first), &default, "", a, &diag));
    let b = Value::id(Source::new("b.xml"));
    assert!(!table.add_resource(&x, Some(second), &default, "", b, &diag));

    let found = table.find_resource(&x).unwrap();
    assert_eq!(found.entry.id, Some(0x0000));
    assert_eq!(found.resource_type.id, Some(0x01));
    assert_eq!(found.package.id, Some(0x7f));

    let errors = diag.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].category, DiagnosticCategory::Identifier);
    assert_eq!(errors[0].source.as_ref().unwrap().path, "b.xml");

    // The same id again is fine.
    let c = Value::id(Source::new("c.xml"));
    assert!(table.add_resource(&x, Some(first), &default, "", c, &diag));
    assert_eq!(diag.error_count(), 1);

    Ok(())
}

/// Lookups of absent resources create nothing.
#[test]
fn test_missing_lookup_has_no_side_effects() -> Result<()> {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();
    let default = ConfigDescription::default();

    let hello = string(&table, "Hello", "strings.xml");
    let present: ResourceName = "app:string/present".parse()?;
    assert!(table.add_resource(&present, None, &default, "", hello, &diag));

    let pool_size = table.string_pool.len();
    for missing in ["app:string/missing", "app:layout/missing", "other:string/present"] {
        assert!(table.find_resource(&missing.parse::<ResourceName>()?).is_none());
    }

    assert_eq!(table.packages().len(), 1);
    assert_eq!(table.packages()[0].types().len(), 1);
    assert_eq!(table.packages()[0].types()[0].entries().len(), 1);
    assert_eq!(table.string_pool.len(), pool_size);

    Ok(())
}

/// Keys differing only in product never collide.
#[test]
fn test_products_are_isolated() -> Result<()> {
    let mut table = ResourceTable::with_config(TableConfig::strict());
    let diag = Diagnostics::new();
    let name: ResourceName = "app:string/label".parse()?;
    let default = ConfigDescription::default();

    for product in ["", "phone", "tablet"] {
        let value = string(&table, product, "strings.xml");
        assert!(table.add_resource(&name, None, &default, product, value, &diag));
    }

    let entry = table.find_resource(&name).unwrap().entry;
    assert_eq!(entry.find_all_values(&default).len(), 3);
    assert!(entry.find_value_with_product(&default, "tablet").is_some());
    assert!(entry.find_value_with_product(&default, "watch").is_none());

    // Strict tables reject a strong redeclaration.
    let again = string(&table, "again", "other.xml");
    assert!(!table.add_resource(&name, None, &default, "phone", again, &diag));
    assert!(diag.errors()[0].message.contains("product 'phone'"));

    Ok(())
}

/// Creating the same package, type and entry twice yields the same nodes.
#[test]
fn test_idempotent_creation() -> Result<()> {
    let mut table = ResourceTable::new();

    table.create_package("app", Some(0x7f))?;
    table
        .find_or_create_package("app")
        .find_or_create_type(ResourceType::Drawable)
        .find_or_create_entry("icon");
    table
        .find_or_create_package("app")
        .find_or_create_type(ResourceType::Drawable)
        .find_or_create_entry("icon");

    assert_eq!(table.packages().len(), 1);
    let package = table.find_package("app").unwrap();
    assert_eq!(package.id, Some(0x7f));
    assert_eq!(package.types().len(), 1);
    assert_eq!(package.types()[0].entries().len(), 1);
    assert_eq!(
        package.types()[0].entries()[0].symbol.state,
        SymbolState::Undefined
    );

    Ok(())
}

/// Public symbols without complete ids are reported for id assignment.
#[test]
fn test_public_symbols_and_ids() -> Result<()> {
    let mut table = ResourceTable::new();
    let diag = Diagnostics::new();

    let public = Symbol::new(SymbolState::Public, Source::new("res/values/public.xml"));
    assert!(table.set_symbol_state(
        &"app:string/api".parse::<ResourceName>()?,
        Some("0x7f020000".parse::<ResourceId>()?),
        public.clone(),
        &diag
    ));
    let pending: ResourceName = "app:string/pending".parse()?;
    assert!(table.set_symbol_state(&pending, None, public, &diag));

    let by_id = table.find_resource_by_id("0x7f020000".parse::<ResourceId>()?).unwrap();
    assert_eq!(by_id.entry.name(), "api");
    assert!(by_id.resource_type.symbol.is_public());

    let missing = table.public_entries_without_id();
    assert_eq!(missing, vec!["app:string/pending".parse::<ResourceName>()?]);

    Ok(())
}
