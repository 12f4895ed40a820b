#![no_main]

use libfuzzer_sys::fuzz_target;
use restable::{
    resource::{utils, FormatFlags},
    ResourceId, ResourceName,
};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Some(parsed) = utils::parse_reference(text) {
        let _ = parsed.name.to_string();
    }

    let _ = utils::parse_attribute_reference(text);
    let _ = utils::try_parse_item_for_mask(text, FormatFlags::ANY, |_| {});
    let _ = text.parse::<ResourceName>();
    let _ = text.parse::<ResourceId>();
});
