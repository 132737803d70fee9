#![no_main]

use libfuzzer_sys::fuzz_target;

const TEMPLATE: &str = r#"{ "openapi": "3.0.0", "components": { "schemas": {} } }"#;

// Accepts arbitrary bytes as the schema document and merges it into a fixed
// template. Goal: no panics, even on malformed input.
fuzz_target!(|data: &[u8]| {
    if let Ok(schema) = std::str::from_utf8(data) {
        let _ = jsonschema2openapi_core::put_schema_into_openapi(
            schema,
            TEMPLATE,
            &Default::default(),
        );
    }
});
