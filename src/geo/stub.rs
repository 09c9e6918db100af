use super::location::Location;
use crate::config::LookupConfig;

/// Answers from `test_results`, then `default_test_result`. Never touches the network.
pub fn lookup(config: &LookupConfig, target: &str) -> Option<Location> {
    config
        .test_results
        .get(target)
        .or(config.default_test_result.as_ref())
        .cloned()
        .map(Location::Test)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::geo::location::TestRecord;

    fn record(value: Value) -> TestRecord {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn exact_match_wins() {
        let mut config = LookupConfig::with_provider("test");
        config.test_results.insert(
            "8.8.8.8".into(),
            record(json!({ "ip": "8.8.8.8", "city": "Mountain View" })),
        );
        config.default_test_result = Some(record(json!({ "ip": "0.0.0.0" })));

        let location = lookup(&config, "8.8.8.8").unwrap();
        assert_eq!(location.ip(), Some("8.8.8.8"));
        assert_eq!(lookup(&config, "8.8.4.4").unwrap().ip(), Some("0.0.0.0"));
    }

    #[test]
    fn nothing_configured() {
        let config = LookupConfig::with_provider("test");
        assert!(lookup(&config, "8.8.8.8").is_none());
    }

    #[test]
    fn record_is_returned_verbatim() {
        let mut config = LookupConfig::with_provider("test");
        let expected = record(json!({ "zeta": 1, "alpha": [1, 2], "ip": "1.2.3.4" }));
        config
            .test_results
            .insert("1.2.3.4".into(), expected.clone());

        let Some(Location::Test(actual)) = lookup(&config, "1.2.3.4") else {
            panic!("expected a test record");
        };
        assert_eq!(actual, expected);
        assert_eq!(
            actual.keys().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "ip"]
        );
    }
}
