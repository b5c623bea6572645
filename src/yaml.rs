use serde_json::Number;

use crate::Value;
pub use serde_yaml::Value as YamlValue;


impl From<YamlValue> for Value {
    fn from(yaml: YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(b),
            YamlValue::Number(n) => number(&n),
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(seq) => Value::List(
                seq.into_iter()
                    .map(Value::from)
                    .collect()
            ),
            YamlValue::Mapping(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (key(k), Value::from(v)))
                    .collect()
            ),
            YamlValue::Tagged(tagged) => Value::from(tagged.value)
        }
    }
}

impl From<&YamlValue> for Value {
    fn from(yaml: &YamlValue) -> Self {
        Value::from(yaml.clone())
    }
}

fn number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Number(Number::from(u))
    } else {
        n.as_f64().map_or(Value::Null, Value::from)
    }
}

// mapping keys may be any scalar in yaml
fn key(yaml: YamlValue) -> String {
    match yaml {
        YamlValue::String(s) => s,
        YamlValue::Tagged(tagged) => key(tagged.value),
        other => Value::from(other).to_text()
    }
}
