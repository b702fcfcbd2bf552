//! Kernel spec check and fix.

use crate::notebook::Notebook;
use crate::{ConfigError, KernelError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const KERNELSPEC: &str = "kernelspec";

/// Expected `metadata.kernelspec` fields. Unset fields are not checked.
///
/// Keys other than the three below are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelSpec {
    /// Kernel name, e.g. `python3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Kernel language, e.g. `python`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Human readable kernel name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl KernelSpec {
    /// Parses a kernel spec from a JSON object string.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|err| ConfigError::InvalidKernelSpec(err.to_string()))
    }

    /// Returns a copy with any `Some` field of `overrides` replacing ours.
    pub fn merged(&self, overrides: &KernelSpec) -> KernelSpec {
        KernelSpec {
            name: overrides.name.clone().or_else(|| self.name.clone()),
            language: overrides.language.clone().or_else(|| self.language.clone()),
            display_name: overrides
                .display_name
                .clone()
                .or_else(|| self.display_name.clone()),
        }
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// The set fields as a JSON map.
    pub fn fields(&self) -> Map<String, Value> {
        [
            ("name", &self.name),
            ("language", &self.language),
            ("display_name", &self.display_name),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), Value::from(v.as_str()))))
        .collect()
    }

    /// Checks a notebook's kernel spec against the expected fields.
    pub fn check(&self, notebook: &Notebook) -> Result<(), KernelError> {
        let Some(Value::Object(actual)) = notebook.metadata.get(KERNELSPEC) else {
            return Err(KernelError::MissingKernelSpec);
        };
        let expected = self.fields();
        if expected.iter().all(|(key, value)| actual.get(key) == Some(value)) {
            return Ok(());
        }
        Err(KernelError::KernelSpecMismatch {
            report: mismatch_report(actual, &expected),
            actual: actual.clone(),
            expected,
        })
    }

    /// Writes the expected fields into the notebook's kernel spec, creating it if needed.
    ///
    /// Other kernel spec keys are kept.
    pub fn fix(&self, notebook: &mut Notebook) {
        let entry = notebook
            .metadata
            .entry(KERNELSPEC)
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(spec) = entry {
            spec.extend(self.fields());
        }
    }
}

#[derive(Serialize)]
struct MismatchReport<'a> {
    actual: &'a Map<String, Value>,
    expected: &'a Map<String, Value>,
}

fn mismatch_report(actual: &Map<String, Value>, expected: &Map<String, Value>) -> String {
    let report = MismatchReport { actual, expected };
    // Both sides are plain JSON maps, which always have a YAML form.
    serde_yaml::to_string(&report).unwrap_or_else(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notebook_with(metadata: Value) -> Notebook {
        let mut nb = Notebook::default();
        if let Value::Object(map) = metadata {
            nb.metadata = map;
        }
        nb
    }

    fn expected() -> KernelSpec {
        KernelSpec {
            name: Some("csdms".into()),
            language: Some("python".into()),
            display_name: None,
        }
    }

    #[test]
    fn matching_spec_passes() {
        let nb = notebook_with(json!({
            "kernelspec": {"name": "csdms", "language": "python", "display_name": "CSDMS"}
        }));
        assert_eq!(expected().check(&nb), Ok(()));
    }

    #[test]
    fn missing_spec_is_reported() {
        let nb = notebook_with(json!({"language_info": {}}));
        assert_eq!(expected().check(&nb), Err(KernelError::MissingKernelSpec));
    }

    #[test]
    fn mismatch_reports_yaml() {
        let nb = notebook_with(json!({"kernelspec": {"name": "python3", "language": "python"}}));
        let err = expected().check(&nb).unwrap_err();
        let KernelError::KernelSpecMismatch { actual, expected, .. } = &err else {
            panic!("expected a mismatch");
        };
        assert_eq!(actual.get("name"), Some(&Value::from("python3")));
        assert_eq!(expected.get("name"), Some(&Value::from("csdms")));
        insta::assert_snapshot!(err.to_string(), @r"
        actual:
          language: python
          name: python3
        expected:
          language: python
          name: csdms
        ");
    }

    #[test]
    fn fix_sets_expected_fields_and_keeps_others() {
        let mut nb = notebook_with(json!({"kernelspec": {"name": "python3", "display_name": "Py"}}));
        expected().fix(&mut nb);
        assert_eq!(
            nb.metadata["kernelspec"],
            json!({"name": "csdms", "language": "python", "display_name": "Py"})
        );
        assert_eq!(expected().check(&nb), Ok(()));
    }

    #[test]
    fn fix_creates_missing_spec() {
        let mut nb = Notebook::default();
        expected().fix(&mut nb);
        assert_eq!(expected().check(&nb), Ok(()));
    }

    #[test]
    fn overrides_win_over_json() {
        let base = KernelSpec::from_json(r#"{"name": "a", "language": "python"}"#).unwrap();
        let merged = base.merged(&KernelSpec {
            name: Some("b".into()),
            ..KernelSpec::default()
        });
        assert_eq!(merged.name.as_deref(), Some("b"));
        assert_eq!(merged.language.as_deref(), Some("python"));
        assert!(KernelSpec::from_json(r#""python3""#).is_err());
    }

    #[test]
    fn unknown_kernel_spec_keys_are_rejected() {
        let err = KernelSpec::from_json(r#"{"name": "python3", "env": {"A": "1"}}"#).unwrap_err();
        let ConfigError::InvalidKernelSpec(message) = err else {
            panic!("expected an invalid kernel spec");
        };
        assert!(message.contains("unknown field `env`"));
    }
}
