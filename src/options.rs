//! Scaffolder configuration.

use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::path::PathBuf;

/// Options recognized by the procedure scaffolder.
///
/// Deserialized from the JSON `plugin_options` of a scaffold request,
/// e.g. `{"modelNamespace": "App.Models", "contextName": "AppContext"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcedureScaffolderOptions {
    /// Namespace of the generated result types
    pub model_namespace: String,
    /// Namespace the facade is declared in
    pub context_namespace: String,
    /// Name of the data-access context; the facade is `<contextName>Procedures`
    pub context_name: String,
    /// Directory the facade file is rooted under
    pub context_dir: PathBuf,
}

impl Default for ProcedureScaffolderOptions {
    fn default() -> Self {
        Self {
            model_namespace: String::new(),
            context_namespace: String::new(),
            context_name: String::new(),
            context_dir: PathBuf::from("."),
        }
    }
}

impl ProcedureScaffolderOptions {
    pub fn new(
        model_namespace: impl Into<String>,
        context_namespace: impl Into<String>,
        context_name: impl Into<String>,
    ) -> Self {
        Self {
            model_namespace: model_namespace.into(),
            context_namespace: context_namespace.into(),
            context_name: context_name.into(),
            ..Default::default()
        }
    }

    pub fn with_context_dir(mut self, context_dir: impl Into<PathBuf>) -> Self {
        self.context_dir = context_dir.into();
        self
    }

    /// Parse options from JSON bytes. Empty input yields the defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Name of the generated facade type.
    pub fn facade_name(&self) -> String {
        format!("{}Procedures", self.context_name)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("modelNamespace", &self.model_namespace),
            ("contextNamespace", &self.context_namespace),
            ("contextName", &self.context_name),
        ];
        for (argument, value) in required {
            if value.trim().is_empty() {
                return Err(ScaffoldError::invalid_argument(argument, "must not be blank"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_camel_case() {
        let json = br#"{
            "modelNamespace": "Shop.Models",
            "contextNamespace": "Shop.Data",
            "contextName": "ShopContext",
            "contextDir": "Data"
        }"#;
        let options = ProcedureScaffolderOptions::from_json(json).unwrap();
        assert_eq!(options.model_namespace, "Shop.Models");
        assert_eq!(options.context_namespace, "Shop.Data");
        assert_eq!(options.facade_name(), "ShopContextProcedures");
        assert_eq!(options.context_dir, PathBuf::from("Data"));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_missing_context_dir_defaults_to_current() {
        let json = br#"{"modelNamespace": "M", "contextNamespace": "C", "contextName": "Ctx"}"#;
        let options = ProcedureScaffolderOptions::from_json(json).unwrap();
        assert_eq!(options.context_dir, PathBuf::from("."));
    }

    #[test]
    fn test_empty_bytes_are_defaults() {
        let options = ProcedureScaffolderOptions::from_json(b"").unwrap();
        assert_eq!(options, ProcedureScaffolderOptions::default());
    }

    #[test]
    fn test_malformed_json_is_an_options_error() {
        let err = ProcedureScaffolderOptions::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, ScaffoldError::Options(_)));
    }

    #[test]
    fn test_validate_rejects_blank_values() {
        let err = ProcedureScaffolderOptions::new("M", "C", " ")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidArgument {
                argument: "contextName",
                ..
            }
        ));
    }
}
