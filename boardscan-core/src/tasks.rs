//! tasks.json update.
//!
//! Sets the `default` of the prompt inputs whose ids match an
//! [`Assignment`]. Ids that are not in the file are skipped, never created.

use crate::error::{SetupError, SetupResult};
use crate::recommend::Assignment;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed `.vscode/tasks.json`.
#[derive(Debug, Clone)]
pub struct TasksFile {
    path: PathBuf,
    root: Value,
}

impl TasksFile {
    /// Load a tasks file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> SetupResult<Self> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)
            .map_err(|source| SetupError::ReadTasks { path: path.clone(), source })?;
        Self::parse(path, &text)
    }

    /// Parse tasks.json text that was read from `path`.
    pub fn parse(path: PathBuf, text: &str) -> SetupResult<Self> {
        let root: Value = serde_json::from_str(text)
            .map_err(|source| SetupError::ParseTasks { path: path.clone(), source })?;
        if !root.get("inputs").is_some_and(Value::is_array) {
            return Err(SetupError::MissingInputs { path });
        }
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids of the inputs in file order.
    pub fn input_ids(&self) -> Vec<&str> {
        self.inputs()
            .iter()
            .filter_map(|input| input.get("id").and_then(Value::as_str))
            .collect()
    }

    /// Current `default` of an input.
    pub fn input_default(&self, id: &str) -> Option<&str> {
        self.inputs()
            .iter()
            .find(|input| input.get("id").and_then(Value::as_str) == Some(id))
            .and_then(|input| input.get("default"))
            .and_then(Value::as_str)
    }

    fn inputs(&self) -> &[Value] {
        self.root.get("inputs").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
    }

    /// Apply the assignment, returning the ids that were updated.
    pub fn apply(&mut self, assignment: &Assignment) -> Vec<String> {
        let mut updated = Vec::new();
        let Some(inputs) = self.root.get_mut("inputs").and_then(Value::as_array_mut) else {
            return updated;
        };

        for (id, value) in assignment.entries() {
            let input = inputs
                .iter_mut()
                .find(|input| input.get("id").and_then(Value::as_str) == Some(id))
                .and_then(Value::as_object_mut);

            match input {
                Some(object) => {
                    object.insert("default".to_string(), Value::String(value.to_string()));
                    updated.push(id.to_string());
                }
                None => log::warn!("{} has no input with id {id}, skipping", self.path.display()),
            }
        }

        updated
    }

    /// Serialized file contents.
    pub fn to_json_string(&self) -> SetupResult<String> {
        let mut text = serde_json::to_string_pretty(&self.root)
            .map_err(|source| SetupError::ParseTasks { path: self.path.clone(), source })?;
        text.push('\n');
        Ok(text)
    }

    /// Write the file back to where it was loaded from.
    pub fn save(&self) -> SetupResult<()> {
        let text = self.to_json_string()?;
        fs::write(&self.path, text)
            .map_err(|source| SetupError::WriteTasks { path: self.path.clone(), source })
    }
}

/// Load, update and save a tasks file in one go.
pub fn apply_to_file<P: AsRef<Path>>(path: P, assignment: &Assignment) -> SetupResult<Vec<String>> {
    let mut tasks = TasksFile::load(path)?;
    let updated = tasks.apply(assignment);
    if !updated.is_empty() {
        tasks.save()?;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS: &str = r#"{
  "version": "2.0.0",
  "tasks": [],
  "inputs": [
    { "id": "initiatorSN", "type": "promptString", "description": "Initiator SN", "default": "" },
    { "id": "responderSN", "type": "promptString", "description": "Responder SN" },
    { "id": "initiatorCOM", "type": "promptString", "description": "Initiator port" }
  ]
}"#;

    fn assignment() -> Assignment {
        Assignment {
            initiator_sn: Some("683123456".to_string()),
            responder_sn: Some("683654321".to_string()),
            initiator_com: Some("COM3".to_string()),
            responder_com: Some("COM7".to_string()),
        }
    }

    #[test]
    fn test_apply_sets_matching_defaults() {
        let mut tasks = TasksFile::parse(PathBuf::from("tasks.json"), TASKS).expect("parse");
        let updated = tasks.apply(&assignment());

        assert_eq!(updated, vec!["initiatorSN", "responderSN", "initiatorCOM"]);
        assert_eq!(tasks.input_default("initiatorSN"), Some("683123456"));
        assert_eq!(tasks.input_default("responderSN"), Some("683654321"));
        assert_eq!(tasks.input_default("initiatorCOM"), Some("COM3"));
        assert_eq!(tasks.input_ids(), vec!["initiatorSN", "responderSN", "initiatorCOM"]);
    }

    #[test]
    fn test_partial_assignment_leaves_others() {
        let mut tasks = TasksFile::parse(PathBuf::from("tasks.json"), TASKS).expect("parse");
        let only_ports = Assignment {
            initiator_com: Some("/dev/ttyACM0".to_string()),
            responder_com: Some("/dev/ttyACM1".to_string()),
            ..Assignment::default()
        };
        assert_eq!(tasks.apply(&only_ports), vec!["initiatorCOM"]);
        assert_eq!(tasks.input_default("initiatorSN"), Some(""));
    }

    #[test]
    fn test_key_order_preserved() {
        let mut tasks = TasksFile::parse(PathBuf::from("tasks.json"), TASKS).expect("parse");
        tasks.apply(&assignment());
        let text = tasks.to_json_string().expect("serialize");
        let version = text.find("\"version\"").expect("version key");
        let inputs = text.find("\"inputs\"").expect("inputs key");
        assert!(version < inputs);
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_missing_inputs_rejected() {
        let err = TasksFile::parse(PathBuf::from("tasks.json"), r#"{ "version": "2.0.0" }"#)
            .expect_err("no inputs");
        assert!(matches!(err, SetupError::MissingInputs { .. }));
    }

    #[test]
    fn test_comments_rejected() {
        let err = TasksFile::parse(PathBuf::from("tasks.json"), "// c\n{ \"inputs\": [] }")
            .expect_err("jsonc");
        assert!(matches!(err, SetupError::ParseTasks { .. }));
    }

    #[test]
    fn test_apply_to_file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        fs::write(&path, TASKS).expect("write");

        let updated = apply_to_file(&path, &assignment()).expect("apply");
        assert_eq!(updated.len(), 3);

        let reloaded = TasksFile::load(&path).expect("reload");
        assert_eq!(reloaded.input_default("responderSN"), Some("683654321"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = TasksFile::load(dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, SetupError::ReadTasks { .. }));
    }
}
