//! Email template storage: a JSON file of named templates, read-only from the
//! pipeline's side.

use crate::StoreError;
use command_core::{EmailTemplate, TemplateSource};
use std::path::Path;
use tracing::debug;

pub struct TemplateFile {
    templates: Vec<EmailTemplate>,
}

impl TemplateFile {
    /// Load templates from a JSON array file. A missing file is an empty
    /// store, not an error; the write path is administrative and external.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no template file, starting empty");
            return Ok(Self {
                templates: Vec::new(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let templates: Vec<EmailTemplate> = serde_json::from_str(&contents)?;
        debug!(count = templates.len(), "templates loaded");
        Ok(Self { templates })
    }

    pub fn with_templates(templates: Vec<EmailTemplate>) -> Self {
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateSource for TemplateFile {
    fn find(&self, name: &str) -> Option<EmailTemplate> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lookup_is_case_insensitive() {
        let store = TemplateFile::with_templates(vec![EmailTemplate {
            name: "Standup".to_string(),
            subject: "daily standup notes".to_string(),
            body: "Notes attached.".to_string(),
        }]);
        assert!(store.find("standup").is_some());
        assert!(store.find("STANDUP").is_some());
        assert!(store.find("retro").is_none());
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = match TemplateFile::load("/nonexistent/templates.json") {
            Ok(s) => s,
            Err(e) => panic!("load failed: {e}"),
        };
        assert!(store.is_empty());
    }

    #[test]
    fn loads_a_json_array_file() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir failed: {e}"),
        };
        let path = dir.path().join("templates.json");
        let mut file = match std::fs::File::create(&path) {
            Ok(f) => f,
            Err(e) => panic!("create failed: {e}"),
        };
        let json = r#"[{"name": "sick", "subject": "sick leave", "body": "I am unwell today."}]"#;
        if let Err(e) = file.write_all(json.as_bytes()) {
            panic!("write failed: {e}");
        }

        let store = match TemplateFile::load(&path) {
            Ok(s) => s,
            Err(e) => panic!("load failed: {e}"),
        };
        assert_eq!(store.len(), 1);
        let t = match store.find("sick") {
            Some(t) => t,
            None => panic!("template not found"),
        };
        assert_eq!(t.subject, "sick leave");
    }
}
