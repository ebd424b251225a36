//! # Curriculum Store
//!
//! Read-only table of learning modules. Each module has an ordered list of
//! lessons and exactly one quiz.
//!
//! ```text
//! Curriculum
//! └── modules: Vec<Module>      // declaration order = module grid order
//!     ├── id / name / icon
//!     ├── lessons: Vec<Lesson>  // order = Previous/Next order, never empty
//!     └── quiz: Quiz            // >= 2 options, correct_index in range
//! ```
//!
//! The built-in curriculum is compiled into the binary from
//! `assets/curriculum.toml` and validated once at startup. There is no
//! mutation API: after construction the table never changes.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

const BUILTIN_CURRICULUM: &str = include_str!("../../assets/curriculum.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    /// Markdown body.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Quiz {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub lessons: Vec<Lesson>,
    pub quiz: Quiz,
}

impl Module {
    pub fn lesson(&self, index: usize) -> Option<&Lesson> {
        self.lessons.get(index)
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}

#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error("module not found: {0}")]
    NotFound(String),
    #[error("curriculum parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate module id: {0}")]
    DuplicateModule(String),
    #[error("module {0} has no lessons")]
    EmptyModule(String),
    #[error("quiz in module {module} has {count} option(s), at least 2 required")]
    TooFewOptions { module: String, count: usize },
    #[error("quiz in module {module} marks option {index} correct but has {count} options")]
    CorrectIndexOutOfRange {
        module: String,
        index: usize,
        count: usize,
    },
}

/// Summary of one module without lesson bodies, for `--list-modules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOutline<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub icon: &'a str,
    pub lessons: Vec<&'a str>,
    pub quiz: &'a str,
}

/// On-disk shape: a `[[module]]` array of tables.
#[derive(Deserialize)]
struct CurriculumFile {
    #[serde(rename = "module", default)]
    modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curriculum {
    modules: Vec<Module>,
}

impl Curriculum {
    /// Build a curriculum, rejecting malformed modules.
    pub fn new(modules: Vec<Module>) -> Result<Self, CurriculumError> {
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id.as_str()) {
                return Err(CurriculumError::DuplicateModule(module.id.clone()));
            }
            if module.lessons.is_empty() {
                return Err(CurriculumError::EmptyModule(module.id.clone()));
            }
            let count = module.quiz.options.len();
            if count < 2 {
                return Err(CurriculumError::TooFewOptions {
                    module: module.id.clone(),
                    count,
                });
            }
            if module.quiz.correct_index >= count {
                return Err(CurriculumError::CorrectIndexOutOfRange {
                    module: module.id.clone(),
                    index: module.quiz.correct_index,
                    count,
                });
            }
        }
        Ok(Self { modules })
    }

    pub fn from_toml(source: &str) -> Result<Self, CurriculumError> {
        let file: CurriculumFile = toml::from_str(source)?;
        let curriculum = Self::new(file.modules)?;
        debug!("Curriculum loaded: {} modules", curriculum.len());
        Ok(curriculum)
    }

    /// The curriculum shipped with the app.
    pub fn builtin() -> Result<Self, CurriculumError> {
        Self::from_toml(BUILTIN_CURRICULUM)
    }

    pub fn get_module(&self, id: &str) -> Result<&Module, CurriculumError> {
        self.modules
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| CurriculumError::NotFound(id.to_string()))
    }

    /// All modules in declaration order.
    pub fn list_modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn outline(&self) -> Vec<ModuleOutline<'_>> {
        self.modules
            .iter()
            .map(|m| ModuleOutline {
                id: &m.id,
                name: &m.name,
                icon: &m.icon,
                lessons: m.lessons.iter().map(|l| l.title.as_str()).collect(),
                quiz: &m.quiz.question,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str, lessons: usize, options: usize, correct: usize) -> Module {
        Module {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "*".to_string(),
            lessons: (0..lessons)
                .map(|i| Lesson {
                    title: format!("Lesson {i}"),
                    content: "body".to_string(),
                })
                .collect(),
            quiz: Quiz {
                question: "?".to_string(),
                options: (0..options).map(|i| format!("option {i}")).collect(),
                correct_index: correct,
            },
        }
    }

    #[test]
    fn test_builtin_curriculum_is_valid() {
        let curriculum = Curriculum::builtin().unwrap();
        let ids: Vec<&str> = curriculum.list_modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["basics", "budgeting", "saving", "investing", "credit"]);
    }

    #[test]
    fn test_builtin_budgeting_quiz_answer() {
        let curriculum = Curriculum::builtin().unwrap();
        let budgeting = curriculum.get_module("budgeting").unwrap();
        assert_eq!(budgeting.icon, "💰");
        assert_eq!(budgeting.quiz.correct_index, 1);
        assert!(budgeting.quiz.is_correct(1));
        assert!(!budgeting.quiz.is_correct(0));
    }

    #[test]
    fn test_get_module_returns_listed_record() {
        let curriculum = Curriculum::builtin().unwrap();
        for m in curriculum.list_modules() {
            assert_eq!(curriculum.get_module(&m.id).unwrap(), m);
        }
    }

    #[test]
    fn test_outline_lists_titles_without_content() {
        let curriculum = Curriculum::new(vec![module("a", 2, 2, 0)]).unwrap();
        let outline = curriculum.outline();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].id, "a");
        assert_eq!(outline[0].lessons, ["Lesson 0", "Lesson 1"]);

        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json[0]["quiz"], "?");
        assert!(json[0].get("content").is_none());
    }

    #[test]
    fn test_get_module_unknown_id() {
        let curriculum = Curriculum::builtin().unwrap();
        let err = curriculum.get_module("nonexistent").unwrap_err();
        assert!(matches!(err, CurriculumError::NotFound(ref id) if id == "nonexistent"));
        assert_eq!(err.to_string(), "module not found: nonexistent");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Curriculum::new(vec![module("a", 1, 2, 0), module("a", 1, 2, 0)]).unwrap_err();
        assert!(matches!(err, CurriculumError::DuplicateModule(ref id) if id == "a"));
    }

    #[test]
    fn test_rejects_module_without_lessons() {
        let err = Curriculum::new(vec![module("a", 0, 2, 0)]).unwrap_err();
        assert!(matches!(err, CurriculumError::EmptyModule(_)));
    }

    #[test]
    fn test_rejects_single_option_quiz() {
        let err = Curriculum::new(vec![module("a", 1, 1, 0)]).unwrap_err();
        assert!(matches!(err, CurriculumError::TooFewOptions { count: 1, .. }));
    }

    #[test]
    fn test_rejects_correct_index_out_of_range() {
        let err = Curriculum::new(vec![module("a", 1, 3, 3)]).unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::CorrectIndexOutOfRange { index: 3, count: 3, .. }
        ));
    }

    #[test]
    fn test_from_toml_keeps_declaration_order() {
        let source = r#"
[[module]]
id = "second"
name = "Second"
icon = "2"
lessons = [{ title = "t", content = "c" }]
quiz = { question = "q", options = ["a", "b"], correct_index = 0 }

[[module]]
id = "first"
name = "First"
icon = "1"
lessons = [{ title = "t", content = "c" }]
quiz = { question = "q", options = ["a", "b"], correct_index = 1 }
"#;
        let curriculum = Curriculum::from_toml(source).unwrap();
        assert_eq!(curriculum.list_modules()[0].id, "second");
        assert_eq!(curriculum.list_modules()[1].id, "first");
    }

    #[test]
    fn test_from_toml_malformed() {
        let err = Curriculum::from_toml("[[module]]\nid = 3").unwrap_err();
        assert!(matches!(err, CurriculumError::Parse(_)));
    }
}
