//! Discipline classification for projects and parent items.
//!
//! A name opts a sibling group into management: a trailing marker character
//! picks the discipline, and the Inbox project is special-cased by
//! configuration. Names without a marker leave the group unmanaged.

use crate::types::{Discipline, Item, Project};

/// The fixed name of the built-in inbox project.
const INBOX_NAME: &str = "Inbox";

/// Decides which discipline, if any, governs a project or a parent item.
///
/// Decisions depend only on names and the configured markers, never on the
/// tree shape, so the classifier is shared freely across a cycle.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    inbox_discipline: Option<Discipline>,
    parallel_suffix: char,
    serial_suffix: char,
}

impl Classifier {
    pub fn new(
        inbox_discipline: Option<Discipline>,
        parallel_suffix: char,
        serial_suffix: char,
    ) -> Self {
        Self {
            inbox_discipline,
            parallel_suffix,
            serial_suffix,
        }
    }

    /// Discipline of a project, or `None` if the project is unmanaged.
    ///
    /// The inbox always takes its configured handling, even when its marker
    /// characters would say otherwise.
    pub fn project_discipline(&self, project: &Project) -> Option<Discipline> {
        let name = project.name.trim();
        if name == INBOX_NAME {
            return self.inbox_discipline;
        }
        self.suffix_discipline(name)
    }

    /// Discipline a parent item imposes on its children, or `None` if the
    /// item carries no marker.
    pub fn item_discipline(&self, item: &Item) -> Option<Discipline> {
        self.suffix_discipline(item.content.trim())
    }

    /// The parallel marker wins when both markers are configured to the same
    /// character.
    fn suffix_discipline(&self, name: &str) -> Option<Discipline> {
        let last = name.chars().last()?;
        if last == self.parallel_suffix {
            Some(Discipline::Parallel)
        } else if last == self.serial_suffix {
            Some(Discipline::Serial)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(Some(Discipline::Parallel), '.', '_')
    }

    fn project(name: &str) -> Project {
        Project {
            id: 1,
            name: name.to_string(),
            is_deleted: false,
            is_archived: false,
        }
    }

    fn item(content: &str) -> Item {
        Item {
            id: 1,
            project_id: 1,
            parent_id: None,
            content: content.to_string(),
            child_order: 0,
            checked: false,
            due_date_utc: None,
            labels: Vec::new(),
            is_deleted: false,
        }
    }

    #[test]
    fn test_project_suffix_selects_discipline() {
        let c = classifier();
        assert_eq!(
            c.project_discipline(&project("Errands.")),
            Some(Discipline::Parallel)
        );
        assert_eq!(
            c.project_discipline(&project("Kitchen remodel_")),
            Some(Discipline::Serial)
        );
        assert_eq!(c.project_discipline(&project("Someday")), None);
    }

    #[test]
    fn test_suffix_read_after_trimming() {
        let c = classifier();
        assert_eq!(
            c.project_discipline(&project("Errands.  ")),
            Some(Discipline::Parallel)
        );
        assert_eq!(
            c.item_discipline(&item("Pack boxes_ ")),
            Some(Discipline::Serial)
        );
    }

    #[test]
    fn test_inbox_takes_configured_handling() {
        let serial = Classifier::new(Some(Discipline::Serial), '.', '_');
        assert_eq!(
            serial.project_discipline(&project("Inbox")),
            Some(Discipline::Serial)
        );
        // Trimming applies before the name comparison.
        assert_eq!(
            serial.project_discipline(&project(" Inbox ")),
            Some(Discipline::Serial)
        );

        let ignored = Classifier::new(None, '.', 'x');
        // "none" skips the inbox without falling back to the marker check,
        // even though the name ends in the serial marker here.
        assert_eq!(ignored.project_discipline(&project("Inbox")), None);
    }

    #[test]
    fn test_blank_name_is_unmanaged() {
        let c = classifier();
        assert_eq!(c.project_discipline(&project("")), None);
        assert_eq!(c.project_discipline(&project("   ")), None);
        assert_eq!(c.item_discipline(&item("")), None);
    }

    #[test]
    fn test_item_suffix_selects_discipline() {
        let c = classifier();
        assert_eq!(
            c.item_discipline(&item("Trip prep.")),
            Some(Discipline::Parallel)
        );
        assert_eq!(
            c.item_discipline(&item("Thesis chapters_")),
            Some(Discipline::Serial)
        );
        assert_eq!(c.item_discipline(&item("Plain task")), None);
    }

    #[test]
    fn test_identical_markers_resolve_parallel() {
        let c = Classifier::new(Some(Discipline::Parallel), '.', '.');
        assert_eq!(
            c.project_discipline(&project("Chores.")),
            Some(Discipline::Parallel)
        );
    }
}
