//! The label-propagation pass.
//!
//! One run walks every managed project and decides, task by task, whether
//! the tracking label belongs on it. Decisions mutate the snapshot in place,
//! so a parent's grant is already visible when the child is visited; the
//! walk is parent-before-child, which makes a single pass reach the state a
//! repeated run would leave unchanged.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classify::Classifier;
use crate::snapshot::{ProjectTree, Snapshot};
use crate::types::{Discipline, LabelId, ProjectId};
use crate::visibility::VisibilityFilter;

pub struct Engine {
    classifier: Classifier,
    filter: VisibilityFilter,
    label: LabelId,
}

impl Engine {
    pub fn new(classifier: Classifier, filter: VisibilityFilter, label: LabelId) -> Self {
        Self {
            classifier,
            filter,
            label,
        }
    }

    /// Runs one full propagation pass. `now` anchors the future-hide window
    /// for the whole cycle.
    pub fn run(&self, snapshot: &mut Snapshot, now: DateTime<Utc>) {
        let projects = snapshot.projects().to_vec();
        for project in &projects {
            let Some(discipline) = self.classifier.project_discipline(project) else {
                continue;
            };
            debug!(
                project = %project.name,
                discipline = discipline.as_str(),
                "processing project"
            );
            self.run_project(snapshot, project.id, discipline, now);
        }
    }

    fn run_project(
        &self,
        snapshot: &mut Snapshot,
        project_id: ProjectId,
        discipline: Discipline,
        now: DateTime<Utc>,
    ) {
        let tree = ProjectTree::build(snapshot, project_id);
        let mut first_root_taken = false;

        for &id in tree.visit_order() {
            let Some(item) = snapshot.item(id) else {
                continue;
            };

            // A far-future task sheds the label and sits the cycle out. It
            // does not take the serial slot, and its subtree is still walked
            // on its own turns.
            if self.filter.is_hidden(item, now) {
                snapshot.remove_label(id, self.label);
                continue;
            }

            let is_root = item.parent_id.is_none();
            let node_discipline = self.classifier.item_discipline(item);

            if is_root {
                match discipline {
                    Discipline::Serial => {
                        if !first_root_taken {
                            snapshot.add_label(id, self.label);
                            first_root_taken = true;
                        } else {
                            snapshot.remove_label(id, self.label);
                        }
                    }
                    Discipline::Parallel => snapshot.add_label(id, self.label),
                }
            }

            let children = tree.children(id);
            if node_discipline.is_none() && children.is_empty() {
                // Plain leaf: it keeps whatever the root rule or its parent
                // decided for it.
                continue;
            }

            if snapshot.has_label(id, self.label) {
                match node_discipline {
                    Some(Discipline::Serial) => {
                        // First child still open takes the label; completed
                        // children and everything after the taker lose it.
                        let mut first_child_taken = false;
                        for &child in children {
                            let completed =
                                snapshot.item(child).is_none_or(|c| c.checked);
                            if !completed && !first_child_taken {
                                snapshot.add_label(child, self.label);
                                first_child_taken = true;
                            } else {
                                snapshot.remove_label(child, self.label);
                            }
                        }
                    }
                    Some(Discipline::Parallel) => {
                        for &child in children {
                            snapshot.add_label(child, self.label);
                        }
                    }
                    // A parent without a marker sheds the label without
                    // passing it to any child.
                    None => {}
                }
                // The label lives on actionable leaves, never on a parent.
                snapshot.remove_label(id, self.label);
            } else {
                // An unlabelled parent pulls the label off its direct
                // children; grandchildren follow on the children's turns.
                for &child in children {
                    snapshot.remove_label(child, self.label);
                }
            }
        }
    }
}
