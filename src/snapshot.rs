//! In-memory working copy of one refresh cycle.
//!
//! A [`Snapshot`] holds the projects and items the cycle operates on, plus a
//! record of each item's label array as it was fetched. Label mutations are
//! applied in place so rules evaluated later in the same cycle observe
//! earlier decisions; the fetched arrays stay untouched so the end-of-cycle
//! diff can tell real changes from transient flip-flops.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::{Item, ItemId, LabelId, Project, ProjectId};

/// All state one propagation cycle reads and mutates.
#[derive(Debug, Clone)]
pub struct Snapshot {
    projects: Vec<Project>,
    items: HashMap<ItemId, Item>,
    by_project: HashMap<ProjectId, Vec<ItemId>>,
    fetched_labels: HashMap<ItemId, Vec<LabelId>>,
}

impl Snapshot {
    /// Builds a working copy from fetched data.
    ///
    /// Deleted projects and items and archived projects are dropped here;
    /// completed items are kept because serial child selection needs to see
    /// them.
    pub fn new(projects: Vec<Project>, items: Vec<Item>) -> Self {
        let mut projects: Vec<Project> = projects
            .into_iter()
            .filter(|p| !p.is_deleted && !p.is_archived)
            .collect();
        projects.sort_by_key(|p| p.id);

        let mut item_map = HashMap::new();
        let mut by_project: HashMap<ProjectId, Vec<ItemId>> = HashMap::new();
        let mut fetched_labels = HashMap::new();
        for item in items.into_iter().filter(|i| !i.is_deleted) {
            by_project.entry(item.project_id).or_default().push(item.id);
            fetched_labels.insert(item.id, item.labels.clone());
            item_map.insert(item.id, item);
        }

        Self {
            projects,
            items: item_map,
            by_project,
            fetched_labels,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Ids of the items belonging to a project, in no particular order.
    pub fn project_items(&self, project_id: ProjectId) -> &[ItemId] {
        self.by_project
            .get(&project_id)
            .map_or(&[], Vec::as_slice)
    }

    /// The item's label array as it was fetched, before any cycle mutations.
    pub fn fetched_labels(&self, id: ItemId) -> Option<&[LabelId]> {
        self.fetched_labels.get(&id).map(Vec::as_slice)
    }

    pub fn has_label(&self, id: ItemId, label: LabelId) -> bool {
        self.items
            .get(&id)
            .is_some_and(|item| item.labels.contains(&label))
    }

    /// Ensures `label` is present on the item. No-op when already present.
    pub fn add_label(&mut self, id: ItemId, label: LabelId) {
        if let Some(item) = self.items.get_mut(&id)
            && !item.labels.contains(&label)
        {
            debug!(task = %item.content, "adding tracking label");
            item.labels.push(label);
        }
    }

    /// Ensures `label` is absent from the item. No-op when already absent.
    pub fn remove_label(&mut self, id: ItemId, label: LabelId) {
        if let Some(item) = self.items.get_mut(&id)
            && item.labels.contains(&label)
        {
            debug!(task = %item.content, "removing tracking label");
            item.labels.retain(|&l| l != label);
        }
    }
}

/// Parent/child index over one project's completable items.
///
/// Notes (items whose content starts with `*`) are left out entirely, so
/// their children show up as orphaned subtrees. Orphans are still walked,
/// after the true roots, but the root-selection rules never apply to them.
#[derive(Debug)]
pub struct ProjectTree {
    order: Vec<ItemId>,
    children: HashMap<ItemId, Vec<ItemId>>,
}

impl ProjectTree {
    pub fn build(snapshot: &Snapshot, project_id: ProjectId) -> Self {
        let mut members: Vec<&Item> = snapshot
            .project_items(project_id)
            .iter()
            .filter_map(|&id| snapshot.item(id))
            .filter(|item| !item.is_note())
            .collect();
        members.sort_by_key(|item| (item.child_order, item.id));
        let member_ids: HashSet<ItemId> = members.iter().map(|item| item.id).collect();

        let mut roots = Vec::new();
        let mut orphans = Vec::new();
        let mut children: HashMap<ItemId, Vec<ItemId>> = HashMap::new();
        for item in &members {
            match item.parent_id {
                None => roots.push(item.id),
                Some(parent) if member_ids.contains(&parent) => {
                    children.entry(parent).or_default().push(item.id);
                }
                Some(_) => orphans.push(item.id),
            }
        }

        // Pre-order walk, every parent before its children. `seen` keeps a
        // corrupt parent cycle from looping forever.
        let mut order = Vec::with_capacity(members.len());
        let mut seen = HashSet::with_capacity(members.len());
        let mut stack = Vec::new();
        for &top in roots.iter().chain(&orphans) {
            stack.push(top);
            while let Some(id) = stack.pop() {
                if !seen.insert(id) {
                    continue;
                }
                order.push(id);
                if let Some(kids) = children.get(&id) {
                    stack.extend(kids.iter().rev());
                }
            }
        }

        Self { order, children }
    }

    /// Every item of the project in visit order: roots first in sibling
    /// order, each immediately followed by its descendants, then orphaned
    /// subtrees.
    pub fn visit_order(&self) -> &[ItemId] {
        &self.order
    }

    /// Direct children of an item, in sibling order.
    pub fn children(&self, id: ItemId) -> &[ItemId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }
}
