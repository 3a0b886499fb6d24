//! Measures and the component tree they are aggregated over.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sensors::InputFile;

/// Key of the project component. File and directory components are keyed by
/// their relative path, so this cannot collide with them.
pub const PROJECT_KEY: &str = ".";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasureValue {
    Int(i64),
    Double(f64),
    Data(String),
}

impl MeasureValue {
    /// Integer value; doubles are truncated and data counts as 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            Self::Double(v) => *v as i64,
            Self::Data(_) => 0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Double(v) => *v,
            Self::Data(_) => 0.0,
        }
    }
}

impl From<i64> for MeasureValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for MeasureValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for MeasureValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// Measures keyed by component, then by metric.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MeasureStore {
    measures: BTreeMap<String, BTreeMap<String, MeasureValue>>,
}

impl MeasureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a measure, replacing any earlier value.
    pub fn save(
        &mut self,
        component: &str,
        metric: &str,
        value: impl Into<MeasureValue>,
    ) -> &mut Self {
        let value = value.into();
        tracing::trace!(component, metric, ?value, "saving measure");
        self.measures
            .entry(component.to_string())
            .or_default()
            .insert(metric.to_string(), value);
        self
    }

    pub fn get(&self, component: &str, metric: &str) -> Option<&MeasureValue> {
        self.measures.get(component)?.get(metric)
    }

    pub fn int(&self, component: &str, metric: &str) -> Option<i64> {
        self.get(component, metric).map(MeasureValue::as_int)
    }

    pub fn double(&self, component: &str, metric: &str) -> Option<f64> {
        self.get(component, metric).map(MeasureValue::as_f64)
    }

    pub fn component(&self, component: &str) -> Option<&BTreeMap<String, MeasureValue>> {
        self.measures.get(component)
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, MeasureValue>)> {
        self.measures.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total number of measures over all components.
    pub fn len(&self) -> usize {
        self.measures.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.values().all(BTreeMap::is_empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Project,
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    key: String,
    kind: ComponentKind,
    test: bool,
}

impl Component {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Test files, and directories below a `src/test/` root.
    pub fn is_test(&self) -> bool {
        self.test
    }
}

/// Project, directories and files, in a tree rooted at the project.
#[derive(Debug, Clone)]
pub struct ComponentTree {
    components: Vec<Component>,
    children: Vec<Vec<usize>>,
    index: BTreeMap<String, usize>,
}

impl ComponentTree {
    pub fn from_files<'f>(files: impl IntoIterator<Item = &'f InputFile>) -> Self {
        let mut tree = Self {
            components: Vec::new(),
            children: Vec::new(),
            index: BTreeMap::new(),
        };
        tree.insert(PROJECT_KEY.to_string(), ComponentKind::Project, false, None);

        for file in files {
            let path = file.relative_path();
            let mut parent = 0;
            let mut offset = 0;
            while let Some(slash) = path[offset..].find('/') {
                let dir = &path[..offset + slash];
                let test = format!("{dir}/").contains("src/test/");
                parent = tree.insert(dir.to_string(), ComponentKind::Directory, test, Some(parent));
                offset += slash + 1;
            }
            tree.insert(path.to_string(), ComponentKind::File, file.is_test(), Some(parent));
        }
        tree
    }

    fn insert(
        &mut self,
        key: String,
        kind: ComponentKind,
        test: bool,
        parent: Option<usize>,
    ) -> usize {
        if let Some(&existing) = self.index.get(&key) {
            return existing;
        }
        let id = self.components.len();
        self.index.insert(key.clone(), id);
        self.components.push(Component { key, kind, test });
        self.children.push(Vec::new());
        if let Some(parent) = parent {
            self.children[parent].push(id);
        }
        id
    }

    pub fn root(&self) -> &Component {
        &self.components[0]
    }

    pub fn component(&self, key: &str) -> Option<&Component> {
        self.index.get(key).map(|&i| &self.components[i])
    }

    pub fn children(&self, key: &str) -> impl Iterator<Item = &Component> {
        self.index
            .get(key)
            .into_iter()
            .flat_map(|&i| self.children[i].iter().map(|&c| &self.components[c]))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component ids with every child before its parent.
    pub(crate) fn post_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.components.len());
        let mut stack = vec![(0usize, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
            } else {
                stack.push((id, true));
                for &child in self.children[id].iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        order
    }
}

/// View of one component and its children handed to a measure computer.
#[derive(Debug)]
pub struct MeasureContext<'a> {
    tree: &'a ComponentTree,
    id: usize,
    store: &'a mut MeasureStore,
}

impl<'a> MeasureContext<'a> {
    pub(crate) fn new(tree: &'a ComponentTree, id: usize, store: &'a mut MeasureStore) -> Self {
        Self { tree, id, store }
    }

    pub fn component(&self) -> &Component {
        &self.tree.components[self.id]
    }

    pub fn measure(&self, metric: &str) -> Option<&MeasureValue> {
        self.store.get(self.component().key(), metric)
    }

    pub fn int_measure(&self, metric: &str) -> Option<i64> {
        self.measure(metric).map(MeasureValue::as_int)
    }

    /// Integer values of `metric` on the children that have it, in child order.
    pub fn children_ints(&self, metric: &str) -> Vec<i64> {
        self.tree.children[self.id]
            .iter()
            .filter_map(|&c| self.store.int(self.tree.components[c].key(), metric))
            .collect()
    }

    pub fn add_measure(&mut self, metric: &str, value: impl Into<MeasureValue>) {
        let key = self.tree.components[self.id].key.clone();
        self.store.save(&key, metric, value);
    }
}
