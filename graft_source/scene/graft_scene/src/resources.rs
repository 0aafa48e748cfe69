use graft_ids::{ElementID, ObjectID};
use rustc_hash::FxHashMap;

/// A loadable template registered under a resource path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    /// Game object hierarchy cloned by `World::instantiate`.
    Prefab(ObjectID),
    /// Element tree cloned by `World::instantiate_tree`.
    VisualTree(ElementID),
}

#[derive(Clone, Debug, Default)]
pub struct Resources {
    assets: FxHashMap<String, Asset>,
}

impl Resources {
    pub fn insert(&mut self, path: impl Into<String>, asset: Asset) -> Option<Asset> {
        self.assets.insert(path.into(), asset)
    }

    pub fn get(&self, path: &str) -> Option<Asset> {
        self.assets.get(path).copied()
    }

    pub fn remove(&mut self, path: &str) -> Option<Asset> {
        self.assets.remove(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
