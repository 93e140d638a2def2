use model::Condition;
use std::{cell::RefCell, collections::HashMap};

/// Leaf translations remembered for one `translate` call.
pub(crate) struct LeafCache<Q> {
    enabled: bool,
    entries: RefCell<HashMap<(Condition, bool), Option<Q>>>,
}

impl<Q: Clone> LeafCache<Q> {
    pub fn new(enabled: bool) -> Self {
        LeafCache {
            enabled,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn get_or_translate(
        &self,
        condition: &Condition,
        negated: bool,
        translate: impl FnOnce() -> Option<Q>,
    ) -> Option<Q> {
        if !self.enabled {
            return translate();
        }

        let key = (condition.clone(), negated);
        if let Some(hit) = self.entries.borrow().get(&key) {
            return hit.clone();
        }

        // the borrow is released before calling out to the backend
        let query = translate();
        self.entries.borrow_mut().insert(key, query.clone());
        query
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
